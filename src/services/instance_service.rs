//! Servicio de instancias de tour
//!
//! Orquesta la creación manual, edición, asignación de chofer y borrado de
//! instancias. Cada mutación abre una sola transacción que comparte con las
//! validaciones de catálogo, el verificador de choques y la escritura final.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::instance::TourInstance;
use crate::models::template::TourStatus;
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::instance_repository::InstanceRepository;
use crate::repositories::template_repository::TemplateRepository;
use crate::services::conflict_service::ConflictChecker;
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_positive, validate_time_window};

pub struct CreateInstanceParams {
    pub template_id: Option<Uuid>,
    pub tour_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub vessel_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub max_capacity: Option<i32>,
}

#[derive(Default)]
pub struct UpdateInstanceParams {
    pub tour_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub vessel_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

pub struct InstanceService {
    pool: PgPool,
}

impl InstanceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Alta manual de una instancia, con verificación de choques de
    /// embarcación y chofer contra todas las instancias activas
    pub async fn create_instance(
        &self,
        params: CreateInstanceParams,
    ) -> Result<TourInstance, AppError> {
        validate_time_window(params.start_time, params.end_time)?;

        let mut tx = self.pool.begin().await?;

        // el cupo sale del parámetro o de la plantilla de referencia
        let mut max_capacity = params.max_capacity;
        if let Some(template_id) = params.template_id {
            let template = TemplateRepository::find_by_id_tx(&mut tx, template_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("Tour recurrente de referencia no encontrado".to_string())
                })?;
            max_capacity = max_capacity.or(Some(template.max_capacity));
        }
        let max_capacity = max_capacity.ok_or_else(|| {
            AppError::BadRequest("El cupo máximo es requerido para una instancia suelta".to_string())
        })?;
        validate_positive("cupo_maximo", max_capacity)?;

        let vessel_status = CatalogRepository::vessel_status(&mut tx, params.vessel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Embarcación no encontrada".to_string()))?;
        if vessel_status != "active" {
            return Err(AppError::Conflict(format!(
                "La embarcación no está disponible (estado '{}')",
                vessel_status
            )));
        }

        ConflictChecker::ensure_vessel_free(
            &mut tx,
            params.vessel_id,
            params.tour_date,
            params.start_time,
            params.end_time,
            None,
        )
        .await?;

        if let Some(driver_id) = params.driver_id {
            if !CatalogRepository::person_has_role(&mut tx, driver_id, &["driver"]).await? {
                return Err(AppError::NotFound("Chofer no encontrado".to_string()));
            }
            ConflictChecker::ensure_driver_free(
                &mut tx,
                driver_id,
                params.tour_date,
                params.start_time,
                params.end_time,
                None,
            )
            .await?;
        }

        let instance = InstanceRepository::insert_manual(
            &mut tx,
            params.template_id,
            params.tour_date,
            params.start_time,
            params.end_time,
            params.vessel_id,
            params.driver_id,
            max_capacity,
        )
        .await?;

        tx.commit().await?;

        info!(instance_id = %instance.id, date = %instance.tour_date, "instancia creada manualmente");

        Ok(instance)
    }

    /// Edición de fecha/horario/embarcación/chofer, repitiendo la
    /// verificación de choques con la propia instancia excluida
    pub async fn update_instance(
        &self,
        id: Uuid,
        params: UpdateInstanceParams,
    ) -> Result<TourInstance, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = InstanceRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if current.status != TourStatus::Programado {
            return Err(AppError::InvalidTransition(format!(
                "Solo una instancia PROGRAMADO puede editarse (estado actual: {})",
                current.status.as_str()
            )));
        }

        let tour_date = params.tour_date.unwrap_or(current.tour_date);
        let start_time = params.start_time.unwrap_or(current.start_time);
        let end_time = params.end_time.unwrap_or(current.end_time);
        let vessel_id = params.vessel_id.unwrap_or(current.vessel_id);
        let driver_id = params.driver_id.or(current.driver_id);

        validate_time_window(start_time, end_time)?;

        if let Some(new_vessel) = params.vessel_id {
            let vessel_status = CatalogRepository::vessel_status(&mut tx, new_vessel)
                .await?
                .ok_or_else(|| AppError::NotFound("Embarcación no encontrada".to_string()))?;
            if vessel_status != "active" {
                return Err(AppError::Conflict(format!(
                    "La embarcación no está disponible (estado '{}')",
                    vessel_status
                )));
            }
        }

        if let Some(new_driver) = params.driver_id {
            if !CatalogRepository::person_has_role(&mut tx, new_driver, &["driver"]).await? {
                return Err(AppError::NotFound("Chofer no encontrado".to_string()));
            }
        }

        ConflictChecker::ensure_vessel_free(
            &mut tx,
            vessel_id,
            tour_date,
            start_time,
            end_time,
            Some(id),
        )
        .await?;

        if let Some(driver_id) = driver_id {
            ConflictChecker::ensure_driver_free(
                &mut tx,
                driver_id,
                tour_date,
                start_time,
                end_time,
                Some(id),
            )
            .await?;
        }

        let updated = InstanceRepository::update_fields_tx(
            &mut tx,
            id,
            params.tour_date,
            params.start_time,
            params.end_time,
            params.vessel_id,
            params.driver_id,
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Transición de estado de una instancia (p.ej. PROGRAMADO → EN_CURSO)
    pub async fn update_status(&self, id: Uuid, status: TourStatus) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = InstanceRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if !current.status.can_transition_to(status) {
            return Err(AppError::InvalidTransition(format!(
                "Transición no permitida: {} → {}",
                current.status.as_str(),
                status.as_str()
            )));
        }

        InstanceRepository::set_status_tx(&mut tx, id, status).await?;
        tx.commit().await?;

        info!(instance_id = %id, status = status.as_str(), "estado de instancia actualizado");

        Ok(())
    }

    /// Asigna un chofer verificando su rol, su horario propio y los choques
    pub async fn assign_driver(&self, instance_id: Uuid, driver_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let instance = InstanceRepository::find_for_update(&mut tx, instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if instance.status != TourStatus::Programado {
            return Err(AppError::InvalidTransition(format!(
                "Solo una instancia PROGRAMADO admite asignación de chofer (estado actual: {})",
                instance.status.as_str()
            )));
        }

        if !CatalogRepository::person_has_role(&mut tx, driver_id, &["driver"]).await? {
            return Err(AppError::NotFound("Chofer no encontrado".to_string()));
        }

        ConflictChecker::ensure_driver_free(
            &mut tx,
            driver_id,
            instance.tour_date,
            instance.start_time,
            instance.end_time,
            Some(instance_id),
        )
        .await?;

        InstanceRepository::set_driver_tx(&mut tx, instance_id, driver_id).await?;
        tx.commit().await?;

        info!(instance_id = %instance_id, driver_id = %driver_id, "chofer asignado");

        Ok(())
    }

    /// Borrado lógico, permitido solo cuando ninguna reserva la referencia
    pub async fn delete_instance(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        InstanceRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if InstanceRepository::has_reservations_tx(&mut tx, id).await? {
            return Err(AppError::Conflict(
                "La instancia tiene reservas asociadas y no puede eliminarse".to_string(),
            ));
        }

        InstanceRepository::soft_delete_tx(&mut tx, id).await?;
        tx.commit().await?;

        Ok(())
    }

    /// ¿La instancia admite una reserva de `passengers` pasajeros?
    pub async fn check_availability(
        &self,
        instance_id: Uuid,
        passengers: i32,
    ) -> Result<bool, AppError> {
        validate_positive("pasajeros", passengers)?;

        let repo = InstanceRepository::new(self.pool.clone());
        let instance = repo
            .find_by_id(instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        Ok(instance.is_bookable() && passengers <= instance.available_seats)
    }
}
