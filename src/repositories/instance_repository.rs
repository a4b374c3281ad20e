//! Repositorio de instancias de tour
//!
//! Las mutaciones de cupo y las verificaciones de choque reciben la conexión
//! transaccional del llamador: cada operación de servicio abre una sola
//! transacción y la comparte con todas las lecturas/escrituras que dispara.

use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::instance::{ResourceKind, TourInstance};
use crate::models::schedule::ScheduleDefinition;
use crate::models::template::{RecurringTemplate, TourStatus};
use crate::utils::errors::AppError;

pub struct InstanceRepository {
    pool: PgPool,
}

impl InstanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insertar una instancia producida por el generador.
    ///
    /// Copia la ventana horaria del horario, la embarcación/chofer de la
    /// plantilla y siembra ambos cupos con el máximo de la plantilla.
    pub async fn insert_generated(
        conn: &mut PgConnection,
        template: &RecurringTemplate,
        schedule: &ScheduleDefinition,
        date: NaiveDate,
    ) -> Result<TourInstance, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            r#"
            INSERT INTO tour_instances (
                id, template_id, tour_date, start_time, end_time, vessel_id,
                driver_id, max_capacity, available_seats, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8, 'PROGRAMADO', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(template.id)
        .bind(date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(template.vessel_id)
        .bind(template.driver_id)
        .bind(template.max_capacity)
        .fetch_one(conn)
        .await?;

        Ok(instance)
    }

    /// Insertar una instancia creada manualmente
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_manual(
        conn: &mut PgConnection,
        template_id: Option<Uuid>,
        tour_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        vessel_id: Uuid,
        driver_id: Option<Uuid>,
        max_capacity: i32,
    ) -> Result<TourInstance, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            r#"
            INSERT INTO tour_instances (
                id, template_id, tour_date, start_time, end_time, vessel_id,
                driver_id, max_capacity, available_seats, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8, 'PROGRAMADO', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(template_id)
        .bind(tour_date)
        .bind(start_time)
        .bind(end_time)
        .bind(vessel_id)
        .bind(driver_id)
        .bind(max_capacity)
        .fetch_one(conn)
        .await?;

        Ok(instance)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TourInstance>, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            "SELECT * FROM tour_instances WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(instance)
    }

    /// Variante transaccional de find_by_id
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<TourInstance>, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            "SELECT * FROM tour_instances WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(instance)
    }

    /// Relee la fila dentro de la transacción y la bloquea hasta el commit.
    /// Toda mutación de cupo pasa por aquí antes de escribir.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<TourInstance>, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            "SELECT * FROM tour_instances WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(instance)
    }

    /// ¿El recurso ya está comprometido en otra instancia activa con ventana
    /// superpuesta esa fecha? Semántica de intervalo semiabierto:
    /// [s1,e1) y [s2,e2) chocan si s1 < e2 y s2 < e1.
    pub async fn resource_is_busy(
        conn: &mut PgConnection,
        kind: ResourceKind,
        resource_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_instance: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let column = match kind {
            ResourceKind::Vessel => "vessel_id",
            ResourceKind::Driver => "driver_id",
        };

        let sql = format!(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM tour_instances
                WHERE {column} = $1
                AND tour_date = $2
                AND deleted_at IS NULL
                AND status IN ('PROGRAMADO', 'EN_CURSO')
                AND start_time < $4
                AND $3 < end_time
                AND ($5::uuid IS NULL OR id <> $5)
            )
            "#
        );

        let row: (bool,) = sqlx::query_as(&sql)
            .bind(resource_id)
            .bind(date)
            .bind(start_time)
            .bind(end_time)
            .bind(exclude_instance)
            .fetch_one(conn)
            .await?;

        Ok(row.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_fields_tx(
        conn: &mut PgConnection,
        id: Uuid,
        tour_date: Option<NaiveDate>,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        vessel_id: Option<Uuid>,
        driver_id: Option<Uuid>,
    ) -> Result<TourInstance, AppError> {
        let instance = sqlx::query_as::<_, TourInstance>(
            r#"
            UPDATE tour_instances SET
                tour_date = COALESCE($2, tour_date),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                vessel_id = COALESCE($5, vessel_id),
                driver_id = COALESCE($6, driver_id),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tour_date)
        .bind(start_time)
        .bind(end_time)
        .bind(vessel_id)
        .bind(driver_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        Ok(instance)
    }

    pub async fn set_driver_tx(
        conn: &mut PgConnection,
        id: Uuid,
        driver_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_instances SET driver_id = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(driver_id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Instancia de tour no encontrada".to_string()));
        }

        Ok(())
    }

    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: Uuid,
        status: TourStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_instances SET status = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Instancia de tour no encontrada".to_string()));
        }

        Ok(())
    }

    /// Escribe el cupo disponible releído y recalculado por el ledger
    pub async fn update_available_seats_tx(
        conn: &mut PgConnection,
        id: Uuid,
        available_seats: i32,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_instances SET available_seats = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(available_seats)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Instancia de tour no encontrada".to_string()));
        }

        Ok(())
    }

    /// ¿Alguna reserva no borrada referencia la instancia?
    pub async fn has_reservations_tx(
        conn: &mut PgConnection,
        instance_id: Uuid,
    ) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE instance_id = $1 AND deleted_at IS NULL)",
        )
        .bind(instance_id)
        .fetch_one(conn)
        .await?;

        Ok(row.0)
    }

    /// Borrado lógico; la fila nunca se elimina físicamente
    pub async fn soft_delete_tx(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_instances SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Instancia de tour no encontrada".to_string()));
        }

        Ok(())
    }

    pub async fn list_by_template(&self, template_id: Uuid) -> Result<Vec<TourInstance>, AppError> {
        let instances = sqlx::query_as::<_, TourInstance>(
            "SELECT * FROM tour_instances WHERE template_id = $1 AND deleted_at IS NULL ORDER BY tour_date, start_time",
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<TourInstance>, AppError> {
        let instances = sqlx::query_as::<_, TourInstance>(
            "SELECT * FROM tour_instances WHERE tour_date = $1 AND deleted_at IS NULL ORDER BY start_time",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }
}
