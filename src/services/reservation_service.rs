//! Servicio de reservas
//!
//! Gobierna el ciclo de vida RESERVADO → CONFIRMADA → CANCELADA (con
//! reactivación desde CANCELADA) y dispara el ledger de cupos en cada
//! transición. Toda mutación corre dentro de una sola transacción: si la
//! validación o el cupo fallan, no se persiste nada.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::instance::TourInstance;
use crate::models::reservation::{
    Reservation, ReservationLineItem, ReservationPackageItem, ReservationStatus,
};
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::instance_repository::InstanceRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::services::capacity_service::CapacityLedger;
use crate::utils::errors::AppError;

pub struct TicketLineInput {
    pub ticket_type_id: Uuid,
    pub quantity: i32,
}

pub struct PackageLineInput {
    pub package_id: Uuid,
    pub quantity: i32,
}

pub struct CreateReservationParams {
    pub client_id: Uuid,
    pub instance_id: Uuid,
    pub channel_id: Uuid,
    pub site_id: Uuid,
    pub seller_id: Option<Uuid>,
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub tickets: Vec<TicketLineInput>,
    pub packages: Vec<PackageLineInput>,
}

#[derive(Default)]
pub struct UpdateReservationParams {
    pub instance_id: Option<Uuid>,
    pub channel_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub total_amount: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<ReservationStatus>,
    pub tickets: Option<Vec<TicketLineInput>>,
    pub packages: Option<Vec<PackageLineInput>>,
}

/// Total de pasajeros de una reserva: cada boleto individual cuenta su
/// cantidad y cada paquete multiplica su cantidad por los pasajeros fijos
/// que representa.
pub fn total_passengers(ticket_quantities: &[i32], packages: &[(i32, i32)]) -> i32 {
    let tickets: i32 = ticket_quantities.iter().sum();
    let packaged: i32 = packages.iter().map(|(qty, pax)| qty * pax).sum();
    tickets + packaged
}

/// Renglones ya validados contra el catálogo, con el paquete resuelto a su
/// cantidad de pasajeros
struct ResolvedItems {
    total: i32,
    tickets: Vec<(Uuid, i32)>,
    packages: Vec<(Uuid, i32)>,
}

pub struct ReservationService {
    pool: PgPool,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn resolve_items(
        conn: &mut PgConnection,
        tickets: &[TicketLineInput],
        packages: &[PackageLineInput],
    ) -> Result<ResolvedItems, AppError> {
        let mut ticket_rows = Vec::with_capacity(tickets.len());
        let mut ticket_quantities = Vec::with_capacity(tickets.len());
        for line in tickets {
            if line.quantity <= 0 {
                return Err(AppError::BadRequest(
                    "La cantidad de boletos debe ser mayor que cero".to_string(),
                ));
            }
            if !CatalogRepository::ticket_type_exists(&mut *conn, line.ticket_type_id).await? {
                return Err(AppError::NotFound(format!(
                    "Tipo de boleto '{}' no encontrado",
                    line.ticket_type_id
                )));
            }
            ticket_rows.push((line.ticket_type_id, line.quantity));
            ticket_quantities.push(line.quantity);
        }

        let mut package_rows = Vec::with_capacity(packages.len());
        let mut package_pax = Vec::with_capacity(packages.len());
        for line in packages {
            if line.quantity <= 0 {
                return Err(AppError::BadRequest(
                    "La cantidad de paquetes debe ser mayor que cero".to_string(),
                ));
            }
            let pax = CatalogRepository::package_passengers(&mut *conn, line.package_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Paquete '{}' no encontrado", line.package_id))
                })?;
            package_rows.push((line.package_id, line.quantity));
            package_pax.push((line.quantity, pax));
        }

        let total = total_passengers(&ticket_quantities, &package_pax);
        if total <= 0 {
            return Err(AppError::BadRequest(
                "La reserva debe incluir al menos un pasajero".to_string(),
            ));
        }

        Ok(ResolvedItems {
            total,
            tickets: ticket_rows,
            packages: package_rows,
        })
    }

    /// La instancia existe y sigue aceptando reservas (PROGRAMADO)
    async fn bookable_instance(
        conn: &mut PgConnection,
        instance_id: Uuid,
    ) -> Result<TourInstance, AppError> {
        let instance = InstanceRepository::find_for_update(conn, instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if !instance.is_bookable() {
            return Err(AppError::BadRequest(format!(
                "La instancia de tour está {} y no admite reservas",
                instance.status.as_str()
            )));
        }

        Ok(instance)
    }

    async fn validate_seller(
        conn: &mut PgConnection,
        seller_id: Uuid,
    ) -> Result<(), AppError> {
        if !CatalogRepository::person_has_role(conn, seller_id, &["seller", "admin"]).await? {
            return Err(AppError::Forbidden(
                "El vendedor indicado no existe o no tiene rol de vendedor o administrador"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub async fn create(&self, params: CreateReservationParams) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;

        if !CatalogRepository::client_exists(&mut tx, params.client_id).await? {
            return Err(AppError::NotFound("Cliente no encontrado".to_string()));
        }

        let instance = Self::bookable_instance(&mut tx, params.instance_id).await?;

        if !CatalogRepository::channel_exists(&mut tx, params.channel_id).await? {
            return Err(AppError::NotFound("Canal de venta no encontrado".to_string()));
        }
        if !CatalogRepository::site_exists(&mut tx, params.site_id).await? {
            return Err(AppError::NotFound("Sede no encontrada".to_string()));
        }
        if let Some(seller_id) = params.seller_id {
            Self::validate_seller(&mut tx, seller_id).await?;
        }

        let resolved = Self::resolve_items(&mut tx, &params.tickets, &params.packages).await?;

        CapacityLedger::consume(&mut tx, instance.id, resolved.total).await?;

        let reservation = ReservationRepository::insert_tx(
            &mut tx,
            params.client_id,
            params.instance_id,
            params.channel_id,
            params.site_id,
            params.seller_id,
            params.total_amount,
            params.notes,
            resolved.total,
        )
        .await?;

        for (ticket_type_id, quantity) in &resolved.tickets {
            ReservationRepository::insert_line_item_tx(
                &mut tx,
                reservation.id,
                *ticket_type_id,
                *quantity,
            )
            .await?;
        }
        for (package_id, quantity) in &resolved.packages {
            ReservationRepository::insert_package_item_tx(
                &mut tx,
                reservation.id,
                *package_id,
                *quantity,
            )
            .await?;
        }

        tx.commit().await?;

        info!(
            reservation_id = %reservation.id,
            instance_id = %reservation.instance_id,
            passengers = resolved.total,
            "reserva creada"
        );

        Ok(reservation)
    }

    /// Actualiza una reserva activa.
    ///
    /// Si cambia la instancia, el cupo se mueve con una transferencia
    /// (restituir en la vieja, consumir en la nueva) dentro de la misma
    /// transacción. Si solo cambian los renglones, el ledger se ajusta por
    /// la diferencia de pasajeros, no por el total completo.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateReservationParams,
    ) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = ReservationRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if current.status == ReservationStatus::Cancelada {
            return Err(AppError::InvalidTransition(
                "Una reserva CANCELADA solo puede reactivarse".to_string(),
            ));
        }

        let new_status = match params.status {
            None => current.status,
            Some(status) if status == current.status => status,
            Some(ReservationStatus::Cancelada) => {
                return Err(AppError::InvalidTransition(
                    "Para cancelar la reserva use la operación de cancelación".to_string(),
                ));
            }
            Some(status) => {
                if !current.status.can_transition_to(status) {
                    return Err(AppError::InvalidTransition(format!(
                        "Transición no permitida: {} → {}",
                        current.status.as_str(),
                        status.as_str()
                    )));
                }
                status
            }
        };

        if let Some(channel_id) = params.channel_id {
            if !CatalogRepository::channel_exists(&mut tx, channel_id).await? {
                return Err(AppError::NotFound("Canal de venta no encontrado".to_string()));
            }
        }
        if let Some(seller_id) = params.seller_id {
            Self::validate_seller(&mut tx, seller_id).await?;
        }

        let items_changed = params.tickets.is_some() || params.packages.is_some();
        let resolved = if items_changed {
            let tickets = params.tickets.unwrap_or_default();
            let packages = params.packages.unwrap_or_default();
            Some(Self::resolve_items(&mut tx, &tickets, &packages).await?)
        } else {
            None
        };
        let new_total = resolved
            .as_ref()
            .map(|r| r.total)
            .unwrap_or(current.total_passengers);

        let new_instance_id = params.instance_id.unwrap_or(current.instance_id);

        if new_instance_id != current.instance_id {
            Self::bookable_instance(&mut tx, new_instance_id).await?;
            CapacityLedger::transfer(
                &mut tx,
                current.instance_id,
                new_instance_id,
                current.total_passengers,
                new_total,
            )
            .await?;
        } else {
            let delta = new_total - current.total_passengers;
            if delta > 0 {
                CapacityLedger::consume(&mut tx, current.instance_id, delta).await?;
            } else if delta < 0 {
                CapacityLedger::restore(&mut tx, current.instance_id, -delta).await?;
            }
        }

        if let Some(resolved) = &resolved {
            ReservationRepository::retire_items_tx(&mut tx, id).await?;
            for (ticket_type_id, quantity) in &resolved.tickets {
                ReservationRepository::insert_line_item_tx(&mut tx, id, *ticket_type_id, *quantity)
                    .await?;
            }
            for (package_id, quantity) in &resolved.packages {
                ReservationRepository::insert_package_item_tx(&mut tx, id, *package_id, *quantity)
                    .await?;
            }
        }

        let updated = ReservationRepository::update_tx(
            &mut tx,
            id,
            new_instance_id,
            params.channel_id.unwrap_or(current.channel_id),
            params.seller_id.or(current.seller_id),
            params.total_amount.unwrap_or(current.total_amount),
            params.notes.or(current.notes),
            new_status,
            new_total,
        )
        .await?;

        tx.commit().await?;

        info!(reservation_id = %id, passengers = new_total, "reserva actualizada");

        Ok(updated)
    }

    /// RESERVADO/CONFIRMADA → CANCELADA, restituyendo el total completo
    pub async fn cancel(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = ReservationRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if !current.status.can_transition_to(ReservationStatus::Cancelada) {
            return Err(AppError::InvalidTransition(format!(
                "No se puede cancelar una reserva {}",
                current.status.as_str()
            )));
        }

        CapacityLedger::restore(&mut tx, current.instance_id, current.total_passengers).await?;
        ReservationRepository::set_status_tx(&mut tx, id, ReservationStatus::Cancelada).await?;

        tx.commit().await?;

        info!(
            reservation_id = %id,
            passengers = current.total_passengers,
            "reserva cancelada, cupo restituido"
        );

        Ok(())
    }

    /// CANCELADA → RESERVADO/CONFIRMADA, re-validando el cupo de la instancia
    pub async fn reactivate(&self, id: Uuid, target: ReservationStatus) -> Result<(), AppError> {
        if target == ReservationStatus::Cancelada {
            return Err(AppError::InvalidTransition(
                "El estado destino de una reactivación debe ser RESERVADO o CONFIRMADA".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let current = ReservationRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if current.status != ReservationStatus::Cancelada {
            return Err(AppError::InvalidTransition(format!(
                "Solo una reserva CANCELADA puede reactivarse (estado actual: {})",
                current.status.as_str()
            )));
        }

        Self::bookable_instance(&mut tx, current.instance_id).await?;
        CapacityLedger::consume(&mut tx, current.instance_id, current.total_passengers).await?;
        ReservationRepository::set_status_tx(&mut tx, id, target).await?;

        tx.commit().await?;

        info!(
            reservation_id = %id,
            status = target.as_str(),
            "reserva reactivada"
        );

        Ok(())
    }

    /// Borrado lógico, bloqueado mientras existan pagos o recibos asociados.
    /// Si la reserva seguía activa, restituye su cupo igual que la
    /// cancelación antes de retirarla.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = ReservationRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if ReservationRepository::has_payments_tx(&mut tx, id).await? {
            return Err(AppError::Conflict(
                "La reserva tiene pagos asociados y no puede eliminarse".to_string(),
            ));
        }
        if ReservationRepository::has_receipts_tx(&mut tx, id).await? {
            return Err(AppError::Conflict(
                "La reserva tiene recibos asociados y no puede eliminarse".to_string(),
            ));
        }

        if current.status.is_active() {
            CapacityLedger::restore(&mut tx, current.instance_id, current.total_passengers).await?;
        }

        ReservationRepository::retire_items_tx(&mut tx, id).await?;
        ReservationRepository::soft_delete_tx(&mut tx, id).await?;

        tx.commit().await?;

        info!(reservation_id = %id, "reserva eliminada");

        Ok(())
    }

    pub async fn get_with_items(
        &self,
        id: Uuid,
    ) -> Result<(Reservation, Vec<ReservationLineItem>, Vec<ReservationPackageItem>), AppError>
    {
        let repo = ReservationRepository::new(self.pool.clone());
        let reservation = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;
        let items = repo.line_items(id).await?;
        let packages = repo.package_items(id).await?;
        Ok((reservation, items, packages))
    }

    pub async fn list_by_instance(&self, instance_id: Uuid) -> Result<Vec<Reservation>, AppError> {
        let repo = ReservationRepository::new(self.pool.clone());
        repo.list_by_instance(instance_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_passengers_tickets_only() {
        assert_eq!(total_passengers(&[2, 3], &[]), 5);
        assert_eq!(total_passengers(&[1], &[]), 1);
        assert_eq!(total_passengers(&[], &[]), 0);
    }

    #[test]
    fn test_total_passengers_packages_only() {
        // 2 paquetes de 4 pasajeros cada uno
        assert_eq!(total_passengers(&[], &[(2, 4)]), 8);
        assert_eq!(total_passengers(&[], &[(1, 2), (3, 1)]), 5);
    }

    #[test]
    fn test_total_passengers_mixed() {
        // 3 boletos sueltos + 1 paquete familiar de 4
        assert_eq!(total_passengers(&[3], &[(1, 4)]), 7);
    }
}
