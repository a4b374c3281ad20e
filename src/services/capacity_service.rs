//! Ledger de cupos
//!
//! El cupo autoritativo es `available_seats` de cada instancia de tour; el
//! cupo de la plantilla es solo la semilla de generación. Las tres
//! operaciones (consumir, restituir, transferir) reciben la conexión de la
//! transacción abierta por la mutación de reserva que las dispara: un fallo
//! a mitad de camino revierte la reserva y el cupo juntos.

use sqlx::PgConnection;
use tracing::warn;
use uuid::Uuid;

use crate::repositories::instance_repository::InstanceRepository;
use crate::utils::errors::AppError;

pub struct CapacityLedger;

impl CapacityLedger {
    /// Descuenta `seats` lugares de la instancia.
    ///
    /// Relee el cupo vigente dentro de la transacción (con bloqueo de fila)
    /// inmediatamente antes de escribir; si no alcanza, la operación falla
    /// sin tocar nada.
    pub async fn consume(
        conn: &mut PgConnection,
        instance_id: Uuid,
        seats: i32,
    ) -> Result<(), AppError> {
        if seats <= 0 {
            return Ok(());
        }

        let instance = InstanceRepository::find_for_update(&mut *conn, instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        if seats > instance.available_seats {
            warn!(
                instance_id = %instance_id,
                requested = seats,
                available = instance.available_seats,
                "cupo insuficiente"
            );
            return Err(AppError::CapacityExceeded(format!(
                "Se solicitaron {} lugares pero la instancia solo tiene {} disponibles",
                seats, instance.available_seats
            )));
        }

        InstanceRepository::update_available_seats_tx(
            conn,
            instance_id,
            instance.available_seats - seats,
        )
        .await
    }

    /// Devuelve `seats` lugares a la instancia, sin exceder nunca su cupo
    /// máximo original (copiado de la plantilla al generarla).
    pub async fn restore(
        conn: &mut PgConnection,
        instance_id: Uuid,
        seats: i32,
    ) -> Result<(), AppError> {
        if seats <= 0 {
            return Ok(());
        }

        let instance = InstanceRepository::find_for_update(&mut *conn, instance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instancia de tour no encontrada".to_string()))?;

        let new_value = (instance.available_seats + seats).min(instance.max_capacity);

        InstanceRepository::update_available_seats_tx(conn, instance_id, new_value).await
    }

    /// Mueve una reserva de una instancia a otra: restituye el total viejo en
    /// la instancia origen y consume el total nuevo en la destino. Si el
    /// consumo falla, el error se propaga y la transacción del llamador
    /// revierte también la restitución.
    pub async fn transfer(
        conn: &mut PgConnection,
        old_instance_id: Uuid,
        new_instance_id: Uuid,
        old_total: i32,
        new_total: i32,
    ) -> Result<(), AppError> {
        Self::restore(&mut *conn, old_instance_id, old_total).await?;
        Self::consume(&mut *conn, new_instance_id, new_total).await?;
        Ok(())
    }
}
