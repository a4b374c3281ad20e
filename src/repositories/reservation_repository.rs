//! Repositorio de reservas

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::reservation::{
    Reservation, ReservationLineItem, ReservationPackageItem, ReservationStatus,
};
use crate::utils::errors::AppError;

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_tx(
        conn: &mut PgConnection,
        client_id: Uuid,
        instance_id: Uuid,
        channel_id: Uuid,
        site_id: Uuid,
        seller_id: Option<Uuid>,
        total_amount: Decimal,
        notes: Option<String>,
        total_passengers: i32,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (
                id, client_id, instance_id, channel_id, site_id, seller_id,
                total_amount, notes, status, total_passengers, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'RESERVADO', $9, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(client_id)
        .bind(instance_id)
        .bind(channel_id)
        .bind(site_id)
        .bind(seller_id)
        .bind(total_amount)
        .bind(notes)
        .bind(total_passengers)
        .fetch_one(conn)
        .await?;

        Ok(reservation)
    }

    pub async fn insert_line_item_tx(
        conn: &mut PgConnection,
        reservation_id: Uuid,
        ticket_type_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO reservation_items (id, reservation_id, ticket_type_id, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(reservation_id)
        .bind(ticket_type_id)
        .bind(quantity)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn insert_package_item_tx(
        conn: &mut PgConnection,
        reservation_id: Uuid,
        package_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO reservation_package_items (id, reservation_id, package_id, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(reservation_id)
        .bind(package_id)
        .bind(quantity)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Relee la reserva dentro de la transacción y la bloquea hasta el commit
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(reservation)
    }

    pub async fn line_items(&self, reservation_id: Uuid) -> Result<Vec<ReservationLineItem>, AppError> {
        let items = sqlx::query_as::<_, ReservationLineItem>(
            "SELECT id, reservation_id, ticket_type_id, quantity FROM reservation_items WHERE reservation_id = $1 AND deleted_at IS NULL ORDER BY created_at",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn package_items(
        &self,
        reservation_id: Uuid,
    ) -> Result<Vec<ReservationPackageItem>, AppError> {
        let items = sqlx::query_as::<_, ReservationPackageItem>(
            "SELECT id, reservation_id, package_id, quantity FROM reservation_package_items WHERE reservation_id = $1 AND deleted_at IS NULL ORDER BY created_at",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: Uuid,
        instance_id: Uuid,
        channel_id: Uuid,
        seller_id: Option<Uuid>,
        total_amount: Decimal,
        notes: Option<String>,
        status: ReservationStatus,
        total_passengers: i32,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations SET
                instance_id = $2,
                channel_id = $3,
                seller_id = $4,
                total_amount = $5,
                notes = $6,
                status = $7,
                total_passengers = $8,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(instance_id)
        .bind(channel_id)
        .bind(seller_id)
        .bind(total_amount)
        .bind(notes)
        .bind(status)
        .bind(total_passengers)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reservation)
    }

    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reserva no encontrada".to_string()));
        }

        Ok(())
    }

    /// Retira (borrado lógico) todos los renglones de la reserva, previo a
    /// reemplazarlos o a borrar la reserva completa
    pub async fn retire_items_tx(
        conn: &mut PgConnection,
        reservation_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE reservation_items SET deleted_at = NOW() WHERE reservation_id = $1 AND deleted_at IS NULL",
        )
        .bind(reservation_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "UPDATE reservation_package_items SET deleted_at = NOW() WHERE reservation_id = $1 AND deleted_at IS NULL",
        )
        .bind(reservation_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn has_payments_tx(
        conn: &mut PgConnection,
        reservation_id: Uuid,
    ) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM payments WHERE reservation_id = $1 AND deleted_at IS NULL)",
        )
        .bind(reservation_id)
        .fetch_one(conn)
        .await?;

        Ok(row.0)
    }

    pub async fn has_receipts_tx(
        conn: &mut PgConnection,
        reservation_id: Uuid,
    ) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM receipts WHERE reservation_id = $1 AND deleted_at IS NULL)",
        )
        .bind(reservation_id)
        .fetch_one(conn)
        .await?;

        Ok(row.0)
    }

    pub async fn soft_delete_tx(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Reserva no encontrada".to_string()));
        }

        Ok(())
    }

    pub async fn list_by_instance(&self, instance_id: Uuid) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE instance_id = $1 AND deleted_at IS NULL ORDER BY created_at DESC",
        )
        .bind(instance_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}
