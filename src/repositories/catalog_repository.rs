//! Consultas de catálogo
//!
//! El catálogo (sitios, clientes, personas, embarcaciones, canales de venta,
//! tipos de boleto, paquetes) se administra fuera de este núcleo. Aquí solo
//! viven las consultas de existencia/rol/estado que las operaciones de
//! agenda y reserva necesitan para validar referencias.
//!
//! Todas las funciones reciben la conexión transaccional del llamador para
//! que la validación participe de la misma transacción que la mutación.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::utils::errors::AppError;

pub struct CatalogRepository;

impl CatalogRepository {
    pub async fn client_exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    pub async fn site_exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    pub async fn category_exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM tour_categories WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    pub async fn channel_exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM sales_channels WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    pub async fn ticket_type_exists(conn: &mut PgConnection, id: Uuid) -> Result<bool, AppError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM ticket_types WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// Pasajeros fijos que representa un paquete, o None si no existe
    pub async fn package_passengers(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<i32>, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT total_passengers FROM packages WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Estado actual de una embarcación, o None si no existe
    pub async fn vessel_status(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT vessel_status FROM vessels WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Verificar que una persona existe con alguno de los roles indicados
    pub async fn person_has_role(
        conn: &mut PgConnection,
        id: Uuid,
        roles: &[&str],
    ) -> Result<bool, AppError> {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE id = $1 AND role = ANY($2) AND deleted_at IS NULL)",
        )
        .bind(id)
        .bind(&roles)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
