//! Repositorio de horarios semanales

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::schedule::ScheduleDefinition;
use crate::utils::errors::AppError;

pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        category_id: Option<Uuid>,
        driver_id: Option<Uuid>,
        site_id: Uuid,
        start_time: chrono::NaiveTime,
        end_time: chrono::NaiveTime,
        days: [bool; 7],
        active_from: Option<chrono::NaiveDate>,
        active_until: Option<chrono::NaiveDate>,
    ) -> Result<ScheduleDefinition, AppError> {
        let schedule = sqlx::query_as::<_, ScheduleDefinition>(
            r#"
            INSERT INTO schedules (
                id, category_id, driver_id, site_id, start_time, end_time,
                monday, tuesday, wednesday, thursday, friday, saturday, sunday,
                active_from, active_until, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category_id)
        .bind(driver_id)
        .bind(site_id)
        .bind(start_time)
        .bind(end_time)
        .bind(days[0])
        .bind(days[1])
        .bind(days[2])
        .bind(days[3])
        .bind(days[4])
        .bind(days[5])
        .bind(days[6])
        .bind(active_from)
        .bind(active_until)
        .fetch_one(&self.pool)
        .await?;

        Ok(schedule)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ScheduleDefinition>, AppError> {
        let schedule = sqlx::query_as::<_, ScheduleDefinition>(
            "SELECT * FROM schedules WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    /// Variante transaccional de find_by_id
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<ScheduleDefinition>, AppError> {
        let schedule = sqlx::query_as::<_, ScheduleDefinition>(
            "SELECT * FROM schedules WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(schedule)
    }

    /// Horario semanal propio de un chofer
    pub async fn find_by_driver_tx(
        conn: &mut PgConnection,
        driver_id: Uuid,
    ) -> Result<Option<ScheduleDefinition>, AppError> {
        let schedule = sqlx::query_as::<_, ScheduleDefinition>(
            "SELECT * FROM schedules WHERE driver_id = $1 AND deleted_at IS NULL ORDER BY created_at DESC LIMIT 1",
        )
        .bind(driver_id)
        .fetch_optional(conn)
        .await?;

        Ok(schedule)
    }
}
