//! Repositorio de tours recurrentes

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::template::{RecurringTemplate, TourStatus};
use crate::utils::errors::AppError;

pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_tx(
        conn: &mut PgConnection,
        category_id: Uuid,
        vessel_id: Uuid,
        schedule_id: Uuid,
        site_id: Uuid,
        base_date: NaiveDate,
        valid_from: NaiveDate,
        valid_until: NaiveDate,
        max_capacity: i32,
        driver_id: Option<Uuid>,
    ) -> Result<RecurringTemplate, AppError> {
        // el cupo disponible arranca igual al máximo; tras la generación la
        // cifra autoritativa vive en cada instancia
        let template = sqlx::query_as::<_, RecurringTemplate>(
            r#"
            INSERT INTO tour_templates (
                id, category_id, vessel_id, schedule_id, site_id, base_date,
                valid_from, valid_until, max_capacity, available_capacity,
                status, driver_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9, 'PROGRAMADO', $10, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category_id)
        .bind(vessel_id)
        .bind(schedule_id)
        .bind(site_id)
        .bind(base_date)
        .bind(valid_from)
        .bind(valid_until)
        .bind(max_capacity)
        .bind(driver_id)
        .fetch_one(conn)
        .await?;

        Ok(template)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RecurringTemplate>, AppError> {
        let template = sqlx::query_as::<_, RecurringTemplate>(
            "SELECT * FROM tour_templates WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    /// Variante transaccional de find_by_id
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<RecurringTemplate>, AppError> {
        let template = sqlx::query_as::<_, RecurringTemplate>(
            "SELECT * FROM tour_templates WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(template)
    }

    pub async fn list_by_site(
        &self,
        site_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecurringTemplate>, AppError> {
        let templates = sqlx::query_as::<_, RecurringTemplate>(
            r#"
            SELECT * FROM tour_templates
            WHERE deleted_at IS NULL
            AND ($1::uuid IS NULL OR site_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(site_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_tx(
        conn: &mut PgConnection,
        id: Uuid,
        vessel_id: Option<Uuid>,
        schedule_id: Option<Uuid>,
        valid_from: Option<NaiveDate>,
        valid_until: Option<NaiveDate>,
        max_capacity: Option<i32>,
        driver_id: Option<Uuid>,
    ) -> Result<RecurringTemplate, AppError> {
        let template = sqlx::query_as::<_, RecurringTemplate>(
            r#"
            UPDATE tour_templates SET
                vessel_id = COALESCE($2, vessel_id),
                schedule_id = COALESCE($3, schedule_id),
                valid_from = COALESCE($4, valid_from),
                valid_until = COALESCE($5, valid_until),
                max_capacity = COALESCE($6, max_capacity),
                available_capacity = COALESCE($6, available_capacity),
                driver_id = COALESCE($7, driver_id),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vessel_id)
        .bind(schedule_id)
        .bind(valid_from)
        .bind(valid_until)
        .bind(max_capacity)
        .bind(driver_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Tour recurrente no encontrado".to_string()))?;

        Ok(template)
    }

    pub async fn set_status_tx(
        conn: &mut PgConnection,
        id: Uuid,
        status: TourStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tour_templates SET status = $2, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Tour recurrente no encontrado".to_string()));
        }

        Ok(())
    }
}
