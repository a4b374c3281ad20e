//! Generador de instancias
//!
//! Expande un tour recurrente en una instancia reservable por cada fecha de
//! su rango de vigencia cuyo día de semana esté marcado en el horario. Toda
//! la expansión corre en una sola transacción: si la inserción de una fecha
//! falla, no queda ninguna instancia parcial.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::schedule::ScheduleDefinition;
use crate::models::template::TourStatus;
use crate::repositories::instance_repository::InstanceRepository;
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::repositories::template_repository::TemplateRepository;
use crate::utils::errors::AppError;

/// Fechas del rango [from, until] (ambos inclusive) cuyo día de semana está
/// marcado en el horario
pub fn expand_dates(
    from: NaiveDate,
    until: NaiveDate,
    schedule: &ScheduleDefinition,
) -> Vec<NaiveDate> {
    from.iter_days()
        .take_while(|d| *d <= until)
        .filter(|d| schedule.allows_date(*d))
        .collect()
}

pub struct GenerationService {
    pool: PgPool,
}

impl GenerationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Genera las instancias de un tour recurrente y devuelve cuántas creó.
    ///
    /// Falla (sin crear nada) cuando ningún día del rango coincide con el
    /// horario. La generación no pasa por el verificador de choques: las
    /// instancias de una misma plantilla comparten embarcación y chofer y se
    /// particionan por fecha.
    pub async fn generate_instances(&self, template_id: Uuid) -> Result<u32, AppError> {
        let mut tx = self.pool.begin().await?;

        let template = TemplateRepository::find_by_id_tx(&mut tx, template_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tour recurrente no encontrado".to_string()))?;

        if template.status != TourStatus::Programado {
            return Err(AppError::InvalidTransition(format!(
                "No se pueden generar instancias de un tour {}",
                template.status.as_str()
            )));
        }

        let schedule = ScheduleRepository::find_by_id_tx(&mut tx, template.schedule_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Horario del tour no encontrado".to_string()))?;

        let dates = expand_dates(template.valid_from, template.valid_until, &schedule);

        if dates.is_empty() {
            return Err(AppError::Conflict(format!(
                "Ningún día entre {} y {} coincide con los días marcados en el horario",
                template.valid_from, template.valid_until
            )));
        }

        let mut created = 0u32;
        for date in dates {
            InstanceRepository::insert_generated(&mut tx, &template, &schedule, date).await?;
            created += 1;
        }

        tx.commit().await?;

        info!(
            template_id = %template_id,
            created,
            "instancias generadas para el tour recurrente"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, Utc};

    fn schedule(days: [bool; 7]) -> ScheduleDefinition {
        ScheduleDefinition {
            id: Uuid::new_v4(),
            category_id: Some(Uuid::new_v4()),
            driver_id: None,
            site_id: Uuid::new_v4(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            monday: days[0],
            tuesday: days[1],
            wednesday: days[2],
            thursday: days[3],
            friday: days[4],
            saturday: days[5],
            sunday: days[6],
            active_from: None,
            active_until: None,
            created_at: DateTime::<Utc>::MIN_UTC,
            deleted_at: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_expand_week_tuesday_thursday() {
        // semana lunes 2024-06-03 a domingo 2024-06-09, solo martes y jueves
        let s = schedule([false, true, false, true, false, false, false]);
        let dates = expand_dates(d(2024, 6, 3), d(2024, 6, 9), &s);
        assert_eq!(dates, vec![d(2024, 6, 4), d(2024, 6, 6)]);
    }

    #[test]
    fn test_expand_inclusive_bounds() {
        // el rango es inclusivo en ambos extremos
        let s = schedule([true; 7]);
        let dates = expand_dates(d(2024, 6, 3), d(2024, 6, 3), &s);
        assert_eq!(dates, vec![d(2024, 6, 3)]);

        let dates = expand_dates(d(2024, 6, 3), d(2024, 6, 9), &s);
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn test_expand_no_matching_weekday() {
        // rango lunes a viernes, horario solo sábado
        let s = schedule([false, false, false, false, false, true, false]);
        let dates = expand_dates(d(2024, 6, 3), d(2024, 6, 7), &s);
        assert!(dates.is_empty());
    }

    #[test]
    fn test_expand_multiple_weeks() {
        // cuatro semanas completas, solo domingos
        let s = schedule([false, false, false, false, false, false, true]);
        let dates = expand_dates(d(2024, 6, 3), d(2024, 6, 30), &s);
        assert_eq!(
            dates,
            vec![d(2024, 6, 9), d(2024, 6, 16), d(2024, 6, 23), d(2024, 6, 30)]
        );
    }

    #[test]
    fn test_expand_empty_range() {
        let s = schedule([true; 7]);
        let dates = expand_dates(d(2024, 6, 9), d(2024, 6, 3), &s);
        assert!(dates.is_empty());
    }
}
