//! Verificador de choques de recursos
//!
//! Impide que una embarcación o un chofer queden comprometidos en dos
//! instancias activas con ventanas superpuestas en la misma fecha. Para los
//! choferes se valida primero su horario semanal propio (día, rango de
//! vigencia y ventana horaria) y recién después el choque contra otras
//! instancias; ambas verificaciones deben pasar.
//!
//! El verificador corre al crear instancias manualmente, al editar
//! embarcación/chofer/fecha/horario y al asignar chofer. Nunca corre durante
//! la generación masiva: las instancias de una misma plantilla comparten
//! recurso y quedan particionadas por fecha.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::instance::ResourceKind;
use crate::repositories::instance_repository::InstanceRepository;
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::utils::errors::AppError;
use crate::utils::weekday::weekday_number;

/// Superposición de ventanas con semántica de intervalo semiabierto:
/// [s1,e1) y [s2,e2) chocan si s1 < e2 y s2 < e1.
pub fn windows_overlap(
    start_a: NaiveTime,
    end_a: NaiveTime,
    start_b: NaiveTime,
    end_b: NaiveTime,
) -> bool {
    start_a < end_b && start_b < end_a
}

pub struct ConflictChecker;

impl ConflictChecker {
    /// Verifica que la embarcación esté libre en la fecha y ventana dadas
    pub async fn ensure_vessel_free(
        conn: &mut PgConnection,
        vessel_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_instance: Option<Uuid>,
    ) -> Result<(), AppError> {
        let busy = InstanceRepository::resource_is_busy(
            conn,
            ResourceKind::Vessel,
            vessel_id,
            date,
            start_time,
            end_time,
            exclude_instance,
        )
        .await?;

        if busy {
            return Err(AppError::Conflict(format!(
                "La embarcación ya está asignada a otro tour el {} con horario superpuesto",
                date
            )));
        }

        Ok(())
    }

    /// Verifica la disponibilidad del chofer: su horario semanal propio y
    /// luego el choque contra otras instancias activas
    pub async fn ensure_driver_free(
        conn: &mut PgConnection,
        driver_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_instance: Option<Uuid>,
    ) -> Result<(), AppError> {
        let schedule = ScheduleRepository::find_by_driver_tx(&mut *conn, driver_id)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("El chofer no tiene horario semanal configurado".to_string())
            })?;

        if !schedule.covers_date(date) {
            return Err(AppError::Conflict(format!(
                "El {} queda fuera del rango de vigencia del horario del chofer",
                date
            )));
        }

        if !schedule.allows_date(date) {
            return Err(AppError::Conflict(format!(
                "El chofer no trabaja el día {} de la semana",
                weekday_number(date)
            )));
        }

        if !schedule.contains_window(start_time, end_time) {
            return Err(AppError::Conflict(format!(
                "La ventana {}-{} queda fuera del horario del chofer ({}-{})",
                start_time, end_time, schedule.start_time, schedule.end_time
            )));
        }

        let busy = InstanceRepository::resource_is_busy(
            conn,
            ResourceKind::Driver,
            driver_id,
            date,
            start_time,
            end_time,
            exclude_instance,
        )
        .await?;

        if busy {
            return Err(AppError::Conflict(format!(
                "El chofer ya está asignado a otro tour el {} con horario superpuesto",
                date
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_overlapping_windows() {
        // [09:00,11:00) contra [10:00,12:00) chocan
        assert!(windows_overlap(t(9, 0), t(11, 0), t(10, 0), t(12, 0)));
        assert!(windows_overlap(t(10, 0), t(12, 0), t(9, 0), t(11, 0)));
        // contención total
        assert!(windows_overlap(t(9, 0), t(13, 0), t(10, 0), t(11, 0)));
        // idénticas
        assert!(windows_overlap(t(9, 0), t(11, 0), t(9, 0), t(11, 0)));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        // [09:00,11:00) contra [11:00,13:00) no chocan (semiabierto)
        assert!(!windows_overlap(t(9, 0), t(11, 0), t(11, 0), t(13, 0)));
        assert!(!windows_overlap(t(11, 0), t(13, 0), t(9, 0), t(11, 0)));
        // disjuntas
        assert!(!windows_overlap(t(9, 0), t(10, 0), t(14, 0), t(16, 0)));
    }
}
