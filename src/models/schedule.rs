//! Modelo de horario semanal
//!
//! Un horario define la disponibilidad semanal (banderas de día Lunes..Domingo)
//! más una ventana horaria de inicio/fin. Existen dos variantes: el horario de
//! una categoría de tour y el horario propio de un chofer (este último con un
//! rango de vigencia opcional).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::weekday::weekday_number;

/// Horario semanal - mapea a la tabla schedules
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScheduleDefinition {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
    pub site_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ScheduleDefinition {
    /// Disponibilidad para un número de día del dominio (Lunes=1 .. Domingo=7)
    pub fn is_available_on(&self, weekday: u8) -> bool {
        match weekday {
            1 => self.monday,
            2 => self.tuesday,
            3 => self.wednesday,
            4 => self.thursday,
            5 => self.friday,
            6 => self.saturday,
            7 => self.sunday,
            _ => false,
        }
    }

    /// Disponibilidad para una fecha concreta según sus banderas de día
    pub fn allows_date(&self, date: NaiveDate) -> bool {
        self.is_available_on(weekday_number(date))
    }

    /// La fecha cae dentro del rango de vigencia (sin límite cuando es NULL)
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.active_from {
            if date < from {
                return false;
            }
        }
        if let Some(until) = self.active_until {
            if date > until {
                return false;
            }
        }
        true
    }

    /// La ventana candidata cabe dentro de la ventana del horario
    pub fn contains_window(&self, start: NaiveTime, end: NaiveTime) -> bool {
        start >= self.start_time && end <= self.end_time
    }

    /// Al menos un día de la semana marcado
    pub fn has_any_day(&self) -> bool {
        self.monday
            || self.tuesday
            || self.wednesday
            || self.thursday
            || self.friday
            || self.saturday
            || self.sunday
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_is_available_on() {
        let s = schedule([true, false, false, false, false, false, true]);
        assert!(s.is_available_on(1));
        assert!(!s.is_available_on(2));
        assert!(s.is_available_on(7));
        assert!(!s.is_available_on(0));
        assert!(!s.is_available_on(8));
    }

    #[test]
    fn test_allows_date() {
        // solo martes y jueves
        let s = schedule([false, true, false, true, false, false, false]);
        // 2024-06-04 fue martes, 2024-06-06 jueves, 2024-06-07 viernes
        assert!(s.allows_date(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()));
        assert!(s.allows_date(NaiveDate::from_ymd_opt(2024, 6, 6).unwrap()));
        assert!(!s.allows_date(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()));
    }

    #[test]
    fn test_covers_date() {
        let mut s = schedule([true; 7]);
        s.active_from = Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        s.active_until = Some(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert!(s.covers_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(s.covers_date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
        assert!(!s.covers_date(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!s.covers_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));

        s.active_until = None;
        assert!(s.covers_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }

    #[test]
    fn test_contains_window() {
        let s = schedule([true; 7]);
        let t = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        assert!(s.contains_window(t(9), t(11)));
        assert!(s.contains_window(t(9), t(10)));
        assert!(!s.contains_window(t(8), t(10)));
        assert!(!s.contains_window(t(10), t(12)));
    }

    #[test]
    fn test_has_any_day() {
        assert!(!schedule([false; 7]).has_any_day());
        assert!(schedule([false, false, false, false, false, false, true]).has_any_day());
    }
}
