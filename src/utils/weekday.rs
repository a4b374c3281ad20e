//! Conversión de día de la semana
//!
//! La numeración del dominio es Lunes=1 .. Domingo=7. La numeración nativa
//! de la plataforma arranca en Domingo=0, así que la conversión vive en un
//! solo lugar en vez de repetirse en cada módulo que compara calendarios.

use chrono::{Datelike, NaiveDate};

/// Número de día de la semana de una fecha, con Lunes=1 .. Domingo=7
pub fn weekday_number(date: NaiveDate) -> u8 {
    normalize_weekday(date.weekday().num_days_from_sunday())
}

/// Remapear la numeración nativa (Domingo=0 .. Sábado=6) al dominio
pub fn normalize_weekday(raw: u32) -> u8 {
    if raw == 0 {
        7
    } else {
        raw as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_weekday() {
        // Domingo nativo (0) pasa a 7
        assert_eq!(normalize_weekday(0), 7);
        assert_eq!(normalize_weekday(1), 1);
        assert_eq!(normalize_weekday(6), 6);
    }

    #[test]
    fn test_weekday_number() {
        // 2024-06-03 fue lunes
        assert_eq!(
            weekday_number(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
            1
        );
        // 2024-06-09 fue domingo
        assert_eq!(
            weekday_number(NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()),
            7
        );
        // 2024-06-06 fue jueves
        assert_eq!(
            weekday_number(NaiveDate::from_ymd_opt(2024, 6, 6).unwrap()),
            4
        );
    }
}
