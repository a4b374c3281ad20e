//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, NaiveTime};

use crate::utils::errors::AppError;

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "Fecha inválida '{}', se espera formato YYYY-MM-DD",
            value
        ))
    })
}

/// Validar y convertir string a hora del día
///
/// Acepta HH:MM:SS y también HH:MM.
pub fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            AppError::BadRequest(format!(
                "Hora inválida '{}', se espera formato HH:MM:SS",
                value
            ))
        })
}

/// Validar que una ventana horaria sea coherente (fin posterior al inicio)
pub fn validate_time_window(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::BadRequest(format!(
            "La hora de fin ({}) debe ser posterior a la hora de inicio ({})",
            end, start
        )));
    }
    Ok(())
}

/// Validar que un rango de fechas sea coherente (hasta >= desde)
pub fn validate_date_range(from: NaiveDate, until: NaiveDate) -> Result<(), AppError> {
    if until < from {
        return Err(AppError::BadRequest(format!(
            "La fecha de fin de vigencia ({}) es anterior a la fecha de inicio ({})",
            until, from
        )));
    }
    Ok(())
}

/// Validar que una cantidad sea estrictamente positiva
pub fn validate_positive(field: &str, value: i32) -> Result<(), AppError> {
    if value <= num_traits::Zero::zero() {
        return Err(AppError::BadRequest(format!(
            "El campo '{}' debe ser mayor que cero (recibido: {})",
            field, value
        )));
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!(
            "El campo '{}' es requerido",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-01-15").is_ok());
        assert!(parse_date("2024/01/15").is_err());
        assert!(parse_date("15-01-2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert!(parse_time("09:30:00").is_ok());
        assert!(parse_time("09:30").is_ok());
        assert!(parse_time("9h30").is_err());
        assert!(parse_time("25:00:00").is_err());
    }

    #[test]
    fn test_validate_time_window() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
        assert!(validate_time_window(start, end).is_ok());
        assert!(validate_time_window(end, start).is_err());
        assert!(validate_time_window(start, start).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert!(validate_date_range(from, until).is_ok());
        assert!(validate_date_range(from, from).is_ok());
        assert!(validate_date_range(until, from).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("cupo", 5).is_ok());
        assert!(validate_positive("cupo", 0).is_err());
        assert!(validate_positive("cupo", -3).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("notas", "hola").is_ok());
        assert!(validate_not_empty("notas", "   ").is_err());
    }
}
