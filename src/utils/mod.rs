//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y conversión de calendario.

pub mod errors;
pub mod validation;
pub mod weekday;
