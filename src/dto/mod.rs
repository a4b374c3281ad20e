//! DTOs de la API
//!
//! Requests de entrada (fechas y horas como strings validadas) y responses
//! de salida serializadas.

pub mod common_dto;
pub mod instance_dto;
pub mod reservation_dto;
pub mod schedule_dto;
pub mod template_dto;
