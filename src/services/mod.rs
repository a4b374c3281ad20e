//! Servicios de negocio
//!
//! Cada servicio orquesta una operación completa: abre la transacción,
//! valida referencias de catálogo, dispara el verificador de choques y el
//! ledger de cupos, y recién entonces escribe.

pub mod capacity_service;
pub mod conflict_service;
pub mod generation_service;
pub mod instance_service;
pub mod reservation_service;
pub mod template_service;
