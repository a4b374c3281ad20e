//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula el SQL de una entidad. Las operaciones que
//! participan de una transacción reciben `&mut PgConnection` del servicio
//! que la abrió; las lecturas sueltas usan el pool directamente.

pub mod catalog_repository;
pub mod instance_repository;
pub mod reservation_repository;
pub mod schedule_repository;
pub mod template_repository;
