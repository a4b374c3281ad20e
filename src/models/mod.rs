//! Modelos de dominio
//!
//! Structs que mapean al schema PostgreSQL (una tabla por entidad, borrado
//! lógico con deleted_at) y los enums de estado del ciclo de vida.

pub mod instance;
pub mod reservation;
pub mod schedule;
pub mod template;
