//! Rutas de la API

pub mod instance_routes;
pub mod reservation_routes;
pub mod schedule_routes;
pub mod template_routes;
