//! Controladores MVC
//!
//! Capa delgada entre las rutas y los servicios: valida y convierte los
//! DTOs de entrada, delega en el servicio y arma la respuesta.

pub mod instance_controller;
pub mod reservation_controller;
pub mod schedule_controller;
pub mod template_controller;
