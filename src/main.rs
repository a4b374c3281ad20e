mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚤 Paseos Náuticos - Agenda y Reservas");
    info!("======================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Crear router de la API
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/schedule", routes::schedule_routes::create_schedule_router())
        .nest("/api/template", routes::template_routes::create_template_router())
        .nest("/api/instance", routes::instance_routes::create_instance_router())
        .nest("/api/reservation", routes::reservation_routes::create_reservation_router())
        .layer(cors_middleware())
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("📅 Endpoints - Horarios:");
    info!("   POST /api/schedule - Crear horario semanal");
    info!("   GET  /api/schedule/:id - Obtener horario");
    info!("🛳  Endpoints - Tours recurrentes:");
    info!("   POST /api/template - Crear tour recurrente");
    info!("   GET  /api/template - Listar tours");
    info!("   GET  /api/template/:id - Obtener tour");
    info!("   PUT  /api/template/:id - Actualizar tour");
    info!("   PUT  /api/template/:id/status - Cambiar estado");
    info!("   POST /api/template/:id/generate - Generar instancias");
    info!("📆 Endpoints - Instancias:");
    info!("   POST /api/instance - Crear instancia manual");
    info!("   GET  /api/instance - Listar por plantilla o fecha");
    info!("   GET  /api/instance/:id - Obtener instancia");
    info!("   PUT  /api/instance/:id - Editar instancia");
    info!("   DELETE /api/instance/:id - Eliminar instancia");
    info!("   PUT  /api/instance/:id/status - Cambiar estado");
    info!("   PUT  /api/instance/:id/driver - Asignar chofer");
    info!("   GET  /api/instance/:id/availability - Consultar cupo");
    info!("🎫 Endpoints - Reservas:");
    info!("   POST /api/reservation - Crear reserva");
    info!("   GET  /api/reservation/:id - Obtener reserva con renglones");
    info!("   PUT  /api/reservation/:id - Actualizar reserva");
    info!("   POST /api/reservation/:id/cancel - Cancelar reserva");
    info!("   POST /api/reservation/:id/reactivate - Reactivar reserva");
    info!("   DELETE /api/reservation/:id - Eliminar reserva");
    info!("   GET  /api/reservation/instance/:id - Reservas de una instancia");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡API de agenda y reservas funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
