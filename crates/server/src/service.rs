//! Service info and liveness endpoints.

use api_types::service::{Health, ServiceInfo};
use axum::Json;

const SERVICE_NAME: &str = "autoventas";

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Car sales API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec!["/autos".to_string(), "/ventas".to_string()],
    })
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
