use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{autos, service, ventas};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Build the HTTP router over `state`.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(service::root))
        .route("/health", get(service::health))
        .route("/autos", post(autos::create).get(autos::list))
        .route(
            "/autos/{auto_id}",
            get(autos::get).put(autos::update).delete(autos::delete),
        )
        .route("/autos/chasis/{numero_chasis}", get(autos::get_by_chassis))
        .route("/autos/{auto_id}/with-ventas", get(autos::get_with_ventas))
        .route("/ventas", post(ventas::create).get(ventas::list))
        .route(
            "/ventas/{venta_id}",
            get(ventas::get).put(ventas::update).delete(ventas::delete),
        )
        .route("/ventas/auto/{auto_id}", get(ventas::list_by_auto))
        .route("/ventas/comprador/{nombre}", get(ventas::list_by_buyer))
        .route("/ventas/{venta_id}/with-auto", get(ventas::get_with_auto))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
