//! Ventas API endpoints.

use api_types::venta::{
    VentaListQuery, VentaNew, VentaSimple, VentaUpdate, VentaView, VentaWithAuto,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use engine::{Page, VentaListFilter, repo::DEFAULT_LIMIT};

use crate::{ServerError, autos::map_auto, server::ServerState};

fn map_venta(venta: engine::Venta) -> VentaView {
    VentaView {
        id: venta.id,
        nombre_comprador: venta.buyer_name,
        precio: venta.price,
        fecha_venta: venta.sale_date,
        auto_id: venta.auto_id,
    }
}

pub(crate) fn map_venta_simple(venta: engine::Venta) -> VentaSimple {
    VentaSimple {
        id: venta.id,
        nombre_comprador: venta.buyer_name,
        precio: venta.price,
        fecha_venta: venta.sale_date,
    }
}

fn map_ventas(ventas: Vec<engine::Venta>) -> Json<Vec<VentaView>> {
    Json(ventas.into_iter().map(map_venta).collect())
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VentaNew>,
) -> Result<(StatusCode, Json<VentaView>), ServerError> {
    let venta = state
        .engine
        .new_venta(engine::VentaNew {
            buyer_name: payload.nombre_comprador,
            price: payload.precio,
            sale_date: payload.fecha_venta.map(|d| d.with_timezone(&Utc)),
            auto_id: payload.auto_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_venta(venta))))
}

/// List sales, filtered by date range or else by price range.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<VentaListQuery>,
) -> Result<Json<Vec<VentaView>>, ServerError> {
    let filter = VentaListFilter {
        page: Page::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(DEFAULT_LIMIT),
        )?,
        date_from: query.fecha_inicio,
        date_to: query.fecha_fin,
        price_min: query.precio_min,
        price_max: query.precio_max,
    };
    let ventas = state.engine.ventas(&filter).await?;

    Ok(map_ventas(ventas))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(venta_id): Path<i32>,
) -> Result<Json<VentaView>, ServerError> {
    let venta = state.engine.venta(venta_id).await?;
    Ok(Json(map_venta(venta)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(venta_id): Path<i32>,
    Json(payload): Json<VentaUpdate>,
) -> Result<Json<VentaView>, ServerError> {
    let venta = state
        .engine
        .update_venta(
            venta_id,
            engine::VentaUpdate {
                buyer_name: payload.nombre_comprador,
                price: payload.precio,
                sale_date: payload.fecha_venta.map(|d| d.with_timezone(&Utc)),
                auto_id: payload.auto_id,
            },
        )
        .await?;

    Ok(Json(map_venta(venta)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(venta_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_venta(venta_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_auto(
    State(state): State<ServerState>,
    Path(auto_id): Path<i32>,
) -> Result<Json<Vec<VentaView>>, ServerError> {
    let ventas = state.engine.ventas_by_auto(auto_id).await?;
    Ok(map_ventas(ventas))
}

pub async fn list_by_buyer(
    State(state): State<ServerState>,
    Path(nombre): Path<String>,
) -> Result<Json<Vec<VentaView>>, ServerError> {
    let ventas = state.engine.ventas_by_buyer(&nombre).await?;
    Ok(map_ventas(ventas))
}

pub async fn get_with_auto(
    State(state): State<ServerState>,
    Path(venta_id): Path<i32>,
) -> Result<Json<VentaWithAuto>, ServerError> {
    let composed = state.engine.venta_with_auto(venta_id).await?;

    Ok(Json(VentaWithAuto {
        venta: map_venta(composed.venta),
        auto: composed.auto.map(map_auto),
    }))
}
