//! Autos API endpoints.

use api_types::auto::{AutoListQuery, AutoNew, AutoUpdate, AutoView, AutoWithVentas};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{Page, repo::DEFAULT_LIMIT};

use crate::{ServerError, server::ServerState, ventas::map_venta_simple};

pub(crate) fn map_auto(auto: engine::Auto) -> AutoView {
    AutoView {
        id: auto.id,
        marca: auto.marca,
        modelo: auto.modelo,
        year: auto.year,
        numero_chasis: auto.chassis_number,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AutoNew>,
) -> Result<(StatusCode, Json<AutoView>), ServerError> {
    let auto = state
        .engine
        .new_auto(engine::AutoNew {
            marca: payload.marca,
            modelo: payload.modelo,
            year: payload.year,
            chassis_number: payload.numero_chasis,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(map_auto(auto))))
}

/// List cars; `marca`/`modelo` switch to a partial match search.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AutoListQuery>,
) -> Result<Json<Vec<AutoView>>, ServerError> {
    let page = Page::new(
        query.skip.unwrap_or(0),
        query.limit.unwrap_or(DEFAULT_LIMIT),
    )?;
    let autos = state
        .engine
        .autos(query.marca.as_deref(), query.modelo.as_deref(), page)
        .await?
        .into_iter()
        .map(map_auto)
        .collect();

    Ok(Json(autos))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(auto_id): Path<i32>,
) -> Result<Json<AutoView>, ServerError> {
    let auto = state.engine.auto(auto_id).await?;
    Ok(Json(map_auto(auto)))
}

pub async fn get_by_chassis(
    State(state): State<ServerState>,
    Path(numero_chasis): Path<String>,
) -> Result<Json<AutoView>, ServerError> {
    let auto = state.engine.auto_by_chassis(&numero_chasis).await?;
    Ok(Json(map_auto(auto)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(auto_id): Path<i32>,
    Json(payload): Json<AutoUpdate>,
) -> Result<Json<AutoView>, ServerError> {
    let auto = state
        .engine
        .update_auto(
            auto_id,
            engine::AutoUpdate {
                marca: payload.marca,
                modelo: payload.modelo,
                year: payload.year,
                chassis_number: payload.numero_chasis,
            },
        )
        .await?;

    Ok(Json(map_auto(auto)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(auto_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_auto(auto_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_with_ventas(
    State(state): State<ServerState>,
    Path(auto_id): Path<i32>,
) -> Result<Json<AutoWithVentas>, ServerError> {
    let composed = state.engine.auto_with_ventas(auto_id).await?;

    Ok(Json(AutoWithVentas {
        auto: map_auto(composed.auto),
        ventas: composed.ventas.into_iter().map(map_venta_simple).collect(),
    }))
}
