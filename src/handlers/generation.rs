// src/handlers/generation.rs
//
// Gatilho do lote diário e lista de separação do armazém.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedAdmin, i18n::Locale},
    models::{generation::GenerationReport, packing::PackingList},
};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOrdersPayload {
    /// Data de entrega; hoje, se ausente
    #[schema(example = "2024-01-10")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PackingListQuery {
    /// Data de entrega (AAAA-MM-DD); hoje, se ausente
    pub date: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/generate",
    tag = "Admin",
    request_body(content = GenerateOrdersPayload, description = "Corpo opcional"),
    responses(
        (status = 200, description = "Relatório do lote (gerados, ignorados, falhas)", body = GenerationReport),
        (status = 500, description = "Falha ao listar os vendedores")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedAdmin(admin_id): AuthenticatedAdmin,
    payload: Option<Json<GenerateOrdersPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.unwrap_or_default();
    tracing::info!(admin_id = %admin_id, date = ?payload.date, "Geração de pedidos solicitada");

    let report = app_state
        .generation_service
        .generate_daily_orders(payload.date)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/admin/packing-list",
    tag = "Admin",
    params(PackingListQuery),
    responses((status = 200, description = "Demanda total por produto na data", body = PackingList)),
    security(("api_jwt" = []))
)]
pub async fn get_packing_list(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PackingListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let packing_list = app_state
        .packing_service
        .get_packing_list(query.date)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(packing_list))
}
