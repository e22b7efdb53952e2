// src/handlers/orders.rs
//
// Pedidos no back office: listagem por data, detalhe e ciclo de vida.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::{error::ApiError, pagination::{Page, Pagination}},
    config::AppState,
    middleware::i18n::Locale,
    models::order::{Order, OrderDetail, OrderStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrdersByDateQuery {
    /// Data de entrega (AAAA-MM-DD)
    pub date: NaiveDate,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    pub status: OrderStatus,
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Admin",
    params(OrdersByDateQuery, Pagination),
    responses((status = 200, description = "Pedidos da data", body = Page<Order>)),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<OrdersByDateQuery>,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .order_service
        .list_by_date(query.date, query.status, &pagination)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .order_service
        .detail(order_id, None)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(detail))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateOrderStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado"),
        (status = 422, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .update_status(order_id, payload.status)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(order))
}
