// src/handlers/vendor.rs
//
// Rotas do vendedor autenticado (/api/vendor/*). O vendor_guard já garantiu
// token válido e vendedor ativo.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::{Page, Pagination},
    },
    config::AppState,
    middleware::{auth::AuthenticatedVendor, i18n::Locale},
    models::{
        demand::{CancelledOrder, DailyNeedView, ExtraOrder, ExtraOrderView},
        notification::Notification,
        order::{Order, OrderDetail},
        returns::ReturnRequest,
    },
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyNeedInput {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    #[schema(example = 5)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetDailyNeedsPayload {
    #[validate(nested)]
    pub needs: Vec<DailyNeedInput>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExtraOrderPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    pub quantity: i32,
    #[schema(example = "2024-01-10")]
    pub order_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCancellationPayload {
    #[schema(example = "2024-01-10")]
    pub cancel_date: NaiveDate,
    #[validate(length(max = 500, message = "Motivo muito longo."))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnPayload {
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    pub quantity: Option<i32>,
    #[validate(length(min = 3, message = "Informe o motivo da devolução."))]
    #[schema(example = "Tomates amassados")]
    pub reason: String,
}

// ---
// Pedido fixo
// ---

#[utoipa::path(
    get,
    path = "/api/vendor/daily-needs",
    tag = "Vendor",
    responses((status = 200, description = "Pedido fixo atual", body = Vec<DailyNeedView>)),
    security(("api_jwt" = []))
)]
pub async fn get_daily_needs(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
) -> Result<impl IntoResponse, ApiError> {
    let needs = app_state
        .vendor_service
        .list_daily_needs(vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(needs))
}

#[utoipa::path(
    put,
    path = "/api/vendor/daily-needs",
    tag = "Vendor",
    request_body = SetDailyNeedsPayload,
    responses(
        (status = 200, description = "Pedido fixo substituído", body = Vec<DailyNeedView>),
        (status = 400, description = "Quantidade inválida ou produto repetido"),
        (status = 404, description = "Produto não encontrado"),
        (status = 422, description = "Produto inativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_daily_needs(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Json(payload): Json<SetDailyNeedsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let needs: Vec<(Uuid, i32)> = payload.needs.iter().map(|n| (n.product_id, n.quantity)).collect();
    let saved = app_state
        .vendor_service
        .set_daily_needs(vendor_id, &needs)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(saved))
}

// ---
// Pedidos extras
// ---

#[utoipa::path(
    post,
    path = "/api/vendor/extra-orders",
    tag = "Vendor",
    request_body = CreateExtraOrderPayload,
    responses(
        (status = 201, description = "Pedido extra registrado", body = ExtraOrder),
        (status = 400, description = "Data no passado"),
        (status = 409, description = "O pedido desta data já foi gerado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_extra_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Json(payload): Json<CreateExtraOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let extra = app_state
        .vendor_service
        .add_extra_order(vendor_id, payload.product_id, payload.quantity, payload.order_date)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(extra)))
}

#[utoipa::path(
    get,
    path = "/api/vendor/extra-orders",
    tag = "Vendor",
    responses((status = 200, description = "Extras de hoje em diante", body = Vec<ExtraOrderView>)),
    security(("api_jwt" = []))
)]
pub async fn list_extra_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
) -> Result<impl IntoResponse, ApiError> {
    let extras = app_state
        .vendor_service
        .list_extra_orders(vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(extras))
}

// ---
// Cancelamentos
// ---

#[utoipa::path(
    post,
    path = "/api/vendor/cancellations",
    tag = "Vendor",
    request_body = CreateCancellationPayload,
    responses(
        (status = 201, description = "Entrega cancelada", body = CancelledOrder),
        (status = 409, description = "Já cancelada ou pedido já gerado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cancellation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Json(payload): Json<CreateCancellationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let cancellation = app_state
        .vendor_service
        .cancel_date(vendor_id, payload.cancel_date, payload.reason.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(cancellation)))
}

#[utoipa::path(
    get,
    path = "/api/vendor/cancellations",
    tag = "Vendor",
    responses((status = 200, description = "Cancelamentos de hoje em diante", body = Vec<CancelledOrder>)),
    security(("api_jwt" = []))
)]
pub async fn list_cancellations(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
) -> Result<impl IntoResponse, ApiError> {
    let cancellations = app_state
        .vendor_service
        .list_cancellations(vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(cancellations))
}

#[utoipa::path(
    delete,
    path = "/api/vendor/cancellations/{date}",
    tag = "Vendor",
    params(("date" = NaiveDate, Path, description = "Data cancelada (AAAA-MM-DD)")),
    responses(
        (status = 204, description = "Cancelamento removido"),
        (status = 404, description = "Cancelamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_cancellation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .vendor_service
        .delete_cancellation(vendor_id, date)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Pedidos do vendedor
// ---

#[utoipa::path(
    get,
    path = "/api/vendor/orders",
    tag = "Vendor",
    params(Pagination),
    responses((status = 200, description = "Pedidos, mais recentes primeiro", body = Page<Order>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .order_service
        .list_for_vendor(vendor_id, &pagination)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/vendor/orders/{id}",
    tag = "Vendor",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_order(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .order_service
        .detail(order_id, Some(vendor_id))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(detail))
}

// ---
// Devoluções
// ---

#[utoipa::path(
    post,
    path = "/api/vendor/returns",
    tag = "Vendor",
    request_body = CreateReturnPayload,
    responses(
        (status = 201, description = "Devolução solicitada", body = ReturnRequest),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_return(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Json(payload): Json<CreateReturnPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let request = app_state
        .returns_service
        .request_return(vendor_id, payload.order_id, payload.product_id, payload.quantity, &payload.reason)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/vendor/returns",
    tag = "Vendor",
    responses((status = 200, description = "Devoluções do vendedor", body = Vec<ReturnRequest>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_returns(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
) -> Result<impl IntoResponse, ApiError> {
    let requests = app_state
        .returns_service
        .list_for_vendor(vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(requests))
}

// ---
// Notificações
// ---

#[utoipa::path(
    get,
    path = "/api/vendor/notifications",
    tag = "Vendor",
    params(Pagination),
    responses((status = 200, description = "Notificações recebidas", body = Page<Notification>)),
    security(("api_jwt" = []))
)]
pub async fn list_my_notifications(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let (notifications, total) = app_state
        .notification_repo
        .list_by_vendor(vendor_id, pagination.limit(), pagination.offset())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(Page::new(notifications, &pagination, total)))
}

#[utoipa::path(
    post,
    path = "/api/vendor/notifications/{id}/read",
    tag = "Vendor",
    params(("id" = Uuid, Path, description = "ID da notificação")),
    responses(
        (status = 204, description = "Marcada como lida"),
        (status = 404, description = "Notificação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_notification_read(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .notification_repo
        .mark_read(&app_state.db_pool, notification_id, vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
