// src/handlers/back_office.rs
//
// Devoluções, pagamentos e notificações do lado administrativo.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::{Page, Pagination},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{notification::Notification, payment::Payment, returns::{ReturnRequest, ReturnStatus}},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReturnsFilter {
    pub status: Option<ReturnStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReturnPayload {
    /// `approved` ou `rejected`
    pub status: ReturnStatus,
    #[validate(length(max = 1000, message = "Observação muito longa."))]
    pub admin_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub vendor_id: Uuid,
    pub order_id: Option<Uuid>,
    #[schema(example = "150.00")]
    pub amount: Decimal,
    #[validate(length(min = 1, max = 30, message = "Informe a forma de pagamento."))]
    #[schema(example = "pix")]
    pub method: String,
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationPayload {
    pub vendor_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Título obrigatório (máx. 200)."))]
    pub title: String,
    #[validate(length(min = 1, message = "Mensagem obrigatória."))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastPayload {
    #[validate(length(min = 1, max = 200, message = "Título obrigatório (máx. 200)."))]
    pub title: String,
    #[validate(length(min = 1, message = "Mensagem obrigatória."))]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    pub recipients: u64,
}

// ---
// Devoluções
// ---

#[utoipa::path(
    get,
    path = "/api/admin/returns",
    tag = "Admin",
    params(ReturnsFilter, Pagination),
    responses((status = 200, description = "Pedidos de devolução", body = Page<ReturnRequest>)),
    security(("api_jwt" = []))
)]
pub async fn list_returns(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<ReturnsFilter>,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .returns_service
        .list(filter.status, &pagination)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(page))
}

#[utoipa::path(
    post,
    path = "/api/admin/returns/{id}/resolve",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID da devolução")),
    request_body = ResolveReturnPayload,
    responses(
        (status = 200, description = "Devolução resolvida", body = ReturnRequest),
        (status = 404, description = "Devolução inexistente ou já resolvida")
    ),
    security(("api_jwt" = []))
)]
pub async fn resolve_return(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(return_id): Path<Uuid>,
    Json(payload): Json<ResolveReturnPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let request = app_state
        .returns_service
        .resolve(return_id, payload.status, payload.admin_notes.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(request))
}

// ---
// Pagamentos
// ---

#[utoipa::path(
    post,
    path = "/api/admin/payments",
    tag = "Admin",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado", body = Payment),
        (status = 400, description = "Valor inválido"),
        (status = 404, description = "Vendedor ou pedido inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("amount must be greater than zero".into()).to_api_error(&locale));
    }

    let payment = app_state
        .payment_repo
        .create(
            &app_state.db_pool,
            payload.vendor_id,
            payload.order_id,
            payload.amount,
            &payload.method,
            payload.reference.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/api/admin/vendors/{id}/payments",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do vendedor")),
    responses((status = 200, description = "Pagamentos do vendedor", body = Vec<Payment>)),
    security(("api_jwt" = []))
)]
pub async fn list_vendor_payments(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = app_state
        .payment_repo
        .list_by_vendor(vendor_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(payments))
}

// ---
// Notificações
// ---

#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    tag = "Admin",
    request_body = SendNotificationPayload,
    responses(
        (status = 201, description = "Notificação criada", body = Notification),
        (status = 404, description = "Vendedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_notification(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SendNotificationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let notification = app_state
        .notification_repo
        .create(&app_state.db_pool, payload.vendor_id, &payload.title, &payload.message)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    post,
    path = "/api/admin/notifications/broadcast",
    tag = "Admin",
    request_body = BroadcastPayload,
    responses((status = 201, description = "Uma notificação por vendedor ativo", body = BroadcastResponse)),
    security(("api_jwt" = []))
)]
pub async fn broadcast_notification(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<BroadcastPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let recipients = app_state
        .notification_repo
        .broadcast(&app_state.db_pool, &payload.title, &payload.message)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tracing::info!(recipients, "Notificação enviada a todos os vendedores ativos");
    Ok((StatusCode::CREATED, Json(BroadcastResponse { recipients })))
}
