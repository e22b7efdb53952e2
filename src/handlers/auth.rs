// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedVendor, i18n::Locale},
    models::{
        auth::{AdminLoginPayload, AuthResponse, RegisterVendorPayload, VendorLoginPayload},
        vendor::Vendor,
    },
};

#[utoipa::path(
    post,
    path = "/api/auth/vendor/register",
    tag = "Auth",
    request_body = RegisterVendorPayload,
    responses(
        (status = 201, description = "Vendedor cadastrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Telefone já cadastrado")
    )
)]
pub async fn register_vendor(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterVendorPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let (_, auth) = app_state
        .auth_service
        .register_vendor(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(auth)))
}

#[utoipa::path(
    post,
    path = "/api/auth/vendor/login",
    tag = "Auth",
    request_body = VendorLoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Vendedor inativo")
    )
)]
pub async fn login_vendor(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<VendorLoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let auth = app_state
        .auth_service
        .login_vendor(&payload.phone, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(auth)))
}

#[utoipa::path(
    post,
    path = "/api/auth/admin/login",
    tag = "Auth",
    request_body = AdminLoginPayload,
    responses(
        (status = 200, description = "Login da equipe efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login_admin(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<AdminLoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let auth = app_state
        .auth_service
        .login_admin(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(auth)))
}

#[utoipa::path(
    get,
    path = "/api/vendor/me",
    tag = "Vendor",
    responses(
        (status = 200, description = "Perfil do vendedor autenticado", body = Vendor),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedVendor(vendor_id): AuthenticatedVendor,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = app_state
        .vendor_repo
        .find_by_id(&app_state.db_pool, vendor_id)
        .await
        .and_then(|v| v.ok_or(AppError::VendorNotFound))
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(vendor))
}
