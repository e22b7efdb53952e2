// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{Claims, Role},
};

// Identidades que os guards colocam nos "extensions" da requisição
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedVendor(pub Uuid);

#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAdmin(pub Uuid);

fn bearer_claims(app_state: &AppState, headers: &HeaderMap) -> Result<Claims, AppError> {
    let authorization = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::InvalidToken)?;

    app_state.auth_service.decode_token(authorization.token())
}

// Rotas do vendedor: token com papel "vendor" de um vendedor ainda ativo
pub async fn vendor_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = bearer_claims(&app_state, request.headers()).map_err(|e| e.to_api_error(&locale))?;
    if claims.role != Role::Vendor {
        return Err(AppError::Forbidden.to_api_error(&locale));
    }

    let vendor = app_state
        .vendor_repo
        .find_by_id(&app_state.db_pool, claims.sub)
        .await
        .and_then(|v| v.ok_or(AppError::InvalidToken))
        .map_err(|e| e.to_api_error(&locale))?;
    if !vendor.active {
        return Err(AppError::VendorInactive.to_api_error(&locale));
    }

    request.extensions_mut().insert(AuthenticatedVendor(vendor.id));
    Ok(next.run(request).await)
}

// Rotas administrativas: basta o papel "admin" no token
pub async fn admin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = bearer_claims(&app_state, request.headers()).map_err(|e| e.to_api_error(&locale))?;
    if claims.role != Role::Admin {
        return Err(AppError::Forbidden.to_api_error(&locale));
    }

    request.extensions_mut().insert(AuthenticatedAdmin(claims.sub));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedVendor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedVendor>()
            .copied()
            .ok_or(AppError::InvalidToken)
    }
}

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .copied()
            .ok_or(AppError::InvalidToken)
    }
}
