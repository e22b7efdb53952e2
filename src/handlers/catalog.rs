// src/handlers/catalog.rs
//
// Cadastros do back office: produtos e vendedores.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::{Page, Pagination},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{product::Product, vendor::Vendor},
};

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Tomate")]
    pub name: String,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    #[schema(example = "kg")]
    pub unit: String,
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = "7.50")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: Option<String>,
    pub price: Option<Decimal>,
    pub active: Option<bool>,
}

impl UpdateProductPayload {
    // Preço é opcional aqui; quando vem, segue a mesma regra da criação
    fn validate_price(&self) -> Result<(), ValidationError> {
        match &self.price {
            Some(price) => validate_positive(price),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Só produtos ativos
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetVendorActivePayload {
    pub active: bool,
}

// ---
// Produtos
// ---

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "Admin",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let product = app_state
        .product_repo
        .create(&app_state.db_pool, &payload.name, &payload.unit, payload.price)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Admin",
    params(ProductFilter),
    responses((status = 200, description = "Catálogo de produtos", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(filter): Query<ProductFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .product_repo
        .list(filter.active_only.unwrap_or(false))
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(products))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;
    payload.validate_price().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("price", e);
        AppError::ValidationError(errors).to_api_error(&locale)
    })?;

    // Mudança de preço não mexe em pedidos já gerados (o item guarda o preço)
    let product = app_state
        .product_repo
        .update(
            &app_state.db_pool,
            product_id,
            payload.name.as_deref(),
            payload.unit.as_deref(),
            payload.price,
            payload.active,
        )
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(product))
}

// ---
// Vendedores
// ---

#[utoipa::path(
    get,
    path = "/api/admin/vendors",
    tag = "Admin",
    params(Pagination),
    responses((status = 200, description = "Vendedores cadastrados", body = Page<Vendor>)),
    security(("api_jwt" = []))
)]
pub async fn list_vendors(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let (vendors, total) = app_state
        .vendor_repo
        .list(pagination.limit(), pagination.offset())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(Page::new(vendors, &pagination, total)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/vendors/{id}/active",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do vendedor")),
    request_body = SetVendorActivePayload,
    responses(
        (status = 200, description = "Vendedor ativado/desativado", body = Vendor),
        (status = 404, description = "Vendedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_vendor_active(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(vendor_id): Path<Uuid>,
    Json(payload): Json<SetVendorActivePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let vendor = app_state
        .vendor_repo
        .set_active(&app_state.db_pool, vendor_id, payload.active)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    tracing::info!(vendor_id = %vendor.id, active = vendor.active, "Status do vendedor alterado");
    Ok(Json(vendor))
}
