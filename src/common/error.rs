use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    common::i18n,
    middleware::i18n::Locale,
    models::order::OrderStatus,
};

// Erro de domínio. Os handlers convertem para `ApiError` já traduzido.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Vendedor não encontrado")]
    VendorNotFound,

    #[error("Vendedor inativo")]
    VendorInactive,

    #[error("Telefone já cadastrado")]
    PhoneAlreadyExists,

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    #[error("Produto inativo: {0}")]
    ProductInactive(Uuid),

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Transição de status inválida: {current:?} -> {requested:?}")]
    InvalidStatusTransition {
        current: OrderStatus,
        requested: OrderStatus,
    },

    #[error("Pedido já gerado para o vendedor {vendor_id} em {date}")]
    AlreadyGenerated { vendor_id: Uuid, date: NaiveDate },

    #[error("Vendedor {vendor_id} cancelou a entrega de {date}")]
    DateCancelled { vendor_id: Uuid, date: NaiveDate },

    #[error("Já existe cancelamento para esta data")]
    CancellationExists,

    #[error("Cancelamento não encontrado")]
    CancellationNotFound,

    #[error("O pedido desta data já foi gerado")]
    CancellationLocked,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O que vai de fato para o cliente
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::VendorInactive => StatusCode::FORBIDDEN,
            AppError::VendorNotFound
            | AppError::ProductNotFound(_)
            | AppError::OrderNotFound
            | AppError::CancellationNotFound
            | AppError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PhoneAlreadyExists
            | AppError::AlreadyGenerated { .. }
            | AppError::DateCancelled { .. }
            | AppError::CancellationExists
            | AppError::CancellationLocked => StatusCode::CONFLICT,
            AppError::ProductInactive(_) | AppError::InvalidStatusTransition { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Chave do catálogo de mensagens (common/i18n.rs)
    pub fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::Forbidden => "forbidden",
            AppError::VendorNotFound => "vendor_not_found",
            AppError::VendorInactive => "vendor_inactive",
            AppError::PhoneAlreadyExists => "phone_exists",
            AppError::ProductNotFound(_) => "product_not_found",
            AppError::ProductInactive(_) => "product_inactive",
            AppError::OrderNotFound => "order_not_found",
            AppError::InvalidStatusTransition { .. } => "invalid_transition",
            AppError::AlreadyGenerated { .. } => "already_generated",
            AppError::DateCancelled { .. } => "date_cancelled",
            AppError::CancellationExists => "cancellation_exists",
            AppError::CancellationNotFound => "cancellation_not_found",
            AppError::CancellationLocked => "cancellation_locked",
            AppError::ResourceNotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            _ => "internal",
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::ProductNotFound(id) | AppError::ProductInactive(id) => {
                Some(json!({ "productId": id }))
            }
            AppError::InvalidStatusTransition { current, requested } => Some(json!({
                "from": current.as_str(),
                "to": requested.as_str(),
            })),
            AppError::AlreadyGenerated { vendor_id, date }
            | AppError::DateCancelled { vendor_id, date } => Some(json!({
                "vendorId": vendor_id,
                "date": date,
            })),
            AppError::ResourceNotFound(what) | AppError::BadRequest(what) => {
                Some(json!({ "reason": what }))
            }
            _ => None,
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let status = self.status();

        if status.is_server_error() {
            // O detalhe fica só no log
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        ApiError {
            status,
            error: i18n::message(&locale.0, self.message_key()).to_string(),
            details: if status.is_server_error() { None } else { self.details() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Usado pelos middlewares, que não têm o Locale em mãos
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
