// src/models/vendor.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,
    #[schema(example = "Banca do João")]
    pub name: String,
    #[schema(example = "+5511999998888")]
    pub phone: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    // Endereço padrão de entrega (copiado para o pedido na geração)
    #[schema(example = "Praça da Sé, banca 12")]
    pub address: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Visão mínima do vendedor usada pelo lote de geração.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct VendorRef {
    pub id: Uuid,
    pub name: String,
    pub address: String,
}
