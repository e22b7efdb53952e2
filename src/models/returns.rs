// src/models/returns.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "return_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub order_id: Uuid,
    // Sem produto = devolução do pedido inteiro
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    #[schema(example = "Tomates amassados")]
    pub reason: String,
    pub status: ReturnStatus,
    pub admin_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}
