// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub order_id: Option<Uuid>,
    #[schema(example = "150.00")]
    pub amount: Decimal,
    #[schema(example = "pix")]
    pub method: String,
    pub reference: Option<String>,
    pub paid_at: DateTime<Utc>,
}
