// src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// --- Enums ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Ciclo de vida: pending → processing → out_for_delivery → delivered,
    /// ou pending → cancelled.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, OutForDelivery)
                | (OutForDelivery, Delivered)
                | (Pending, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

// --- Structs persistidas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub vendor_id: Uuid,
    #[schema(example = "2024-01-10")]
    pub order_date: NaiveDate,
    #[schema(example = "50.00")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    // Copiado do vendedor na geração; edições posteriores do endereço não mudam o pedido
    #[schema(example = "Praça da Sé, banca 12")]
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 5)]
    pub quantity: i32,
    // Foto do preço no momento da geração
    #[schema(example = "10.00")]
    pub unit_price: Decimal,
    #[schema(example = "50.00")]
    pub total_price: Decimal,
}

// Item com nome/unidade do produto, para telas e detalhes
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub vendor_name: String,
    pub items: Vec<OrderItemView>,
}

// =============================================================================
//  ESCRITA (unidade de trabalho da materialização)
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Pedido pronto para gravar: cabeçalho + itens vão juntos numa única transação.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub vendor_id: Uuid,
    pub order_date: NaiveDate,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub delivery_address: String,
    pub items: Vec<NewOrderItem>,
}
