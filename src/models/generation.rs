// src/models/generation.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;
use utoipa::ToSchema;

/// De onde veio a linha do pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LineSource {
    DailyNeed,
    ExtraOrder,
}

/// Uma linha precificada, antes de virar `order_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub product_id: Uuid,
    pub source: LineSource,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Resultado não-vazio da agregação de um vendedor numa data.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorOrderDraft {
    pub vendor_id: Uuid,
    pub order_date: NaiveDate,
    pub lines: Vec<DraftLine>,
    pub total_amount: Decimal,
}

// =============================================================================
//  RELATÓRIO DO LOTE
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedOrderSummary {
    pub vendor_id: Uuid,
    #[schema(example = "Banca do João")]
    pub vendor_name: String,
    pub order_id: Uuid,
    #[schema(example = "50.00")]
    pub total_amount: Decimal,
    #[schema(example = 3)]
    pub item_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// O vendedor cancelou a entrega desta data.
    Cancelled,
    /// Nenhuma necessidade diária com produto ativo.
    NoActiveNeeds,
    /// Já existe pedido para (vendedor, data).
    AlreadyGenerated,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedVendor {
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedVendor {
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    #[schema(example = "2024-01-10")]
    pub date: NaiveDate,
    pub generated_count: usize,
    pub orders: Vec<GeneratedOrderSummary>,
    pub skipped: Vec<SkippedVendor>,
    pub failed: Vec<FailedVendor>,
}
