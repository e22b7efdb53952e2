// src/models/demand.rs
//
// As três entradas que o vendedor controla: necessidades diárias (recorrentes),
// pedidos extras (por data) e cancelamentos (por data).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use utoipa::ToSchema;

// --- Necessidade diária (pedido fixo) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyNeed {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 5)]
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

// Necessidade com os dados do produto, para a tela do vendedor
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyNeedView {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Tomate")]
    pub product_name: String,
    #[schema(example = "kg")]
    pub unit: String,
    #[schema(example = "7.50")]
    pub price: Decimal,
    pub product_active: bool,
    pub quantity: i32,
}

// --- Pedido extra (avulso, com data) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtraOrder {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[schema(example = "2024-01-10")]
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtraOrderView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit: String,
    pub price: Decimal,
    pub quantity: i32,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// --- Cancelamento (o vendedor não quer entrega naquela data) ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelledOrder {
    pub id: Uuid,
    pub vendor_id: Uuid,
    #[schema(example = "2024-01-10")]
    pub cancel_date: NaiveDate,
    #[schema(example = "Feriado, banca fechada")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Cancelamento como aparece na lista de separação
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancellationNotice {
    pub vendor_id: Uuid,
    #[schema(example = "Banca do João")]
    pub vendor_name: String,
    pub reason: Option<String>,
}

// =============================================================================
//  LINHAS DE DEMANDA (entrada do motor de geração)
// =============================================================================

/// Uma linha de demanda de um único vendedor, já com o preço vigente do produto.
/// `product_active` vem junto para que o agregador decida (e registre) o descarte.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DemandLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub unit: String,
    pub quantity: i32,
    pub price: Decimal,
    pub product_active: bool,
}

/// Demanda de um vendedor por um produto, usada na lista de separação.
/// Só chegam aqui vendedores ativos e produtos ativos.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VendorDemandRow {
    pub vendor_id: Uuid,
    pub vendor_name: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub unit: String,
    pub price: Decimal,
    pub quantity: i64,
}
