// src/models/packing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;
use utoipa::ToSchema;

use crate::models::demand::CancellationNotice;

// Uma linha da lista de separação: demanda total de um produto no dia
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackingListEntry {
    pub product_id: Uuid,
    #[schema(example = "Tomate")]
    pub product_name: String,
    #[schema(example = "kg")]
    pub unit: String,
    #[schema(example = "7.50")]
    pub price: Decimal,
    #[schema(example = 5)]
    pub daily_quantity: i64,
    #[schema(example = 2)]
    pub extra_quantity: i64,
    #[schema(example = 7)]
    pub total_quantity: i64,
    // Soma dos vendedores de cada origem (quem está nas duas conta duas vezes)
    #[schema(example = 2)]
    pub vendor_count: usize,
    pub vendor_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackingSummary {
    pub total_products: usize,
    // Vendedores distintos em toda a lista
    pub total_vendors: usize,
    pub cancelled_vendors: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackingList {
    #[schema(example = "2024-01-10")]
    pub date: NaiveDate,
    pub packing_list: Vec<PackingListEntry>,
    pub cancelled_orders: Vec<CancellationNotice>,
    pub summary: PackingSummary,
}
