// src/services/packing_service.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GenerationStore,
    models::{
        demand::{CancellationNotice, VendorDemandRow},
        generation::LineSource,
        packing::{PackingList, PackingListEntry, PackingSummary},
    },
    services::availability::{today, DateAvailability},
};

#[derive(Clone)]
pub struct PackingService {
    store: Arc<dyn GenerationStore>,
}

impl PackingService {
    pub fn new(store: Arc<dyn GenerationStore>) -> Self {
        Self { store }
    }

    /// Demanda total por produto para `date` (hoje, se ausente).
    pub async fn get_packing_list(&self, date: Option<NaiveDate>) -> Result<PackingList, AppError> {
        let date = date.unwrap_or_else(today);

        let daily = self.store.list_daily_need_demand().await?;
        let extra = self.store.list_extra_order_demand(date).await?;
        let cancellations = self.store.list_cancellations_for_date(date).await?;

        let packing_list = build_packing_list(date, daily, extra, cancellations);
        tracing::debug!(
            %date,
            products = packing_list.summary.total_products,
            cancelled = packing_list.summary.cancelled_vendors,
            "Lista de separação montada"
        );
        Ok(packing_list)
    }
}

fn accumulate(entries: &mut HashMap<Uuid, PackingListEntry>, row: VendorDemandRow, source: LineSource) {
    let entry = entries.entry(row.product_id).or_insert_with(|| PackingListEntry {
        product_id: row.product_id,
        product_name: row.product_name,
        unit: row.unit,
        price: row.price,
        daily_quantity: 0,
        extra_quantity: 0,
        total_quantity: 0,
        vendor_count: 0,
        vendor_names: Vec::new(),
    });

    match source {
        LineSource::DailyNeed => entry.daily_quantity += row.quantity,
        LineSource::ExtraOrder => entry.extra_quantity += row.quantity,
    }
    entry.total_quantity = entry.daily_quantity + entry.extra_quantity;
    // Uma linha por (vendedor, produto) em cada origem
    entry.vendor_count += 1;
    entry.vendor_names.push(row.vendor_name);
}

/// Junta as duas origens de demanda por `product_id`.
///
/// Vendedores que cancelaram `date` saem das duas origens. `vendor_count`
/// soma os vendedores de cada origem (quem pediu diário e extra do mesmo
/// produto conta duas vezes); `summary.total_vendors` é sem repetição.
pub fn build_packing_list(
    date: NaiveDate,
    daily: Vec<VendorDemandRow>,
    extra: Vec<VendorDemandRow>,
    cancelled_orders: Vec<CancellationNotice>,
) -> PackingList {
    let availability = DateAvailability::new(cancelled_orders.iter().map(|c| c.vendor_id));

    let mut entries: HashMap<Uuid, PackingListEntry> = HashMap::new();
    let mut vendors: HashSet<Uuid> = HashSet::new();

    let sources = daily
        .into_iter()
        .map(|row| (row, LineSource::DailyNeed))
        .chain(extra.into_iter().map(|row| (row, LineSource::ExtraOrder)));
    for (row, source) in sources {
        if !availability.is_vendor_active_for(row.vendor_id) {
            continue;
        }
        vendors.insert(row.vendor_id);
        accumulate(&mut entries, row, source);
    }

    let mut packing_list: Vec<PackingListEntry> = entries.into_values().collect();
    packing_list.sort_by(|a, b| (&a.product_name, a.product_id).cmp(&(&b.product_name, b.product_id)));

    let summary = PackingSummary {
        total_products: packing_list.len(),
        total_vendors: vendors.len(),
        cancelled_vendors: availability.cancelled_count(),
    };

    PackingList {
        date,
        packing_list,
        cancelled_orders,
        summary,
    }
}
