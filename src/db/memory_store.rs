//! In-memory `GenerationStore` for tests.
//!
//! Mirrors the Postgres semantics the engine relies on: joins to active
//! vendors/products, the `(vendor_id, order_date)` uniqueness of orders, the
//! cancellation re-check at write time and all-or-nothing order writes.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GenerationStore,
    models::{
        demand::{CancellationNotice, CancelledOrder, DemandLine, VendorDemandRow},
        order::{NewOrder, NewOrderItem, Order},
        vendor::VendorRef,
    },
};

#[derive(Debug, Clone)]
struct MemVendor {
    id: Uuid,
    name: String,
    address: String,
    active: bool,
}

#[derive(Debug, Clone)]
struct MemProduct {
    id: Uuid,
    name: String,
    unit: String,
    price: Decimal,
    active: bool,
}

#[derive(Debug, Clone)]
struct MemExtra {
    vendor_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    date: NaiveDate,
}

#[derive(Default)]
struct MemState {
    vendors: Vec<MemVendor>,
    products: HashMap<Uuid, MemProduct>,
    daily_needs: Vec<(Uuid, Uuid, i32)>,
    extras: Vec<MemExtra>,
    cancellations: Vec<CancelledOrder>,
    orders: Vec<Order>,
    items: HashMap<Uuid, Vec<NewOrderItem>>,
    failing_vendors: HashSet<Uuid>,
    panicking_vendors: HashSet<Uuid>,
    late_cancellations: Vec<(Uuid, NaiveDate)>,
    fail_vendor_listing: bool,
}

#[derive(Default)]
pub struct MemoryGenerationStore {
    state: RwLock<MemState>,
}

impl MemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_vendor(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.write().await.vendors.push(MemVendor {
            id,
            name: name.to_string(),
            address: format!("{} street", name),
            active: true,
        });
        id
    }

    pub async fn set_vendor_active(&self, vendor_id: Uuid, active: bool) {
        let mut state = self.state.write().await;
        if let Some(v) = state.vendors.iter_mut().find(|v| v.id == vendor_id) {
            v.active = active;
        }
    }

    pub async fn set_vendor_address(&self, vendor_id: Uuid, address: &str) {
        let mut state = self.state.write().await;
        if let Some(v) = state.vendors.iter_mut().find(|v| v.id == vendor_id) {
            v.address = address.to_string();
        }
    }

    pub async fn add_product(&self, name: &str, price: Decimal) -> Uuid {
        let id = Uuid::new_v4();
        self.state.write().await.products.insert(
            id,
            MemProduct {
                id,
                name: name.to_string(),
                unit: "kg".to_string(),
                price,
                active: true,
            },
        );
        id
    }

    pub async fn set_product_active(&self, product_id: Uuid, active: bool) {
        if let Some(p) = self.state.write().await.products.get_mut(&product_id) {
            p.active = active;
        }
    }

    pub async fn set_product_price(&self, product_id: Uuid, price: Decimal) {
        if let Some(p) = self.state.write().await.products.get_mut(&product_id) {
            p.price = price;
        }
    }

    pub async fn add_daily_need(&self, vendor_id: Uuid, product_id: Uuid, quantity: i32) {
        let mut state = self.state.write().await;
        // UNIQUE (vendor_id, product_id)
        state.daily_needs.retain(|(v, p, _)| !(*v == vendor_id && *p == product_id));
        state.daily_needs.push((vendor_id, product_id, quantity));
    }

    pub async fn add_extra_order(&self, vendor_id: Uuid, product_id: Uuid, quantity: i32, date: NaiveDate) {
        self.state.write().await.extras.push(MemExtra {
            vendor_id,
            product_id,
            quantity,
            date,
        });
    }

    pub async fn add_cancellation(&self, vendor_id: Uuid, date: NaiveDate, reason: Option<&str>) {
        self.state.write().await.cancellations.push(CancelledOrder {
            id: Uuid::new_v4(),
            vendor_id,
            cancel_date: date,
            reason: reason.map(str::to_string),
            created_at: Utc::now(),
        });
    }

    /// Faz `create_order_with_items` falhar para este vendedor com o
    /// cabeçalho e o primeiro item já escritos.
    pub async fn fail_orders_for(&self, vendor_id: Uuid) {
        self.state.write().await.failing_vendors.insert(vendor_id);
    }

    /// Faz `create_order_with_items` entrar em pânico para este vendedor.
    pub async fn panic_orders_for(&self, vendor_id: Uuid) {
        self.state.write().await.panicking_vendors.insert(vendor_id);
    }

    /// O vendedor cancela `date` logo depois da agregação, antes da escrita
    /// (dispara na checagem `order_exists`).
    pub async fn cancel_during_generation(&self, vendor_id: Uuid, date: NaiveDate) {
        self.state.write().await.late_cancellations.push((vendor_id, date));
    }

    pub async fn set_fail_vendor_listing(&self, fail: bool) {
        self.state.write().await.fail_vendor_listing = fail;
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.clone()
    }

    pub async fn orders_for(&self, vendor_id: Uuid) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .iter()
            .filter(|o| o.vendor_id == vendor_id)
            .cloned()
            .collect()
    }

    /// Total de linhas em `order_items`, de qualquer pedido.
    pub async fn item_row_count(&self) -> usize {
        self.state.read().await.items.values().map(Vec::len).sum()
    }

    pub async fn items_of(&self, order_id: Uuid) -> Vec<NewOrderItem> {
        self.state
            .read()
            .await
            .items
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn demand_line(product: &MemProduct, quantity: i32) -> DemandLine {
    DemandLine {
        product_id: product.id,
        product_name: product.name.clone(),
        unit: product.unit.clone(),
        quantity,
        price: product.price,
        product_active: product.active,
    }
}

// GROUP BY (vendor, product) sobre vendedores e produtos ativos
fn group_demand<'a>(
    state: &MemState,
    rows: impl Iterator<Item = (Uuid, Uuid, i32)> + 'a,
) -> Vec<VendorDemandRow> {
    let mut grouped: HashMap<(Uuid, Uuid), i64> = HashMap::new();
    for (vendor_id, product_id, quantity) in rows {
        *grouped.entry((vendor_id, product_id)).or_default() += i64::from(quantity);
    }

    let mut out: Vec<VendorDemandRow> = grouped
        .into_iter()
        .filter_map(|((vendor_id, product_id), quantity)| {
            let vendor = state.vendors.iter().find(|v| v.id == vendor_id && v.active)?;
            let product = state.products.get(&product_id).filter(|p| p.active)?;
            Some(VendorDemandRow {
                vendor_id,
                vendor_name: vendor.name.clone(),
                product_id,
                product_name: product.name.clone(),
                unit: product.unit.clone(),
                price: product.price,
                quantity,
            })
        })
        .collect();
    out.sort_by(|a, b| (&a.product_name, &a.vendor_name).cmp(&(&b.product_name, &b.vendor_name)));
    out
}

#[async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn find_cancellation(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<CancelledOrder>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .cancellations
            .iter()
            .find(|c| c.vendor_id == vendor_id && c.cancel_date == date)
            .cloned())
    }

    async fn list_daily_need_lines(&self, vendor_id: Uuid) -> Result<Vec<DemandLine>, AppError> {
        let state = self.state.read().await;
        let mut lines: Vec<DemandLine> = state
            .daily_needs
            .iter()
            .filter(|(v, _, _)| *v == vendor_id)
            .filter_map(|(_, p, q)| state.products.get(p).map(|product| demand_line(product, *q)))
            .collect();
        lines.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        Ok(lines)
    }

    async fn list_extra_order_lines(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DemandLine>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .extras
            .iter()
            .filter(|e| e.vendor_id == vendor_id && e.date == date)
            .filter_map(|e| state.products.get(&e.product_id).map(|p| demand_line(p, e.quantity)))
            .collect())
    }

    async fn list_active_vendors_with_daily_needs(&self) -> Result<Vec<VendorRef>, AppError> {
        let state = self.state.read().await;
        if state.fail_vendor_listing {
            return Err(AppError::InternalServerError(anyhow::anyhow!("listagem indisponível")));
        }
        let mut vendors: Vec<VendorRef> = state
            .vendors
            .iter()
            .filter(|v| v.active && state.daily_needs.iter().any(|(id, _, _)| *id == v.id))
            .map(|v| VendorRef {
                id: v.id,
                name: v.name.clone(),
                address: v.address.clone(),
            })
            .collect();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vendors)
    }

    async fn order_exists(&self, vendor_id: Uuid, date: NaiveDate) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        if let Some(pos) = state
            .late_cancellations
            .iter()
            .position(|(v, d)| *v == vendor_id && *d == date)
        {
            state.late_cancellations.remove(pos);
            state.cancellations.push(CancelledOrder {
                id: Uuid::new_v4(),
                vendor_id,
                cancel_date: date,
                reason: None,
                created_at: Utc::now(),
            });
        }
        Ok(state
            .orders
            .iter()
            .any(|o| o.vendor_id == vendor_id && o.order_date == date))
    }

    async fn create_order_with_items(&self, new_order: &NewOrder) -> Result<Order, AppError> {
        let mut state = self.state.write().await;

        if state.panicking_vendors.contains(&new_order.vendor_id) {
            panic!("pânico simulado na escrita do pedido");
        }
        if state
            .cancellations
            .iter()
            .any(|c| c.vendor_id == new_order.vendor_id && c.cancel_date == new_order.order_date)
        {
            return Err(AppError::DateCancelled {
                vendor_id: new_order.vendor_id,
                date: new_order.order_date,
            });
        }
        if state
            .orders
            .iter()
            .any(|o| o.vendor_id == new_order.vendor_id && o.order_date == new_order.order_date)
        {
            return Err(AppError::AlreadyGenerated {
                vendor_id: new_order.vendor_id,
                date: new_order.order_date,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            vendor_id: new_order.vendor_id,
            order_date: new_order.order_date,
            total_amount: new_order.total_amount,
            status: new_order.status,
            delivery_address: new_order.delivery_address.clone(),
            created_at: now,
            updated_at: now,
        };

        // Escreve como o Postgres faria dentro da transação; qualquer falha
        // desfaz o que já entrou
        state.orders.push(order.clone());
        for item in &new_order.items {
            state.items.entry(order.id).or_default().push(item.clone());
            if state.failing_vendors.contains(&new_order.vendor_id) {
                state.orders.retain(|o| o.id != order.id);
                state.items.remove(&order.id);
                return Err(AppError::InternalServerError(anyhow::anyhow!("falha simulada de escrita")));
            }
        }

        Ok(order)
    }

    async fn list_daily_need_demand(&self) -> Result<Vec<VendorDemandRow>, AppError> {
        let state = self.state.read().await;
        let rows: Vec<(Uuid, Uuid, i32)> = state.daily_needs.clone();
        Ok(group_demand(&state, rows.into_iter()))
    }

    async fn list_extra_order_demand(&self, date: NaiveDate) -> Result<Vec<VendorDemandRow>, AppError> {
        let state = self.state.read().await;
        let rows: Vec<(Uuid, Uuid, i32)> = state
            .extras
            .iter()
            .filter(|e| e.date == date)
            .map(|e| (e.vendor_id, e.product_id, e.quantity))
            .collect();
        Ok(group_demand(&state, rows.into_iter()))
    }

    async fn list_cancellations_for_date(&self, date: NaiveDate) -> Result<Vec<CancellationNotice>, AppError> {
        let state = self.state.read().await;
        let mut notices: Vec<CancellationNotice> = state
            .cancellations
            .iter()
            .filter(|c| c.cancel_date == date)
            .filter_map(|c| {
                let vendor = state.vendors.iter().find(|v| v.id == c.vendor_id)?;
                Some(CancellationNotice {
                    vendor_id: c.vendor_id,
                    vendor_name: vendor.name.clone(),
                    reason: c.reason.clone(),
                })
            })
            .collect();
        notices.sort_by(|a, b| a.vendor_name.cmp(&b.vendor_name));
        Ok(notices)
    }
}
