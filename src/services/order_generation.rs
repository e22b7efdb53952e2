// src/services/order_generation.rs
//
// Geração diária de pedidos: para uma data, junta necessidades diárias +
// extras do dia, descarta quem cancelou, e grava um pedido por vendedor.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::{sync::Semaphore, task::{self, JoinSet}};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GenerationStore,
    models::{
        demand::DemandLine,
        generation::{
            DraftLine, FailedVendor, GeneratedOrderSummary, GenerationReport, LineSource,
            SkipReason, SkippedVendor, VendorOrderDraft,
        },
        order::{NewOrder, NewOrderItem, Order, OrderStatus},
        vendor::VendorRef,
    },
    services::availability::{today, DateAvailability},
};

/// Resultado da agregação de um vendedor numa data.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Cancelled,
    NoActiveNeeds,
    Ready(VendorOrderDraft),
}

fn price_line(line: &DemandLine, source: LineSource) -> DraftLine {
    DraftLine {
        product_id: line.product_id,
        source,
        quantity: line.quantity,
        unit_price: line.price,
        total_price: Decimal::from(line.quantity) * line.price,
    }
}

// Produto desativado depois do cadastro da demanda: some do pedido, fica no log
fn active_lines(vendor_id: Uuid, lines: Vec<DemandLine>, source: LineSource) -> Vec<DemandLine> {
    lines
        .into_iter()
        .filter(|line| {
            if !line.product_active {
                tracing::warn!(
                    vendor_id = %vendor_id,
                    product_id = %line.product_id,
                    source = ?source,
                    "Produto inativo ignorado na geração"
                );
            }
            line.product_active
        })
        .collect()
}

/// Agrega a demanda de um vendedor para `date`.
///
/// Extras sozinhos não geram pedido: sem necessidade diária ativa o resultado
/// é `NoActiveNeeds`. Linhas de extra nunca são fundidas com a linha diária do
/// mesmo produto.
pub async fn compute_vendor_order(
    store: &dyn GenerationStore,
    vendor_id: Uuid,
    date: NaiveDate,
) -> Result<Aggregation, AppError> {
    let cancellation = store.find_cancellation(vendor_id, date).await?;
    let availability = DateAvailability::new(cancellation.map(|c| c.vendor_id));
    if !availability.is_vendor_active_for(vendor_id) {
        return Ok(Aggregation::Cancelled);
    }

    let daily = active_lines(
        vendor_id,
        store.list_daily_need_lines(vendor_id).await?,
        LineSource::DailyNeed,
    );
    if daily.is_empty() {
        return Ok(Aggregation::NoActiveNeeds);
    }

    let extras = active_lines(
        vendor_id,
        store.list_extra_order_lines(vendor_id, date).await?,
        LineSource::ExtraOrder,
    );

    let lines: Vec<DraftLine> = daily
        .iter()
        .map(|line| price_line(line, LineSource::DailyNeed))
        .chain(extras.iter().map(|line| price_line(line, LineSource::ExtraOrder)))
        .collect();
    let total_amount = lines.iter().map(|line| line.total_price).sum();

    Ok(Aggregation::Ready(VendorOrderDraft {
        vendor_id,
        order_date: date,
        lines,
        total_amount,
    }))
}

/// Grava o rascunho como pedido `pending`, com o endereço atual do vendedor.
pub async fn materialize(
    store: &dyn GenerationStore,
    vendor: &VendorRef,
    draft: VendorOrderDraft,
) -> Result<Order, AppError> {
    let new_order = NewOrder {
        vendor_id: draft.vendor_id,
        order_date: draft.order_date,
        total_amount: draft.total_amount,
        status: OrderStatus::Pending,
        delivery_address: vendor.address.clone(),
        items: draft
            .lines
            .into_iter()
            .map(|line| NewOrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_price: line.total_price,
            })
            .collect(),
    };

    store.create_order_with_items(&new_order).await
}

#[derive(Debug)]
enum VendorOutcome {
    Generated(GeneratedOrderSummary),
    Skipped(SkipReason),
}

async fn process_vendor(
    store: &dyn GenerationStore,
    semaphore: &Semaphore,
    vendor: &VendorRef,
    date: NaiveDate,
) -> Result<VendorOutcome, AppError> {
    let _permit = semaphore.acquire().await.map_err(anyhow::Error::from)?;

    let draft = match compute_vendor_order(store, vendor.id, date).await? {
        Aggregation::Cancelled => return Ok(VendorOutcome::Skipped(SkipReason::Cancelled)),
        Aggregation::NoActiveNeeds => return Ok(VendorOutcome::Skipped(SkipReason::NoActiveNeeds)),
        Aggregation::Ready(draft) => draft,
    };

    if store.order_exists(vendor.id, date).await? {
        return Ok(VendorOutcome::Skipped(SkipReason::AlreadyGenerated));
    }

    let item_count = draft.lines.len();
    match materialize(store, vendor, draft).await {
        Ok(order) => Ok(VendorOutcome::Generated(GeneratedOrderSummary {
            vendor_id: vendor.id,
            vendor_name: vendor.name.clone(),
            order_id: order.id,
            total_amount: order.total_amount,
            item_count,
        })),
        // Outra execução gravou entre a checagem e o insert
        Err(AppError::AlreadyGenerated { .. }) => Ok(VendorOutcome::Skipped(SkipReason::AlreadyGenerated)),
        // O vendedor cancelou depois da agregação; a escrita conferiu de novo
        Err(AppError::DateCancelled { .. }) => Ok(VendorOutcome::Skipped(SkipReason::Cancelled)),
        Err(e) => Err(e),
    }
}

#[derive(Clone)]
pub struct GenerationService {
    store: Arc<dyn GenerationStore>,
    concurrency: usize,
}

impl GenerationService {
    pub fn new(store: Arc<dyn GenerationStore>, concurrency: usize) -> Self {
        Self {
            store,
            concurrency: concurrency.max(1),
        }
    }

    /// Gera os pedidos de `date` (hoje, se ausente).
    ///
    /// Só falha por inteiro se a listagem inicial de vendedores falhar; erros
    /// de um vendedor vão para `failed` e os demais seguem. Rodar de novo para
    /// a mesma data não duplica pedidos: quem já tem pedido aparece em
    /// `skipped` com `already_generated`.
    pub async fn generate_daily_orders(&self, date: Option<NaiveDate>) -> Result<GenerationReport, AppError> {
        let date = date.unwrap_or_else(today);
        let vendors = self.store.list_active_vendors_with_daily_needs().await?;

        tracing::info!(%date, candidates = vendors.len(), "Iniciando geração diária de pedidos");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let mut running: HashMap<task::Id, VendorRef> = HashMap::new();
        for vendor in vendors {
            let store = Arc::clone(&self.store);
            let semaphore = Arc::clone(&semaphore);
            let task_vendor = vendor.clone();
            let handle = tasks.spawn(async move {
                process_vendor(store.as_ref(), &semaphore, &task_vendor, date).await
            });
            running.insert(handle.id(), vendor);
        }

        let mut orders = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        while let Some(joined) = tasks.join_next_with_id().await {
            // Tarefa em pânico também entra em `failed`, achada pelo id
            let (id, outcome) = match joined {
                Ok((id, outcome)) => (id, outcome),
                Err(join_err) => (
                    join_err.id(),
                    Err(AppError::InternalServerError(anyhow::anyhow!(
                        "tarefa de geração abortada: {join_err}"
                    ))),
                ),
            };
            let Some(vendor) = running.remove(&id) else {
                continue;
            };

            match outcome {
                Ok(VendorOutcome::Generated(summary)) => {
                    tracing::info!(
                        vendor_id = %summary.vendor_id,
                        order_id = %summary.order_id,
                        total = %summary.total_amount,
                        items = summary.item_count,
                        "Pedido gerado"
                    );
                    orders.push(summary);
                }
                Ok(VendorOutcome::Skipped(reason)) => {
                    tracing::debug!(vendor_id = %vendor.id, ?reason, "Vendedor ignorado");
                    skipped.push(SkippedVendor {
                        vendor_id: vendor.id,
                        vendor_name: vendor.name,
                        reason,
                    });
                }
                Err(e) => {
                    tracing::error!(vendor_id = %vendor.id, error = %e, "Falha ao gerar pedido");
                    failed.push(FailedVendor {
                        vendor_id: vendor.id,
                        vendor_name: vendor.name,
                        error: e.message_key().to_string(),
                    });
                }
            }
        }

        orders.sort_by(|a, b| (&a.vendor_name, a.vendor_id).cmp(&(&b.vendor_name, b.vendor_id)));
        skipped.sort_by(|a, b| (&a.vendor_name, a.vendor_id).cmp(&(&b.vendor_name, b.vendor_id)));
        failed.sort_by(|a, b| (&a.vendor_name, a.vendor_id).cmp(&(&b.vendor_name, b.vendor_id)));

        tracing::info!(
            %date,
            generated = orders.len(),
            skipped = skipped.len(),
            failed = failed.len(),
            "Geração diária concluída"
        );

        Ok(GenerationReport {
            date,
            generated_count: orders.len(),
            orders,
            skipped,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryGenerationStore;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn service(store: &Arc<MemoryGenerationStore>) -> GenerationService {
        GenerationService::new(store.clone(), 4)
    }

    #[tokio::test]
    async fn single_daily_need_generates_one_priced_order() {
        let store = Arc::new(MemoryGenerationStore::new());
        let a = store.add_vendor("Vendor A").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(a, x, 5).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();

        assert_eq!(report.generated_count, 1);
        assert_eq!(report.orders[0].vendor_name, "Vendor A");
        assert_eq!(report.orders[0].total_amount, Decimal::from(50));
        assert_eq!(report.orders[0].item_count, 1);

        let orders = store.orders_for(a).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert_eq!(orders[0].order_date, jan_10());
        assert_eq!(
            store.items_of(orders[0].id).await,
            vec![NewOrderItem {
                product_id: x,
                quantity: 5,
                unit_price: Decimal::from(10),
                total_price: Decimal::from(50),
            }]
        );
    }

    #[tokio::test]
    async fn cancelled_vendor_gets_nothing_even_with_extras() {
        let store = Arc::new(MemoryGenerationStore::new());
        let b = store.add_vendor("Vendor B").await;
        let y = store.add_product("ProductY", Decimal::from(20)).await;
        store.add_daily_need(b, y, 3).await;
        store.add_extra_order(b, y, 1, jan_10()).await;
        store.add_cancellation(b, jan_10(), Some("feriado")).await;

        let aggregation = compute_vendor_order(&*store, b, jan_10()).await.unwrap();
        assert_eq!(aggregation, Aggregation::Cancelled);

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        assert_eq!(report.generated_count, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::Cancelled);
        assert!(store.orders_for(b).await.is_empty());
    }

    #[tokio::test]
    async fn cancellation_only_applies_to_its_own_date() {
        let store = Arc::new(MemoryGenerationStore::new());
        let b = store.add_vendor("Vendor B").await;
        let y = store.add_product("ProductY", Decimal::from(20)).await;
        store.add_daily_need(b, y, 3).await;
        store.add_cancellation(b, jan_10().succ_opt().unwrap(), None).await;

        let aggregation = compute_vendor_order(&*store, b, jan_10()).await.unwrap();
        assert!(matches!(aggregation, Aggregation::Ready(_)));
    }

    #[tokio::test]
    async fn extras_alone_never_trigger_an_order() {
        let store = Arc::new(MemoryGenerationStore::new());
        let v = store.add_vendor("Vendor E").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_extra_order(v, x, 4, jan_10()).await;

        let aggregation = compute_vendor_order(&*store, v, jan_10()).await.unwrap();
        assert_eq!(aggregation, Aggregation::NoActiveNeeds);

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        assert_eq!(report.generated_count, 0);
        // Sem necessidade diária nem entra na lista de candidatos
        assert!(report.skipped.is_empty());
        assert!(store.orders().await.is_empty());
    }

    #[tokio::test]
    async fn only_inactive_needs_is_skipped_as_no_active_needs() {
        let store = Arc::new(MemoryGenerationStore::new());
        let v = store.add_vendor("Vendor F").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(v, x, 2).await;
        store.add_extra_order(v, x, 2, jan_10()).await;
        store.set_product_active(x, false).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        assert_eq!(report.generated_count, 0);
        assert_eq!(report.skipped[0].reason, SkipReason::NoActiveNeeds);
    }

    #[tokio::test]
    async fn same_product_extra_stays_a_separate_line() {
        let store = Arc::new(MemoryGenerationStore::new());
        let c = store.add_vendor("Vendor C").await;
        let z = store.add_product("ProductZ", Decimal::from(5)).await;
        store.add_daily_need(c, z, 2).await;
        store.add_extra_order(c, z, 1, jan_10()).await;

        let Aggregation::Ready(draft) = compute_vendor_order(&*store, c, jan_10()).await.unwrap() else {
            panic!("esperava um rascunho");
        };
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[0].source, LineSource::DailyNeed);
        assert_eq!(draft.lines[0].total_price, Decimal::from(10));
        assert_eq!(draft.lines[1].source, LineSource::ExtraOrder);
        assert_eq!(draft.lines[1].total_price, Decimal::from(5));
        assert_eq!(draft.total_amount, Decimal::from(15));

        service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        let order = &store.orders_for(c).await[0];
        assert_eq!(order.total_amount, Decimal::from(15));
        assert_eq!(store.items_of(order.id).await.len(), 2);
    }

    #[tokio::test]
    async fn extras_for_other_dates_are_ignored() {
        let store = Arc::new(MemoryGenerationStore::new());
        let c = store.add_vendor("Vendor C").await;
        let z = store.add_product("ProductZ", Decimal::from(5)).await;
        store.add_daily_need(c, z, 2).await;
        store.add_extra_order(c, z, 9, jan_10().succ_opt().unwrap()).await;

        let Aggregation::Ready(draft) = compute_vendor_order(&*store, c, jan_10()).await.unwrap() else {
            panic!("esperava um rascunho");
        };
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.total_amount, Decimal::from(10));
    }

    #[tokio::test]
    async fn inactive_products_are_dropped_from_the_order() {
        let store = Arc::new(MemoryGenerationStore::new());
        let v = store.add_vendor("Vendor G").await;
        let kept = store.add_product("Alface", Decimal::from(3)).await;
        let dropped = store.add_product("Batata", Decimal::from(4)).await;
        store.add_daily_need(v, kept, 2).await;
        store.add_daily_need(v, dropped, 10).await;
        store.add_extra_order(v, dropped, 1, jan_10()).await;
        store.set_product_active(dropped, false).await;

        let Aggregation::Ready(draft) = compute_vendor_order(&*store, v, jan_10()).await.unwrap() else {
            panic!("esperava um rascunho");
        };
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].product_id, kept);
        assert_eq!(draft.total_amount, Decimal::from(6));
    }

    #[tokio::test]
    async fn totals_always_match_the_items() {
        let store = Arc::new(MemoryGenerationStore::new());
        let v1 = store.add_vendor("V1").await;
        let v2 = store.add_vendor("V2").await;
        let p1 = store.add_product("P1", Decimal::new(1250, 2)).await;
        let p2 = store.add_product("P2", Decimal::new(399, 2)).await;
        store.add_daily_need(v1, p1, 3).await;
        store.add_daily_need(v1, p2, 7).await;
        store.add_daily_need(v2, p2, 1).await;
        store.add_extra_order(v2, p1, 4, jan_10()).await;
        store.add_extra_order(v2, p1, 2, jan_10()).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        assert_eq!(report.generated_count, 2);

        for order in store.orders().await {
            let items = store.items_of(order.id).await;
            for item in &items {
                assert_eq!(item.total_price, Decimal::from(item.quantity) * item.unit_price);
            }
            let sum: Decimal = items.iter().map(|i| i.total_price).sum();
            assert_eq!(order.total_amount, sum);
        }
        // Extras repetidos acumulam como linhas separadas
        assert_eq!(store.items_of(store.orders_for(v2).await[0].id).await.len(), 3);
    }

    #[tokio::test]
    async fn running_twice_does_not_duplicate_orders() {
        let store = Arc::new(MemoryGenerationStore::new());
        let a = store.add_vendor("Vendor A").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(a, x, 5).await;

        let first = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        let second = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();

        assert_eq!(first.generated_count, 1);
        assert_eq!(second.generated_count, 0);
        assert_eq!(second.skipped.len(), 1);
        assert_eq!(second.skipped[0].reason, SkipReason::AlreadyGenerated);
        assert_eq!(store.orders_for(a).await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_runs_produce_one_order_per_vendor() {
        let store = Arc::new(MemoryGenerationStore::new());
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        for i in 0..8 {
            let v = store.add_vendor(&format!("Vendor {i}")).await;
            store.add_daily_need(v, x, 1).await;
        }

        let (first, second) = (service(&store), service(&store));
        let (r1, r2) = tokio::join!(
            first.generate_daily_orders(Some(jan_10())),
            second.generate_daily_orders(Some(jan_10())),
        );
        let (r1, r2) = (r1.unwrap(), r2.unwrap());

        assert_eq!(r1.generated_count + r2.generated_count, 8);
        assert_eq!(store.orders().await.len(), 8);
    }

    #[tokio::test]
    async fn one_failing_vendor_does_not_abort_the_batch() {
        let store = Arc::new(MemoryGenerationStore::new());
        let ok = store.add_vendor("Alpha").await;
        let broken = store.add_vendor("Beta").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        let y = store.add_product("ProductY", Decimal::from(4)).await;
        store.add_daily_need(ok, x, 1).await;
        // Vários itens: a falha chega com cabeçalho e primeiro item já escritos
        store.add_daily_need(broken, x, 1).await;
        store.add_daily_need(broken, y, 2).await;
        store.add_extra_order(broken, y, 1, jan_10()).await;
        store.fail_orders_for(broken).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();

        assert_eq!(report.generated_count, 1);
        assert_eq!(report.orders[0].vendor_id, ok);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].vendor_id, broken);
        assert_eq!(report.failed[0].error, "internal");
        // Nada parcial ficou gravado para o vendedor com falha
        assert!(store.orders_for(broken).await.is_empty());
        assert_eq!(store.orders().await.len(), 1);
        assert_eq!(store.item_row_count().await, 1);
    }

    #[tokio::test]
    async fn panicking_vendor_task_is_reported_as_failed() {
        let store = Arc::new(MemoryGenerationStore::new());
        let ok = store.add_vendor("Alpha").await;
        let crashing = store.add_vendor("Gama").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(ok, x, 1).await;
        store.add_daily_need(crashing, x, 1).await;
        store.panic_orders_for(crashing).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();

        assert_eq!(report.generated_count, 1);
        assert_eq!(report.orders[0].vendor_id, ok);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].vendor_id, crashing);
        assert_eq!(report.failed[0].vendor_name, "Gama");
        assert_eq!(report.failed[0].error, "internal");
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn cancellation_after_aggregation_blocks_the_write() {
        let store = Arc::new(MemoryGenerationStore::new());
        let a = store.add_vendor("Vendor A").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(a, x, 5).await;

        let Aggregation::Ready(draft) = compute_vendor_order(&*store, a, jan_10()).await.unwrap() else {
            panic!("esperava um rascunho");
        };
        store.add_cancellation(a, jan_10(), Some("chuva")).await;

        let vendor = VendorRef {
            id: a,
            name: "Vendor A".into(),
            address: "Vendor A street".into(),
        };
        let result = materialize(&*store, &vendor, draft).await;
        assert!(matches!(result, Err(AppError::DateCancelled { vendor_id, .. }) if vendor_id == a));
        assert!(store.orders_for(a).await.is_empty());
    }

    #[tokio::test]
    async fn vendor_cancelling_mid_run_is_skipped_as_cancelled() {
        let store = Arc::new(MemoryGenerationStore::new());
        let a = store.add_vendor("Vendor A").await;
        let b = store.add_vendor("Vendor B").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(a, x, 5).await;
        store.add_daily_need(b, x, 2).await;
        store.cancel_during_generation(b, jan_10()).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();

        assert_eq!(report.generated_count, 1);
        assert_eq!(report.orders[0].vendor_id, a);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].vendor_id, b);
        assert_eq!(report.skipped[0].reason, SkipReason::Cancelled);
        assert!(report.failed.is_empty());
        assert!(store.orders_for(b).await.is_empty());
    }

    #[tokio::test]
    async fn vendor_listing_failure_fails_the_whole_call() {
        let store = Arc::new(MemoryGenerationStore::new());
        store.set_fail_vendor_listing(true).await;

        let result = service(&store).generate_daily_orders(Some(jan_10())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn order_snapshots_price_and_address() {
        let store = Arc::new(MemoryGenerationStore::new());
        let a = store.add_vendor("Vendor A").await;
        store.set_vendor_address(a, "Praça da Sé, banca 12").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(a, x, 5).await;

        service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        store.set_product_price(x, Decimal::from(99)).await;
        store.set_vendor_address(a, "Outro endereço").await;

        let order = &store.orders_for(a).await[0];
        assert_eq!(order.delivery_address, "Praça da Sé, banca 12");
        assert_eq!(store.items_of(order.id).await[0].unit_price, Decimal::from(10));
    }

    #[tokio::test]
    async fn inactive_vendors_are_not_candidates() {
        let store = Arc::new(MemoryGenerationStore::new());
        let v = store.add_vendor("Inativo").await;
        let x = store.add_product("ProductX", Decimal::from(10)).await;
        store.add_daily_need(v, x, 1).await;
        store.set_vendor_active(v, false).await;

        let report = service(&store).generate_daily_orders(Some(jan_10())).await.unwrap();
        assert_eq!(report.generated_count, 0);
        assert!(report.skipped.is_empty());
    }
}
