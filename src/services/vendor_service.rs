// src/services/vendor_service.rs
//
// Autoatendimento do vendedor: pedido fixo, extras e cancelamentos.

use std::collections::HashSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DemandRepository, OrderRepository, ProductRepository, VendorRepository},
    models::{
        demand::{CancelledOrder, DailyNeedView, ExtraOrder, ExtraOrderView},
        product::Product,
    },
    services::availability::today,
};

/// Rejeita datas no passado (hoje ainda vale).
fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if date < today {
        return Err(AppError::BadRequest(format!("date {} is in the past", date)));
    }
    Ok(())
}

fn ensure_unique_products(needs: &[(Uuid, i32)]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for (product_id, _) in needs {
        if !seen.insert(*product_id) {
            return Err(AppError::BadRequest(format!("duplicate product {}", product_id)));
        }
    }
    Ok(())
}

// Extra para uma data já gerada nunca entraria no pedido
fn ensure_date_open(vendor_id: Uuid, date: NaiveDate, order_generated: bool) -> Result<(), AppError> {
    if order_generated {
        return Err(AppError::AlreadyGenerated { vendor_id, date });
    }
    Ok(())
}

// Todo id pedido precisa existir e estar ativo
fn ensure_orderable(requested: &[Uuid], found: &[Product]) -> Result<(), AppError> {
    for id in requested {
        match found.iter().find(|p| p.id == *id) {
            None => return Err(AppError::ProductNotFound(*id)),
            Some(product) if !product.active => return Err(AppError::ProductInactive(*id)),
            Some(_) => {}
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct VendorService {
    pool: PgPool,
    vendor_repo: VendorRepository,
    demand_repo: DemandRepository,
    product_repo: ProductRepository,
    order_repo: OrderRepository,
}

impl VendorService {
    pub fn new(
        pool: PgPool,
        vendor_repo: VendorRepository,
        demand_repo: DemandRepository,
        product_repo: ProductRepository,
        order_repo: OrderRepository,
    ) -> Self {
        Self { pool, vendor_repo, demand_repo, product_repo, order_repo }
    }

    pub async fn list_daily_needs(&self, vendor_id: Uuid) -> Result<Vec<DailyNeedView>, AppError> {
        self.demand_repo.list_daily_needs(vendor_id).await
    }

    /// Substitui o pedido fixo inteiro: apaga tudo e insere a nova lista, numa
    /// transação só. Lista vazia = vendedor sem pedido fixo.
    ///
    /// O pedido fixo não tem data: vale a partir da próxima geração. Pedidos já
    /// gerados não mudam, então a lista de separação de uma data já gerada pode
    /// divergir deles depois de uma troca.
    pub async fn set_daily_needs(
        &self,
        vendor_id: Uuid,
        needs: &[(Uuid, i32)],
    ) -> Result<Vec<DailyNeedView>, AppError> {
        ensure_unique_products(needs)?;

        let mut tx = self.pool.begin().await?;

        let product_ids: Vec<Uuid> = needs.iter().map(|(id, _)| *id).collect();
        let products = self.product_repo.find_many(&mut *tx, &product_ids).await?;
        ensure_orderable(&product_ids, &products)?;

        let removed = self.demand_repo.delete_daily_needs(&mut *tx, vendor_id).await?;
        for (product_id, quantity) in needs {
            self.demand_repo
                .insert_daily_need(&mut *tx, vendor_id, *product_id, *quantity)
                .await?;
        }

        tx.commit().await?;
        tracing::info!(vendor_id = %vendor_id, removed, inserted = needs.len(), "Pedido fixo substituído");

        self.demand_repo.list_daily_needs(vendor_id).await
    }

    pub async fn add_extra_order(
        &self,
        vendor_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        order_date: NaiveDate,
    ) -> Result<ExtraOrder, AppError> {
        ensure_not_past(order_date, today())?;

        let mut tx = self.pool.begin().await?;

        let products = self.product_repo.find_many(&mut *tx, &[product_id]).await?;
        ensure_orderable(&[product_id], &products)?;

        self.vendor_repo.lock_for_update(&mut *tx, vendor_id).await?;
        let generated = self.order_repo.exists_for(&mut *tx, vendor_id, order_date).await?;
        ensure_date_open(vendor_id, order_date, generated)?;

        let extra = self
            .demand_repo
            .create_extra_order(&mut *tx, vendor_id, product_id, quantity, order_date)
            .await?;

        tx.commit().await?;
        Ok(extra)
    }

    pub async fn list_extra_orders(&self, vendor_id: Uuid) -> Result<Vec<ExtraOrderView>, AppError> {
        self.demand_repo.list_extra_orders(vendor_id, today()).await
    }

    /// Cancela a entrega de uma data. Depois que o pedido da data foi gerado o
    /// cancelamento não tem mais efeito e é recusado.
    pub async fn cancel_date(
        &self,
        vendor_id: Uuid,
        cancel_date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<CancelledOrder, AppError> {
        ensure_not_past(cancel_date, today())?;

        let mut tx = self.pool.begin().await?;

        // Serializa com a geração do pedido deste vendedor
        self.vendor_repo.lock_for_update(&mut *tx, vendor_id).await?;
        if self.order_repo.exists_for(&mut *tx, vendor_id, cancel_date).await? {
            return Err(AppError::CancellationLocked);
        }
        let cancellation = self
            .demand_repo
            .create_cancellation(&mut *tx, vendor_id, cancel_date, reason)
            .await?;

        tx.commit().await?;
        tracing::info!(vendor_id = %vendor_id, %cancel_date, "Entrega cancelada pelo vendedor");
        Ok(cancellation)
    }

    pub async fn list_cancellations(&self, vendor_id: Uuid) -> Result<Vec<CancelledOrder>, AppError> {
        self.demand_repo.list_cancellations(vendor_id, today()).await
    }

    pub async fn delete_cancellation(&self, vendor_id: Uuid, cancel_date: NaiveDate) -> Result<(), AppError> {
        self.demand_repo
            .delete_cancellation(&self.pool, vendor_id, cancel_date)
            .await
    }
}
