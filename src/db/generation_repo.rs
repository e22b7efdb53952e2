// src/db/generation_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, VendorRepository},
    models::{
        demand::{CancellationNotice, CancelledOrder, DemandLine, VendorDemandRow},
        order::{NewOrder, Order},
        vendor::VendorRef,
    },
};

/// Tudo o que o motor de geração e a lista de separação leem e escrevem.
///
/// Leituras "de demanda" (`list_daily_need_demand`, `list_extra_order_demand`)
/// já vêm restritas a vendedores e produtos ativos. As linhas por vendedor
/// (`list_daily_need_lines`, `list_extra_order_lines`) trazem `product_active`
/// para que o agregador descarte e registre produtos desativados.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    async fn find_cancellation(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<CancelledOrder>, AppError>;

    async fn list_daily_need_lines(&self, vendor_id: Uuid) -> Result<Vec<DemandLine>, AppError>;

    async fn list_extra_order_lines(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DemandLine>, AppError>;

    async fn list_active_vendors_with_daily_needs(&self) -> Result<Vec<VendorRef>, AppError>;

    async fn order_exists(&self, vendor_id: Uuid, date: NaiveDate) -> Result<bool, AppError>;

    /// Grava cabeçalho + itens atomicamente. Nada é gravado se já existir
    /// pedido para (vendedor, data) (`AppError::AlreadyGenerated`) ou se o
    /// vendedor cancelou a data nesse meio tempo (`AppError::DateCancelled`).
    async fn create_order_with_items(&self, order: &NewOrder) -> Result<Order, AppError>;

    async fn list_daily_need_demand(&self) -> Result<Vec<VendorDemandRow>, AppError>;

    async fn list_extra_order_demand(&self, date: NaiveDate) -> Result<Vec<VendorDemandRow>, AppError>;

    async fn list_cancellations_for_date(&self, date: NaiveDate) -> Result<Vec<CancellationNotice>, AppError>;
}

#[derive(Clone)]
pub struct PgGenerationStore {
    pool: PgPool,
    orders: OrderRepository,
    vendors: VendorRepository,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        let orders = OrderRepository::new(pool.clone());
        let vendors = VendorRepository::new(pool.clone());
        Self { pool, orders, vendors }
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn find_cancellation(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<CancelledOrder>, AppError> {
        let cancellation = sqlx::query_as::<_, CancelledOrder>(
            "SELECT * FROM cancelled_orders WHERE vendor_id = $1 AND cancel_date = $2",
        )
            .bind(vendor_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        Ok(cancellation)
    }

    async fn list_daily_need_lines(&self, vendor_id: Uuid) -> Result<Vec<DemandLine>, AppError> {
        let lines = sqlx::query_as::<_, DemandLine>(
            r#"
            SELECT
                dn.product_id,
                p.name AS product_name,
                p.unit,
                dn.quantity,
                p.price,
                p.active AS product_active
            FROM daily_needs dn
            JOIN products p ON p.id = dn.product_id
            WHERE dn.vendor_id = $1
            ORDER BY p.name ASC, dn.product_id ASC
            "#,
        )
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    async fn list_extra_order_lines(
        &self,
        vendor_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<DemandLine>, AppError> {
        // Extras não são somados: cada linha vira um item
        let lines = sqlx::query_as::<_, DemandLine>(
            r#"
            SELECT
                eo.product_id,
                p.name AS product_name,
                p.unit,
                eo.quantity,
                p.price,
                p.active AS product_active
            FROM extra_orders eo
            JOIN products p ON p.id = eo.product_id
            WHERE eo.vendor_id = $1 AND eo.order_date = $2
            ORDER BY eo.created_at ASC, eo.id ASC
            "#,
        )
            .bind(vendor_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(lines)
    }

    async fn list_active_vendors_with_daily_needs(&self) -> Result<Vec<VendorRef>, AppError> {
        let vendors = sqlx::query_as::<_, VendorRef>(
            r#"
            SELECT v.id, v.name, v.address
            FROM vendors v
            WHERE v.active = TRUE
              AND EXISTS (SELECT 1 FROM daily_needs dn WHERE dn.vendor_id = v.id)
            ORDER BY v.name ASC, v.id ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(vendors)
    }

    async fn order_exists(&self, vendor_id: Uuid, date: NaiveDate) -> Result<bool, AppError> {
        self.orders.exists_for(&self.pool, vendor_id, date).await
    }

    async fn create_order_with_items(&self, new_order: &NewOrder) -> Result<Order, AppError> {
        // Pedido + itens: tudo ou nada
        let mut tx = self.pool.begin().await?;

        // Mesma trava do cancel_date: o cancelamento ou já está visível aqui,
        // ou só entra depois do commit e aí encontra o pedido
        self.vendors.lock_for_update(&mut *tx, new_order.vendor_id).await?;
        let cancelled: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM cancelled_orders WHERE vendor_id = $1 AND cancel_date = $2)",
        )
            .bind(new_order.vendor_id)
            .bind(new_order.order_date)
            .fetch_one(&mut *tx)
            .await?;
        if cancelled {
            return Err(AppError::DateCancelled {
                vendor_id: new_order.vendor_id,
                date: new_order.order_date,
            });
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (vendor_id, order_date, total_amount, status, delivery_address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (vendor_id, order_date) DO NOTHING
            RETURNING *
            "#,
        )
            .bind(new_order.vendor_id)
            .bind(new_order.order_date)
            .bind(new_order.total_amount)
            .bind(new_order.status)
            .bind(&new_order.delivery_address)
            .fetch_optional(&mut *tx)
            .await?
            // Sem linha retornada = conflito; o drop do tx faz o rollback
            .ok_or(AppError::AlreadyGenerated {
                vendor_id: new_order.vendor_id,
                date: new_order.order_date,
            })?;

        for item in &new_order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price, total_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
                .bind(order.id)
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(item.unit_price)
                .bind(item.total_price)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    async fn list_daily_need_demand(&self) -> Result<Vec<VendorDemandRow>, AppError> {
        let rows = sqlx::query_as::<_, VendorDemandRow>(
            r#"
            SELECT
                v.id AS vendor_id, v.name AS vendor_name,
                p.id AS product_id, p.name AS product_name, p.unit, p.price,
                SUM(dn.quantity)::BIGINT AS quantity
            FROM daily_needs dn
            JOIN vendors v ON v.id = dn.vendor_id
            JOIN products p ON p.id = dn.product_id
            WHERE v.active = TRUE AND p.active = TRUE
            GROUP BY v.id, v.name, p.id, p.name, p.unit, p.price
            ORDER BY p.name ASC, v.name ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_extra_order_demand(&self, date: NaiveDate) -> Result<Vec<VendorDemandRow>, AppError> {
        let rows = sqlx::query_as::<_, VendorDemandRow>(
            r#"
            SELECT
                v.id AS vendor_id, v.name AS vendor_name,
                p.id AS product_id, p.name AS product_name, p.unit, p.price,
                SUM(eo.quantity)::BIGINT AS quantity
            FROM extra_orders eo
            JOIN vendors v ON v.id = eo.vendor_id
            JOIN products p ON p.id = eo.product_id
            WHERE eo.order_date = $1 AND v.active = TRUE AND p.active = TRUE
            GROUP BY v.id, v.name, p.id, p.name, p.unit, p.price
            ORDER BY p.name ASC, v.name ASC
            "#,
        )
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_cancellations_for_date(&self, date: NaiveDate) -> Result<Vec<CancellationNotice>, AppError> {
        let notices = sqlx::query_as::<_, CancellationNotice>(
            r#"
            SELECT co.vendor_id, v.name AS vendor_name, co.reason
            FROM cancelled_orders co
            JOIN vendors v ON v.id = co.vendor_id
            WHERE co.cancel_date = $1
            ORDER BY v.name ASC
            "#,
        )
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(notices)
    }
}
