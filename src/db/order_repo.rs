// src/db/order_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderItemView, OrderStatus},
};

// Leituras de pedidos já materializados e mudanças de status.
// A criação fica com o GenerationStore (db/generation_repo.rs).
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, order_id: Uuid) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(executor)
            .await?;

        Ok(order)
    }

    pub async fn exists_for<'e, E>(&self, executor: E, vendor_id: Uuid, order_date: NaiveDate) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM orders WHERE vendor_id = $1 AND order_date = $2)",
        )
            .bind(vendor_id)
            .bind(order_date)
            .fetch_one(executor)
            .await?;

        Ok(exists)
    }

    pub async fn list_by_vendor(
        &self,
        vendor_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE vendor_id = $1
            ORDER BY order_date DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
            .bind(vendor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE vendor_id = $1")
            .bind(vendor_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((orders, total))
    }

    pub async fn list_by_date(
        &self,
        order_date: NaiveDate,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT o.* FROM orders o
            JOIN vendors v ON v.id = o.vendor_id
            WHERE o.order_date = $1 AND ($2::order_status IS NULL OR o.status = $2)
            ORDER BY v.name ASC, o.id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
            .bind(order_date)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE order_date = $1 AND ($2::order_status IS NULL OR status = $2)",
        )
            .bind(order_date)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok((orders, total))
    }

    pub async fn list_items<'e, E>(&self, executor: E, order_id: Uuid) -> Result<Vec<OrderItemView>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItemView>(
            r#"
            SELECT
                oi.id, oi.product_id,
                p.name AS product_name, p.unit,
                oi.quantity, oi.unit_price, oi.total_price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY p.name ASC, oi.id ASC
            "#,
        )
            .bind(order_id)
            .fetch_all(executor)
            .await?;

        Ok(items)
    }

    pub async fn vendor_name<'e, E>(&self, executor: E, vendor_id: Uuid) -> Result<String, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (name,): (String,) = sqlx::query_as("SELECT name FROM vendors WHERE id = $1")
            .bind(vendor_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::VendorNotFound)?;

        Ok(name)
    }

    /// Trava a linha do pedido até o fim da transação (FOR UPDATE).
    pub async fn lock_status<'e, E>(&self, executor: E, order_id: Uuid) -> Result<OrderStatus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (status,): (OrderStatus,) = sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        Ok(status)
    }

    pub async fn update_status<'e, E>(&self, executor: E, order_id: Uuid, status: OrderStatus) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
            .bind(status)
            .bind(order_id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::OrderNotFound)
    }
}
