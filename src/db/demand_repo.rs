// src/db/demand_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::demand::{CancelledOrder, DailyNeed, DailyNeedView, ExtraOrder, ExtraOrderView},
};

// Escritas e leituras do lado do vendedor: daily_needs, extra_orders, cancelled_orders
#[derive(Clone)]
pub struct DemandRepository {
    pool: PgPool,
}

impl DemandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  NECESSIDADES DIÁRIAS
    // =========================================================================

    pub async fn list_daily_needs(&self, vendor_id: Uuid) -> Result<Vec<DailyNeedView>, AppError> {
        let needs = sqlx::query_as::<_, DailyNeedView>(
            r#"
            SELECT
                dn.id, dn.product_id,
                p.name AS product_name, p.unit, p.price,
                p.active AS product_active,
                dn.quantity
            FROM daily_needs dn
            JOIN products p ON p.id = dn.product_id
            WHERE dn.vendor_id = $1
            ORDER BY p.name ASC
            "#,
        )
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(needs)
    }

    pub async fn delete_daily_needs<'e, E>(&self, executor: E, vendor_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM daily_needs WHERE vendor_id = $1")
            .bind(vendor_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert_daily_need<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<DailyNeed, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let need = sqlx::query_as::<_, DailyNeed>(
            r#"
            INSERT INTO daily_needs (vendor_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(executor)
            .await?;

        Ok(need)
    }

    // =========================================================================
    //  PEDIDOS EXTRAS
    // =========================================================================

    pub async fn create_extra_order<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        order_date: NaiveDate,
    ) -> Result<ExtraOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let extra = sqlx::query_as::<_, ExtraOrder>(
            r#"
            INSERT INTO extra_orders (vendor_id, product_id, quantity, order_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(product_id)
            .bind(quantity)
            .bind(order_date)
            .fetch_one(executor)
            .await?;

        Ok(extra)
    }

    pub async fn list_extra_orders(
        &self,
        vendor_id: Uuid,
        from_date: NaiveDate,
    ) -> Result<Vec<ExtraOrderView>, AppError> {
        let extras = sqlx::query_as::<_, ExtraOrderView>(
            r#"
            SELECT
                eo.id, eo.product_id,
                p.name AS product_name, p.unit, p.price,
                eo.quantity, eo.order_date, eo.created_at
            FROM extra_orders eo
            JOIN products p ON p.id = eo.product_id
            WHERE eo.vendor_id = $1 AND eo.order_date >= $2
            ORDER BY eo.order_date ASC, eo.created_at ASC
            "#,
        )
            .bind(vendor_id)
            .bind(from_date)
            .fetch_all(&self.pool)
            .await?;

        Ok(extras)
    }

    // =========================================================================
    //  CANCELAMENTOS
    // =========================================================================

    pub async fn create_cancellation<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        cancel_date: NaiveDate,
        reason: Option<&str>,
    ) -> Result<CancelledOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, CancelledOrder>(
            r#"
            INSERT INTO cancelled_orders (vendor_id, cancel_date, reason)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(cancel_date)
            .bind(reason)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                // Um cancelamento por (vendedor, data)
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::CancellationExists;
                    }
                }
                e.into()
            })
    }

    pub async fn list_cancellations(
        &self,
        vendor_id: Uuid,
        from_date: NaiveDate,
    ) -> Result<Vec<CancelledOrder>, AppError> {
        let cancellations = sqlx::query_as::<_, CancelledOrder>(
            r#"
            SELECT * FROM cancelled_orders
            WHERE vendor_id = $1 AND cancel_date >= $2
            ORDER BY cancel_date ASC
            "#,
        )
            .bind(vendor_id)
            .bind(from_date)
            .fetch_all(&self.pool)
            .await?;

        Ok(cancellations)
    }

    pub async fn delete_cancellation<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        cancel_date: NaiveDate,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cancelled_orders WHERE vendor_id = $1 AND cancel_date = $2")
            .bind(vendor_id)
            .bind(cancel_date)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CancellationNotFound);
        }
        Ok(())
    }
}
