// src/db/returns_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::returns::{ReturnRequest, ReturnStatus},
};

#[derive(Clone)]
pub struct ReturnsRepository {
    pool: PgPool,
}

impl ReturnsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        order_id: Uuid,
        product_id: Option<Uuid>,
        quantity: Option<i32>,
        reason: &str,
    ) -> Result<ReturnRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ReturnRequest>(
            r#"
            INSERT INTO return_requests (vendor_id, order_id, product_id, quantity, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(order_id)
            .bind(product_id)
            .bind(quantity)
            .bind(reason)
            .fetch_one(executor)
            .await?;

        Ok(request)
    }

    pub async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<ReturnRequest>, AppError> {
        let requests = sqlx::query_as::<_, ReturnRequest>(
            "SELECT * FROM return_requests WHERE vendor_id = $1 ORDER BY created_at DESC",
        )
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    pub async fn list(
        &self,
        status: Option<ReturnStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ReturnRequest>, i64), AppError> {
        let requests = sqlx::query_as::<_, ReturnRequest>(
            r#"
            SELECT * FROM return_requests
            WHERE ($1::return_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM return_requests WHERE ($1::return_status IS NULL OR status = $1)",
        )
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok((requests, total))
    }

    /// Só resolve pedidos ainda pendentes; `None` se não existe ou já foi resolvido.
    pub async fn resolve<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: ReturnStatus,
        admin_notes: Option<&str>,
    ) -> Result<Option<ReturnRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let request = sqlx::query_as::<_, ReturnRequest>(
            r#"
            UPDATE return_requests
            SET status = $1, admin_notes = $2, resolved_at = NOW()
            WHERE id = $3 AND status = 'pending'
            RETURNING *
            "#,
        )
            .bind(status)
            .bind(admin_notes)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(request)
    }
}
