// src/db/payment_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::payment::Payment};

// Registro de pagamentos (sem liquidação: só o lançamento)
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        order_id: Option<Uuid>,
        amount: Decimal,
        method: &str,
        reference: Option<&str>,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (vendor_id, order_id, amount, method, reference)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(order_id)
            .bind(amount)
            .bind(method)
            .bind(reference)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ResourceNotFound("vendor or order".into());
                    }
                }
                e.into()
            })
    }

    pub async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE vendor_id = $1 ORDER BY paid_at DESC",
        )
            .bind(vendor_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(payments)
    }
}
