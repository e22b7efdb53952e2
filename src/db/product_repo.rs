// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::product::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        unit: &str,
        price: Decimal,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, unit, price)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(name)
            .bind(unit)
            .bind(price)
            .fetch_one(executor)
            .await?;

        Ok(product)
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1 = FALSE OR active = TRUE)
            ORDER BY name ASC, id ASC
            "#,
        )
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    pub async fn find_many<'e, E>(&self, executor: E, ids: &[Uuid]) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(executor)
            .await?;

        Ok(products)
    }

    // Campos ausentes mantêm o valor atual
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        unit: Option<&str>,
        price: Option<Decimal>,
        active: Option<bool>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                unit = COALESCE($3, unit),
                price = COALESCE($4, price),
                active = COALESCE($5, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
            .bind(id)
            .bind(name)
            .bind(unit)
            .bind(price)
            .bind(active)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::ProductNotFound(id))
    }
}
