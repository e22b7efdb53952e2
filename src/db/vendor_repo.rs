// src/db/vendor_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::vendor::Vendor};

// Repositório de vendedores: tabela 'vendors'
#[derive(Clone)]
pub struct VendorRepository {
    pool: PgPool,
}

impl VendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: &str,
        password_hash: &str,
        address: &str,
    ) -> Result<Vendor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (name, phone, password_hash, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
            .bind(name)
            .bind(phone)
            .bind(password_hash)
            .bind(address)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                // Telefone é único
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::PhoneAlreadyExists;
                    }
                }
                e.into()
            })
    }

    pub async fn find_by_phone<'e, E>(&self, executor: E, phone: &str) -> Result<Option<Vendor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE phone = $1")
            .bind(phone)
            .fetch_optional(executor)
            .await?;

        Ok(vendor)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Vendor>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(vendor)
    }

    /// Trava a linha do vendedor até o fim da transação.
    ///
    /// Geração de pedido, cancelamento e extras de um mesmo vendedor passam por
    /// aqui, então nunca se intercalam.
    pub async fn lock_for_update<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM vendors WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::VendorNotFound)?;

        Ok(())
    }

    /// Página de vendedores + total, numa leitura só da pool.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<(Vec<Vendor>, i64), AppError> {
        let vendors = sqlx::query_as::<_, Vendor>(
            "SELECT * FROM vendors ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2",
        )
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.pool)
            .await?;

        Ok((vendors, total))
    }

    pub async fn set_active<'e, E>(&self, executor: E, id: Uuid, active: bool) -> Result<Vendor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Vendor>(
            "UPDATE vendors SET active = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
            .bind(active)
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or(AppError::VendorNotFound)
    }
}
