// src/db/notification_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::notification::Notification};

// Notificações ficam só no banco; o app do vendedor busca por aqui
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        vendor_id: Uuid,
        title: &str,
        message: &str,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (vendor_id, title, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(vendor_id)
            .bind(title)
            .bind(message)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::VendorNotFound;
                    }
                }
                e.into()
            })
    }

    /// Uma linha por vendedor ativo. Retorna quantas foram criadas.
    pub async fn broadcast<'e, E>(&self, executor: E, title: &str, message: &str) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (vendor_id, title, message)
            SELECT id, $1, $2 FROM vendors WHERE active = TRUE
            "#,
        )
            .bind(title)
            .bind(message)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_by_vendor(
        &self,
        vendor_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Notification>, i64), AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE vendor_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
            .bind(vendor_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE vendor_id = $1")
            .bind(vendor_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((notifications, total))
    }

    pub async fn mark_read<'e, E>(&self, executor: E, id: Uuid, vendor_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND vendor_id = $2")
            .bind(id)
            .bind(vendor_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound(format!("notification {}", id)));
        }
        Ok(())
    }
}
