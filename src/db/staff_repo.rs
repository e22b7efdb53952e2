// src/db/staff_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::auth::Staff};

// Equipe do armazém (admins). Cadastro é feito direto no banco.
#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(staff)
    }
}
