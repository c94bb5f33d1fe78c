// src/db/bank_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::banks::{Bank, CreateBankPayload, UpdateBankPayload},
};

#[derive(Clone)]
pub struct BankRepository {
    pool: PgPool,
}

impl BankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn list(&self) -> Result<Vec<Bank>, AppError> {
        let banks = sqlx::query_as::<_, Bank>("SELECT * FROM banks ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(banks)
    }

    pub async fn create<'e, E>(&self, executor: E, payload: &CreateBankPayload) -> Result<Bank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Bank>(
            r#"
            INSERT INTO banks (id, name, branch, account_number, kind, opening_balance)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(payload.branch.as_deref())
        .bind(payload.account_number.as_deref())
        .bind(payload.kind)
        .bind(payload.opening_balance)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateBankPayload) -> Result<Option<Bank>, AppError> {
        sqlx::query_as::<_, Bank>(
            r#"
            UPDATE banks SET
                name            = COALESCE($2, name),
                branch          = COALESCE($3, branch),
                account_number  = COALESCE($4, account_number),
                kind            = COALESCE($5, kind),
                opening_balance = COALESCE($6, opening_balance),
                active          = COALESCE($7, active),
                updated_at      = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.branch.as_deref())
        .bind(payload.account_number.as_deref())
        .bind(payload.kind)
        .bind(payload.opening_balance)
        .bind(payload.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }
}
