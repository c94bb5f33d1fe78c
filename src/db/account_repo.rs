// src/db/account_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::accounts::{Account, AccountKind, CreateAccountPayload, UpdateAccountPayload},
};

#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lista o plano de contas em ordem de código; filtros opcionais.
    pub async fn list(
        &self,
        kind: Option<AccountKind>,
        active: Option<bool>,
    ) -> Result<Vec<Account>, AppError> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT * FROM accounts
            WHERE ($1::account_kind IS NULL OR kind = $1)
              AND ($2::boolean IS NULL OR active = $2)
            ORDER BY code ASC
            "#,
        )
        .bind(kind)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Account>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(account)
    }

    pub async fn create<'e, E>(&self, executor: E, payload: &CreateAccountPayload) -> Result<Account, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (
                id, code, description, kind, level, parent_id,
                affects_result, expense_type, uses_goal, sort_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.code)
        .bind(&payload.description)
        .bind(payload.kind)
        .bind(payload.level)
        .bind(payload.parent_id)
        .bind(payload.affects_result)
        .bind(payload.expense_type)
        .bind(payload.uses_goal)
        .bind(payload.sort_order)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateAccountPayload,
    ) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET
                code           = COALESCE($2, code),
                description    = COALESCE($3, description),
                affects_result = COALESCE($4, affects_result),
                expense_type   = COALESCE($5, expense_type),
                uses_goal      = COALESCE($6, uses_goal),
                active         = COALESCE($7, active),
                sort_order     = COALESCE($8, sort_order),
                updated_at     = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.code.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.affects_result)
        .bind(payload.expense_type)
        .bind(payload.uses_goal)
        .bind(payload.active)
        .bind(payload.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    /// Exclusão lógica: a conta continua referenciada pelas movimentações.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE accounts SET active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
