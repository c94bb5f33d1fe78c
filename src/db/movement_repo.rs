// src/db/movement_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        movements::{
            Movement, MovementFilter, MovementKind, MovementOrigin, MovementStatus,
            UpdateMovementPayload,
        },
        reports::Period,
    },
};

/// Linha a inserir em `movements` (manual ou gerada por nota fiscal).
pub struct NewMovement<'a> {
    pub kind: MovementKind,
    pub description: &'a str,
    pub account_id: Uuid,
    pub bank_id: Option<Uuid>,
    pub amount: Decimal,
    pub movement_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub status: MovementStatus,
    pub payment_method: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub origin: MovementOrigin,
    pub invoice_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    /// Listagem paginada, mais recentes primeiro.
    pub async fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>, AppError> {
        let (limit, offset) = filter.pagination();

        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT * FROM movements
            WHERE ($1::movement_kind IS NULL OR kind = $1)
              AND ($2::uuid IS NULL OR account_id = $2)
              AND ($3::uuid IS NULL OR bank_id = $3)
              AND ($4::movement_status IS NULL OR status = $4)
              AND ($5::date IS NULL OR movement_date >= $5)
              AND ($6::date IS NULL OR movement_date <= $6)
            ORDER BY movement_date DESC, created_at DESC
            LIMIT $7 OFFSET $8
            "#,
        )
        .bind(filter.kind)
        .bind(filter.account_id)
        .bind(filter.bank_id)
        .bind(filter.status)
        .bind(filter.start)
        .bind(filter.end)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// Movimentações pagas no período, em ordem cronológica (insumo dos relatórios).
    pub async fn list_paid_in_period(
        &self,
        period: &Period,
        account_id: Option<Uuid>,
    ) -> Result<Vec<Movement>, AppError> {
        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT * FROM movements
            WHERE status = 'PAID'
              AND movement_date BETWEEN $1 AND $2
              AND ($3::uuid IS NULL OR account_id = $3)
            ORDER BY movement_date ASC, created_at ASC
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Movement>, AppError> {
        let movement = sqlx::query_as::<_, Movement>("SELECT * FROM movements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(movement)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    pub async fn create<'e, E>(&self, executor: E, new: NewMovement<'_>) -> Result<Movement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (
                id, kind, description, account_id, bank_id, amount,
                movement_date, due_date, payment_date, status,
                payment_method, notes, origin, invoice_id, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.kind)
        .bind(new.description)
        .bind(new.account_id)
        .bind(new.bank_id)
        .bind(new.amount)
        .bind(new.movement_date)
        .bind(new.due_date)
        .bind(new.payment_date)
        .bind(new.status)
        .bind(new.payment_method)
        .bind(new.notes)
        .bind(new.origin)
        .bind(new.invoice_id)
        .bind(new.user_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateMovementPayload,
    ) -> Result<Option<Movement>, AppError> {
        sqlx::query_as::<_, Movement>(
            r#"
            UPDATE movements SET
                kind           = COALESCE($2, kind),
                description    = COALESCE($3, description),
                account_id     = COALESCE($4, account_id),
                bank_id        = COALESCE($5, bank_id),
                amount         = COALESCE($6, amount),
                movement_date  = COALESCE($7, movement_date),
                due_date       = COALESCE($8, due_date),
                payment_date   = COALESCE($9, payment_date),
                status         = COALESCE($10, status),
                payment_method = COALESCE($11, payment_method),
                notes          = COALESCE($12, notes),
                updated_at     = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.kind)
        .bind(payload.description.as_deref())
        .bind(payload.account_id)
        .bind(payload.bank_id)
        .bind(payload.amount)
        .bind(payload.movement_date)
        .bind(payload.due_date)
        .bind(payload.payment_date)
        .bind(payload.status)
        .bind(payload.payment_method.as_deref())
        .bind(payload.notes.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    /// Baixa de pagamento: status PAID, data de pagamento e (opcionalmente) o banco.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        payment_date: NaiveDate,
        bank_id: Option<Uuid>,
    ) -> Result<Option<Movement>, AppError> {
        sqlx::query_as::<_, Movement>(
            r#"
            UPDATE movements SET
                status       = 'PAID',
                payment_date = $2,
                bank_id      = COALESCE($3, bank_id),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payment_date)
        .bind(bank_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM movements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_db)?;

        Ok(result.rows_affected() > 0)
    }
}
