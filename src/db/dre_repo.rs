// src/db/dre_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dre::{CreateDreItemPayload, DreAccountLink, DreItem},
};

#[derive(Clone)]
pub struct DreRepository {
    pool: PgPool,
}

impl DreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<DreItem>, AppError> {
        let items = sqlx::query_as::<_, DreItem>("SELECT * FROM dre_items ORDER BY sort_order ASC, code ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn create(&self, payload: &CreateDreItemPayload) -> Result<DreItem, AppError> {
        sqlx::query_as::<_, DreItem>(
            r#"
            INSERT INTO dre_items (id, code, description, level, parent_id, kind, formula, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.code)
        .bind(&payload.description)
        .bind(payload.level)
        .bind(payload.parent_id)
        .bind(payload.kind)
        .bind(payload.formula.as_deref())
        .bind(payload.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    // Vincular item DRE <-> conta do plano de contas
    pub async fn link_account(&self, dre_item_id: Uuid, account_id: Uuid) -> Result<DreAccountLink, AppError> {
        sqlx::query_as::<_, DreAccountLink>(
            r#"
            INSERT INTO dre_account_links (id, dre_item_id, account_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dre_item_id)
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_db)
    }
}
