// src/models/dre.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "dre_item_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DreItemKind {
    Group,
    Subtotal,
    Account,
}

// Linha do plano DRE (estrutura do relatório gerencial)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DreItem {
    pub id: Uuid,

    #[schema(example = "3.1")]
    pub code: String,

    #[schema(example = "Receita Operacional Bruta")]
    pub description: String,

    pub level: i16,
    pub parent_id: Option<Uuid>,
    pub kind: DreItemKind,

    #[schema(example = "soma")]
    pub formula: Option<String>,

    pub sort_order: i32,
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DreAccountLink {
    pub id: Uuid,
    pub dre_item_id: Uuid,
    pub account_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDreItemPayload {
    #[validate(length(min = 1, message = "required"))]
    pub code: String,

    #[validate(length(min = 1, message = "required"))]
    pub description: String,

    #[validate(range(min = 1, max = 9, message = "O nível deve estar entre 1 e 9."))]
    pub level: i16,

    pub parent_id: Option<Uuid>,
    pub kind: DreItemKind,
    pub formula: Option<String>,

    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountPayload {
    pub account_id: Uuid,
}
