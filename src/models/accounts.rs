// src/models/accounts.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Revenue, // Receita
    Expense, // Despesa
}

impl AccountKind {
    /// Aceita o nome em inglês ou em português, sem diferenciar maiúsculas.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "REVENUE" | "RECEITA" => Some(AccountKind::Revenue),
            "EXPENSE" | "DESPESA" => Some(AccountKind::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseType {
    Fixed,
    Variable,
}

pub const MIN_LEVEL: i16 = 1;
pub const MAX_LEVEL: i16 = 9;

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "1.1.01")]
    pub code: String,

    #[schema(example = "Vendas de Serviços")]
    pub description: String,

    pub kind: AccountKind,

    #[schema(example = 3)]
    pub level: i16,

    pub parent_id: Option<Uuid>,

    #[schema(example = true)]
    pub affects_result: bool,

    pub expense_type: Option<ExpenseType>,

    #[schema(example = false)]
    pub uses_goal: bool,

    #[schema(example = true)]
    pub active: bool,

    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Um nó da árvore do plano de contas.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    #[serde(flatten)]
    pub account: Account,

    #[schema(no_recursion)]
    pub children: Vec<AccountNode>,
}

/// Resultado da montagem da hierarquia: a floresta válida e as contas
/// cujo vínculo com o pai está quebrado (pai inexistente ou nível errado).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountHierarchy {
    pub roots: Vec<AccountNode>,
    pub orphans: Vec<AccountNode>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountPayload {
    #[validate(length(min = 1, max = 50, message = "required"))]
    #[schema(example = "1.1.01")]
    pub code: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Vendas de Serviços")]
    pub description: String,

    pub kind: AccountKind,

    #[validate(range(min = 1, max = 9, message = "O nível deve estar entre 1 e 9."))]
    #[schema(example = 3)]
    pub level: i16,

    pub parent_id: Option<Uuid>,

    #[serde(default = "default_true")]
    pub affects_result: bool,

    pub expense_type: Option<ExpenseType>,

    #[serde(default)]
    pub uses_goal: bool,

    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountPayload {
    #[validate(length(min = 1, max = 50, message = "required"))]
    pub code: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,

    pub affects_result: Option<bool>,
    pub expense_type: Option<ExpenseType>,
    pub uses_goal: Option<bool>,
    pub active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AccountFilter {
    pub kind: Option<AccountKind>,
    pub active: Option<bool>,
}
