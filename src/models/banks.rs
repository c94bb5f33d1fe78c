// src/models/banks.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bank_account_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankAccountKind {
    Checking,   // Corrente
    Savings,    // Poupança
    Investment, // Investimento
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: Uuid,

    #[schema(example = "Banco do Brasil")]
    pub name: String,

    #[schema(example = "1234-5")]
    pub branch: Option<String>,

    #[schema(example = "98765-0")]
    pub account_number: Option<String>,

    pub kind: Option<BankAccountKind>,

    #[schema(example = "1500.50")]
    pub opening_balance: Decimal,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBankPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Banco do Brasil")]
    pub name: String,

    pub branch: Option<String>,
    pub account_number: Option<String>,
    pub kind: Option<BankAccountKind>,

    #[serde(default)]
    #[schema(example = "0.00")]
    pub opening_balance: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankPayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,

    pub branch: Option<String>,
    pub account_number: Option<String>,
    pub kind: Option<BankAccountKind>,
    pub opening_balance: Option<Decimal>,
    pub active: Option<bool>,
}
