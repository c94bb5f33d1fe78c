// src/models/invoices.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::movements::{validate_non_negative, MovementStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Active,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_import_source", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportSource {
    Manual,
    Email,
    SefazApi,
}

// Nota fiscal de compra (gera contas a pagar)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInvoice {
    pub id: Uuid,

    #[schema(example = "000123")]
    pub number: String,
    #[schema(example = "1")]
    pub series: Option<String>,
    pub access_key: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-02-10")]
    pub issued_on: NaiveDate,

    // Fornecedor
    #[schema(example = "12.345.678/0001-90")]
    pub supplier_document: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_city: Option<String>,
    pub supplier_state: Option<String>,

    // Valores
    #[schema(example = "1200.00")]
    pub total_amount: Decimal,
    pub products_amount: Option<Decimal>,
    pub services_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,

    pub import_source: ImportSource,
    pub status: InvoiceStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: Uuid,
    pub invoice_id: Uuid,

    #[schema(example = 1)]
    pub number: i32,

    #[schema(value_type = String, format = Date, example = "2024-03-10")]
    pub due_date: NaiveDate,

    #[schema(example = "400.00")]
    pub amount: Decimal,

    pub status: MovementStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub paid_on: Option<NaiveDate>,
    pub paid_amount: Option<Decimal>,

    /// Movimentação (conta a pagar) gerada para a parcela, se houver.
    pub movement_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    #[validate(length(min = 1, message = "required"))]
    pub number: String,
    pub series: Option<String>,

    #[validate(length(equal = 44, message = "A chave de acesso deve ter 44 dígitos."))]
    pub access_key: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub issued_on: NaiveDate,

    pub supplier_document: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_city: Option<String>,

    #[validate(length(equal = 2, message = "UF inválida."))]
    pub supplier_state: Option<String>,

    #[validate(custom(function = "validate_non_negative"))]
    pub total_amount: Decimal,
    pub products_amount: Option<Decimal>,
    pub services_amount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,

    pub import_source: Option<ImportSource>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentInput {
    #[validate(range(min = 1, message = "O número da parcela começa em 1."))]
    pub number: i32,

    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,

    #[validate(custom(function = "validate_non_negative"))]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddInstallmentsPayload {
    #[validate(length(min = 1, message = "Informe ao menos uma parcela."), nested)]
    pub installments: Vec<InstallmentInput>,

    /// Conta de despesa usada para gerar as contas a pagar.
    /// Sem ela, só as parcelas são gravadas.
    pub account_id: Option<Uuid>,
    pub bank_id: Option<Uuid>,
}
