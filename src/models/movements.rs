// src/models/movements.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    In,  // Entrada
    Out, // Saída
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStatus {
    Pending,  // Pendente
    Paid,     // Pago
    Canceled, // Cancelado
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_origin", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementOrigin {
    Manual,
    PurchaseInvoice,
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,

    pub kind: MovementKind,

    #[schema(example = "Pagamento Fornecedor XYZ")]
    pub description: String,

    pub account_id: Uuid,
    pub bank_id: Option<Uuid>,

    #[schema(example = "150.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-20")]
    pub movement_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-31")]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    pub status: MovementStatus,

    #[schema(example = "PIX")]
    pub payment_method: Option<String>,
    pub notes: Option<String>,

    pub origin: MovementOrigin,
    pub invoice_id: Option<Uuid>,
    pub user_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Valores nunca negativos: o sinal vem do `kind`.
pub(crate) fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub kind: MovementKind,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Venda balcão")]
    pub description: String,

    pub account_id: Uuid,
    pub bank_id: Option<Uuid>,

    #[validate(custom(function = "validate_non_negative"))]
    #[schema(example = "150.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-03-20")]
    pub movement_date: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    pub status: Option<MovementStatus>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovementPayload {
    pub kind: Option<MovementKind>,

    #[validate(length(min = 1, message = "required"))]
    pub description: Option<String>,

    pub account_id: Option<Uuid>,
    pub bank_id: Option<Uuid>,

    #[validate(custom(function = "validate_non_negative"))]
    pub amount: Option<Decimal>,

    #[schema(value_type = Option<String>, format = Date)]
    pub movement_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    pub status: Option<MovementStatus>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayMovementPayload {
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-25")]
    pub payment_date: Option<NaiveDate>,
    pub bank_id: Option<Uuid>,
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovementFilter {
    pub kind: Option<MovementKind>,
    pub account_id: Option<Uuid>,
    pub bank_id: Option<Uuid>,
    pub status: Option<MovementStatus>,
    #[param(value_type = Option<String>, format = Date)]
    pub start: Option<NaiveDate>,
    #[param(value_type = Option<String>, format = Date)]
    pub end: Option<NaiveDate>,
    #[param(example = 1)]
    pub page: Option<i64>,
    #[param(example = 50)]
    pub limit: Option<i64>,
}

impl MovementFilter {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 500;

    /// (limit, offset) já normalizados; página começa em 1.
    pub fn pagination(&self) -> (i64, i64) {
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let page = self.page.unwrap_or(1).max(1);
        // Página absurda vira o maior offset possível, nunca negativo.
        (limit, (page - 1).saturating_mul(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_to_first_page_of_fifty() {
        assert_eq!(MovementFilter::default().pagination(), (50, 0));
    }

    #[test]
    fn pagination_clamps_limit_and_page() {
        let filter = MovementFilter {
            page: Some(0),
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.pagination(), (500, 0));

        let filter = MovementFilter {
            page: Some(3),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(filter.pagination(), (20, 40));

        let filter = MovementFilter {
            page: Some(i64::MAX),
            limit: Some(500),
            ..Default::default()
        };
        let (limit, offset) = filter.pagination();
        assert_eq!(limit, 500);
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(validate_non_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(15000, 2)).is_ok());
    }
}
