// src/models/employees.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,

    #[schema(example = "João da Silva")]
    pub name: String,

    #[schema(example = "123.456.789-09")]
    pub cpf: String,

    pub phone: Option<String>,
    pub email: Option<String>,

    #[schema(example = "Financeiro")]
    pub position: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub hired_on: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub dismissed_on: Option<NaiveDate>,

    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: String,

    #[validate(length(min = 11, max = 14, message = "CPF inválido."))]
    pub cpf: String,

    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub position: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub hired_on: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,

    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub position: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub hired_on: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub dismissed_on: Option<NaiveDate>,

    pub active: Option<bool>,
}
