// src/models/goals.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{accounts::AccountKind, movements::validate_non_negative};

/// Um trimestre é sempre distribuído em 13 semanas.
pub const WEEKS_PER_QUARTER: usize = 13;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub account_id: Uuid,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 1)]
    pub quarter: i16,

    #[schema(example = "130000.00")]
    pub quarterly_target: Decimal,

    pub kind: AccountKind,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub id: Uuid,
    pub goal_id: Uuid,

    #[schema(example = 1)]
    pub week_number: i16,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-07")]
    pub end_date: NaiveDate,

    #[schema(example = "10000.00")]
    pub weekly_target: Decimal,

    #[schema(example = "0")]
    pub actual: Decimal,
}

/// Meta com as 13 semanas (e o realizado de cada uma).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetail {
    #[serde(flatten)]
    pub goal: Goal,
    pub weeks: Vec<WeeklyGoal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalPayload {
    pub account_id: Uuid,

    #[validate(range(min = 1900, max = 9999, message = "Ano inválido."))]
    #[schema(example = 2024)]
    pub year: i32,

    #[validate(range(min = 1, max = 4, message = "O trimestre deve estar entre 1 e 4."))]
    #[schema(example = 1)]
    pub quarter: i16,

    #[validate(custom(function = "validate_non_negative"))]
    #[schema(example = "130000.00")]
    pub quarterly_target: Decimal,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GoalFilter {
    pub year: Option<i32>,
    pub quarter: Option<i16>,
}
