// src/models/reports.rs
//
// As chaves JSON dos relatórios seguem o front-end (entradas/saidas/saldo).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{accounts::Account, movements::MovementKind},
};

/// Intervalo fechado [start, end] usado por todos os relatórios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-03-31")]
    pub end: NaiveDate,
}

/// Query string crua do período; datas ausentes ou mal formadas viram
/// erro de validação no formato padrão da API.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    #[param(value_type = String, format = Date, example = "2024-01-01")]
    pub start: Option<String>,
    #[param(value_type = String, format = Date, example = "2024-03-31")]
    pub end: Option<String>,
}

impl PeriodQuery {
    pub fn into_period(self) -> Result<Period, AppError> {
        let start = parse_date("start", self.start.as_deref())?;
        let end = parse_date("end", self.end.as_deref())?;
        Ok(Period { start, end })
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, AppError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::invalid_field(field, "required", "Data obrigatória (AAAA-MM-DD)."))?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_field(field, "date", "Data inválida; use AAAA-MM-DD."))
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PeriodSummary {
    #[serde(rename = "periodo")]
    pub period: Period,
    #[serde(rename = "entradas")]
    #[schema(example = "100.00")]
    pub inflows: Decimal,
    #[serde(rename = "saidas")]
    #[schema(example = "40.00")]
    pub outflows: Decimal,
    #[serde(rename = "saldo")]
    #[schema(example = "60.00")]
    pub balance: Decimal,
}

/// Total assinado de uma conta no período (entradas somam, saídas subtraem).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountTotal {
    pub account_id: Uuid,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DreLine {
    pub account_id: Uuid,
    /// `None` quando a movimentação aponta para uma conta que não existe mais.
    pub account: Option<Account>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DreReport {
    #[serde(rename = "periodo")]
    pub period: Period,
    #[serde(rename = "dados")]
    pub lines: Vec<DreLine>,
    #[serde(rename = "resultado")]
    pub result: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CashFlowEntry {
    #[serde(rename = "data")]
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Saldo acumulado até esta linha.
    #[serde(rename = "saldo")]
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: Option<&str>, end: Option<&str>) -> PeriodQuery {
        PeriodQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    fn failed_field(result: Result<Period, AppError>) -> String {
        match result {
            Err(AppError::ValidationError(errors)) => {
                errors.field_errors().keys().next().map(|k| k.to_string()).unwrap_or_default()
            }
            other => panic!("esperava erro de validação, veio {other:?}"),
        }
    }

    #[test]
    fn well_formed_query_becomes_period() {
        let period = query(Some("2024-01-01"), Some("2024-03-31")).into_period().unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn missing_or_blank_dates_point_at_the_field() {
        assert_eq!(failed_field(query(None, Some("2024-03-31")).into_period()), "start");
        assert_eq!(failed_field(query(Some("2024-01-01"), Some("  ")).into_period()), "end");
    }

    #[test]
    fn malformed_date_is_a_validation_error() {
        assert_eq!(failed_field(query(Some("31/01/2024"), Some("2024-03-31")).into_period()), "start");
    }
}
