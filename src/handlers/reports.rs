// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermReports, RequirePermission},
    },
    models::reports::{CashFlowEntry, DreReport, PeriodQuery},
};

// GET /api/reports/dre
#[utoipa::path(
    get,
    path = "/api/reports/dre",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Totais por conta no período", body = DreReport),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn dre_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermReports>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = query
        .into_period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state
        .report_service
        .dre(period)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(report))
}

// GET /api/reports/cash-flow
#[utoipa::path(
    get,
    path = "/api/reports/cash-flow",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Fluxo de caixa com saldo acumulado", body = Vec<CashFlowEntry>),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn cash_flow_report(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermReports>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = query
        .into_period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let rows = app_state
        .report_service
        .cash_flow(period)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}
