// src/handlers/banks.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermBanks, RequirePermission},
    },
    models::banks::{Bank, CreateBankPayload, UpdateBankPayload},
};

// GET /api/banks
#[utoipa::path(
    get,
    path = "/api/banks",
    tag = "Banks",
    responses(
        (status = 200, description = "Contas bancárias", body = Vec<Bank>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_banks(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermBanks>,
) -> Result<impl IntoResponse, ApiError> {
    let banks = app_state
        .bank_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(banks))
}

// POST /api/banks
#[utoipa::path(
    post,
    path = "/api/banks",
    tag = "Banks",
    request_body = CreateBankPayload,
    responses(
        (status = 201, description = "Conta bancária cadastrada", body = Bank)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_bank(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermBanks>,
    Json(payload): Json<CreateBankPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let bank = app_state
        .bank_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(bank)))
}

// PUT /api/banks/{id}
#[utoipa::path(
    put,
    path = "/api/banks/{id}",
    tag = "Banks",
    request_body = UpdateBankPayload,
    responses(
        (status = 200, description = "Conta bancária atualizada", body = Bank),
        (status = 404, description = "Conta bancária não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da conta bancária")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_bank(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermBanks>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBankPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let bank = app_state
        .bank_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(bank))
}
