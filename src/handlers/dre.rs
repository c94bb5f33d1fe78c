// src/handlers/dre.rs

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
        rbac::{PermDrePlan, RequirePermission},
    },
    models::dre::{CreateDreItemPayload, DreAccountLink, DreItem, LinkAccountPayload},
};

// GET /api/dre-plan
#[utoipa::path(
    get,
    path = "/api/dre-plan",
    tag = "DRE Plan",
    responses(
        (status = 200, description = "Estrutura da DRE", body = Vec<DreItem>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_dre_items(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermDrePlan>,
) -> Result<impl IntoResponse, ApiError> {
    let items = app_state
        .dre_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(items))
}

// POST /api/dre-plan
#[utoipa::path(
    post,
    path = "/api/dre-plan",
    tag = "DRE Plan",
    request_body = CreateDreItemPayload,
    responses(
        (status = 201, description = "Item criado", body = DreItem)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dre_item(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermDrePlan>,
    Json(payload): Json<CreateDreItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let item = app_state
        .dre_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(item)))
}

// POST /api/dre-plan/{id}/accounts
#[utoipa::path(
    post,
    path = "/api/dre-plan/{id}/accounts",
    tag = "DRE Plan",
    request_body = LinkAccountPayload,
    responses(
        (status = 201, description = "Conta vinculada ao item", body = DreAccountLink),
        (status = 409, description = "Vínculo já existe"),
        (status = 422, description = "Item ou conta inexistente")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do item DRE")
    ),
    security(("api_jwt" = []))
)]
pub async fn link_dre_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermDrePlan>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let link = app_state
        .dre_service
        .link_account(id, payload.account_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(link)))
}
