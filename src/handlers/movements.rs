// src/handlers/movements.rs

use axum::{
    extract::{Path, Query, State},
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
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermMovements, RequirePermission},
    },
    models::{
        movements::{
            CreateMovementPayload, Movement, MovementFilter, PayMovementPayload, UpdateMovementPayload,
        },
        reports::{PeriodQuery, PeriodSummary},
    },
};

// GET /api/movements
#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    params(MovementFilter),
    responses(
        (status = 200, description = "Movimentações, mais recentes primeiro", body = Vec<Movement>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Query(filter): Query<MovementFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state
        .movement_service
        .list(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movements))
}

// GET /api/movements/summary
#[utoipa::path(
    get,
    path = "/api/movements/summary",
    tag = "Movements",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Entradas, saídas e saldo do período (só pagas)", body = PeriodSummary),
        (status = 400, description = "Período inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn movements_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let period = query
        .into_period()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let summary = app_state
        .movement_service
        .summary(period)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(summary))
}

// GET /api/movements/{id}
#[utoipa::path(
    get,
    path = "/api/movements/{id}",
    tag = "Movements",
    responses(
        (status = 200, description = "Movimentação", body = Movement),
        (status = 404, description = "Movimentação não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da movimentação")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let movement = app_state
        .movement_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movement))
}

// POST /api/movements
#[utoipa::path(
    post,
    path = "/api/movements",
    tag = "Movements",
    request_body = CreateMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada", body = Movement),
        (status = 422, description = "Conta ou banco inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(ctx): AuthenticatedUser,
    _guard: RequirePermission<PermMovements>,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state
        .movement_service
        .create(&payload, ctx.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// PUT /api/movements/{id}
#[utoipa::path(
    put,
    path = "/api/movements/{id}",
    tag = "Movements",
    request_body = UpdateMovementPayload,
    responses(
        (status = 200, description = "Movimentação atualizada", body = Movement),
        (status = 404, description = "Movimentação não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da movimentação")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state
        .movement_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movement))
}

// PATCH /api/movements/{id}/pay
#[utoipa::path(
    patch,
    path = "/api/movements/{id}/pay",
    tag = "Movements",
    request_body = PayMovementPayload,
    responses(
        (status = 200, description = "Baixa registrada", body = Movement),
        (status = 404, description = "Movimentação não encontrada"),
        (status = 422, description = "Movimentação cancelada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da movimentação")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let movement = app_state
        .movement_service
        .pay(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(movement))
}

// DELETE /api/movements/{id}
#[utoipa::path(
    delete,
    path = "/api/movements/{id}",
    tag = "Movements",
    responses(
        (status = 204, description = "Movimentação excluída"),
        (status = 404, description = "Movimentação não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da movimentação")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermMovements>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .movement_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
