// src/handlers/goals.rs

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
        i18n::Locale,
        rbac::{PermGoals, RequirePermission},
    },
    models::goals::{CreateGoalPayload, Goal, GoalDetail, GoalFilter},
};

// GET /api/goals
#[utoipa::path(
    get,
    path = "/api/goals",
    tag = "Goals",
    params(GoalFilter),
    responses(
        (status = 200, description = "Metas trimestrais", body = Vec<Goal>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_goals(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermGoals>,
    Query(filter): Query<GoalFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let goals = app_state
        .goal_service
        .list(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(goals))
}

// POST /api/goals
#[utoipa::path(
    post,
    path = "/api/goals",
    tag = "Goals",
    request_body = CreateGoalPayload,
    responses(
        (status = 201, description = "Meta criada e distribuída em 13 semanas", body = GoalDetail),
        (status = 404, description = "Conta não encontrada"),
        (status = 409, description = "Já existe meta para a conta no trimestre")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermGoals>,
    Json(payload): Json<CreateGoalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let detail = app_state
        .goal_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/goals/{id}
#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    tag = "Goals",
    responses(
        (status = 200, description = "Meta com semanas e realizado", body = GoalDetail),
        (status = 404, description = "Meta não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da meta")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermGoals>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state
        .goal_service
        .detail(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(detail))
}

// DELETE /api/goals/{id}
#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    tag = "Goals",
    responses(
        (status = 204, description = "Meta e semanas excluídas"),
        (status = 404, description = "Meta não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da meta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermGoals>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .goal_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
