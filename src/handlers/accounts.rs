// src/handlers/accounts.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{PermChartOfAccounts, RequirePermission},
    },
    models::accounts::{
        Account, AccountFilter, AccountHierarchy, AccountKind, CreateAccountPayload, UpdateAccountPayload,
    },
};

// GET /api/accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    tag = "Chart of Accounts",
    params(AccountFilter),
    responses(
        (status = 200, description = "Plano de contas em ordem de código", body = Vec<Account>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_accounts(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Query(filter): Query<AccountFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = app_state
        .account_service
        .list(&filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(accounts))
}

// GET /api/accounts/hierarchy/{kind}
#[utoipa::path(
    get,
    path = "/api/accounts/hierarchy/{kind}",
    tag = "Chart of Accounts",
    responses(
        (status = 200, description = "Árvore das contas ativas; contas inconsistentes em `orphans`", body = AccountHierarchy),
        (status = 400, description = "Tipo inválido")
    ),
    params(
        ("kind" = String, Path, description = "REVENUE/RECEITA ou EXPENSE/DESPESA")
    ),
    security(("api_jwt" = []))
)]
pub async fn account_hierarchy(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = AccountKind::parse(&kind).ok_or_else(|| {
        let mut error = ValidationError::new("kind");
        error.message = Some("O tipo deve ser RECEITA ou DESPESA.".into());
        let mut errors = ValidationErrors::new();
        errors.add("kind", error);
        AppError::ValidationError(errors).to_api_error(&locale, &app_state.i18n_store)
    })?;

    let hierarchy = app_state
        .account_service
        .hierarchy(kind)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(hierarchy))
}

// GET /api/accounts/{id}
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    tag = "Chart of Accounts",
    responses(
        (status = 200, description = "Conta", body = Account),
        (status = 404, description = "Conta não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da conta")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let account = app_state
        .account_service
        .get(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(account))
}

// POST /api/accounts
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = "Chart of Accounts",
    request_body = CreateAccountPayload,
    responses(
        (status = 201, description = "Conta criada", body = Account),
        (status = 409, description = "Código já existe"),
        (status = 422, description = "Conta pai inexistente, de outro tipo ou em nível incompatível")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let account = app_state
        .account_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(account)))
}

// PUT /api/accounts/{id}
#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    tag = "Chart of Accounts",
    request_body = UpdateAccountPayload,
    responses(
        (status = 200, description = "Conta atualizada", body = Account),
        (status = 404, description = "Conta não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da conta")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let account = app_state
        .account_service
        .update(id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(account))
}

// DELETE /api/accounts/{id} (inativa a conta)
#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    tag = "Chart of Accounts",
    responses(
        (status = 204, description = "Conta inativada"),
        (status = 404, description = "Conta não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da conta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_account(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermChartOfAccounts>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .account_service
        .deactivate(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
