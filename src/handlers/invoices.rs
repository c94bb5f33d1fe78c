// src/handlers/invoices.rs

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
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermInvoices, RequirePermission},
    },
    models::invoices::{AddInstallmentsPayload, CreateInvoicePayload, Installment, PurchaseInvoice},
};

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Invoices",
    responses(
        (status = 200, description = "Notas fiscais de compra", body = Vec<PurchaseInvoice>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermInvoices>,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = app_state
        .invoice_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(invoices))
}

// POST /api/invoices
#[utoipa::path(
    post,
    path = "/api/invoices",
    tag = "Invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Nota registrada", body = PurchaseInvoice),
        (status = 409, description = "Chave de acesso já cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequirePermission<PermInvoices>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let invoice = app_state
        .invoice_service
        .create(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// POST /api/invoices/{id}/installments
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/installments",
    tag = "Invoices",
    request_body = AddInstallmentsPayload,
    responses(
        (status = 201, description = "Parcelas gravadas (e contas a pagar geradas, se houver conta)", body = Vec<Installment>),
        (status = 404, description = "Nota não encontrada"),
        (status = 422, description = "Conta ou banco inexistente")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da nota fiscal")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_installments(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(ctx): AuthenticatedUser,
    _guard: RequirePermission<PermInvoices>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddInstallmentsPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let installments = app_state
        .invoice_service
        .add_installments(id, &payload, ctx.user_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(installments)))
}
