use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro, agora com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Período inválido")]
    InvalidPeriod,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Usuário inativo")]
    InactiveUser,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Sem permissão para o módulo '{0}'")]
    PermissionDenied(&'static str),

    #[error("Sistema já inicializado")]
    SetupAlreadyDone,

    /// O argumento é o sufixo da chave de tradução ("account", "goal", ...).
    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Conta pai não encontrada")]
    ParentAccountNotFound,

    #[error("Conta pai de outro tipo")]
    ParentKindMismatch,

    #[error("Nível de conta inválido: esperado {expected}, recebido {got}")]
    InvalidAccountLevel { expected: i16, got: i16 },

    #[error("Movimentação cancelada")]
    MovementCanceled,

    #[error("Referência inexistente: {0}")]
    ReferenceNotFound(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Erro de validação de um único campo, para regras fora do `#[validate]`.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut error = validator::ValidationError::new(code);
        error.message = Some(message.into());
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, error);
        AppError::ValidationError(errors)
    }

    /// Converte erros do banco, reconhecendo FK e unicidade.
    pub fn from_db(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                return AppError::UniqueConstraintViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                return AppError::ReferenceNotFound(constraint);
            }
        }
        AppError::DatabaseError(e)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidPeriod => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InactiveUser | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SetupAlreadyDone | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::ParentAccountNotFound
            | AppError::ParentKindMismatch
            | AppError::InvalidAccountLevel { .. }
            | AppError::MovementCanceled
            | AppError::ReferenceNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> String {
        let key = match self {
            AppError::ValidationError(_) => "error.validation",
            AppError::InvalidPeriod => "error.invalid_period",
            AppError::InvalidCredentials => "error.invalid_credentials",
            AppError::InactiveUser => "error.inactive_user",
            AppError::InvalidToken => "error.invalid_token",
            AppError::PermissionDenied(_) => "error.permission_denied",
            AppError::SetupAlreadyDone => "error.setup_done",
            AppError::NotFound(resource) => return format!("error.not_found.{resource}"),
            AppError::ParentAccountNotFound => "error.parent_not_found",
            AppError::ParentKindMismatch => "error.parent_kind_mismatch",
            AppError::InvalidAccountLevel { .. } => "error.invalid_level",
            AppError::MovementCanceled => "error.movement_canceled",
            AppError::ReferenceNotFound(_) => "error.reference_not_found",
            AppError::UniqueConstraintViolation(_) => "error.conflict",
            _ => "error.internal",
        };
        key.to_string()
    }

    fn details(&self) -> Option<Value> {
        match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::PermissionDenied(module) => Some(json!({ "module": module })),
            AppError::InvalidAccountLevel { expected, got } => {
                Some(json!({ "expected": expected, "got": got }))
            }
            AppError::UniqueConstraintViolation(constraint)
            | AppError::ReferenceNotFound(constraint)
                if !constraint.is_empty() =>
            {
                Some(json!({ "constraint": constraint }))
            }
            _ => None,
        }
    }

    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let key = self.message_key();
        ApiError {
            status,
            error: i18n.translate(&locale.0, &key).to_string(),
            details: self.details(),
        }
    }
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt() -> Locale {
        Locale("pt".to_string())
    }

    #[test]
    fn domain_errors_map_to_expected_statuses() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PermissionDenied("goals").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("account").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::SetupAlreadyDone.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ParentAccountNotFound.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AppError::InvalidPeriod.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_is_localized_per_resource() {
        let i18n = I18nStore::new();
        let api = AppError::NotFound("movement").to_api_error(&pt(), &i18n);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.error, "Movimentação não encontrada.");
        assert!(api.details.is_none());
    }

    #[test]
    fn level_mismatch_carries_details() {
        let i18n = I18nStore::new();
        let api = AppError::InvalidAccountLevel { expected: 2, got: 3 }.to_api_error(&pt(), &i18n);
        assert_eq!(api.details, Some(json!({ "expected": 2, "got": 3 })));
    }

    #[test]
    fn validation_errors_list_field_messages() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("range");
        err.message = Some("O trimestre deve estar entre 1 e 4.".into());
        errors.add("quarter", err);

        let api = AppError::ValidationError(errors).to_api_error(&pt(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            api.details,
            Some(json!({ "quarter": ["O trimestre deve estar entre 1 e 4."] }))
        );
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let api = AppError::InternalServerError(anyhow::anyhow!("senha do banco: xyz"))
            .to_api_error(&Locale("en".to_string()), &I18nStore::new());
        assert_eq!(api.error, "An unexpected error occurred.");
    }
}
