// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, UserRepository},
    models::auth::{CreateUserPayload, UpdateUserPayload, User},
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repo.list().await
    }

    pub async fn create(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let password_hash = hash_password(payload.password.clone()).await?;

        let user = self
            .repo
            .create(
                self.repo.pool(),
                NewUser {
                    code: &payload.code,
                    employee_id: payload.employee_id,
                    username: &payload.username,
                    password_hash: &password_hash,
                    email: &payload.email,
                    role: payload.role,
                    permissions: &payload.permissions,
                },
            )
            .await?;

        tracing::info!("👤 Usuário {} criado ({:?})", user.username, user.role);
        Ok(user)
    }

    /// Senha nova é re-hasheada; os demais campos seguem a atualização parcial.
    pub async fn update(&self, id: Uuid, payload: &UpdateUserPayload) -> Result<User, AppError> {
        let password_hash = match &payload.password {
            Some(password) => Some(hash_password(password.clone()).await?),
            None => None,
        };

        self.repo
            .update(id, payload, password_hash.as_deref())
            .await?
            .ok_or(AppError::NotFound("user"))
    }
}
