// src/db/user_repo.rs

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{ModulePermissions, Role, UpdateUserPayload, User},
};

/// Dados de um novo usuário, com a senha já em hash.
pub struct NewUser<'a> {
    pub code: &'a str,
    pub employee_id: Option<Uuid>,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub permissions: &'a ModulePermissions,
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn count<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    // Busca um usuário pelo seu login
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create<'e, E>(&self, executor: E, new_user: NewUser<'_>) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, code, employee_id, username, password_hash, email, role, permissions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_user.code)
        .bind(new_user.employee_id)
        .bind(new_user.username)
        .bind(new_user.password_hash)
        .bind(new_user.email)
        .bind(new_user.role)
        .bind(Json(new_user.permissions))
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }

    // Atualização parcial: COALESCE mantém o valor atual quando o campo não veio
    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateUserPayload,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                employee_id   = COALESCE($2, employee_id),
                password_hash = COALESCE($3, password_hash),
                email         = COALESCE($4, email),
                role          = COALESCE($5, role),
                permissions   = COALESCE($6, permissions),
                active        = COALESCE($7, active),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.employee_id)
        .bind(password_hash)
        .bind(payload.email.as_deref())
        .bind(payload.role)
        .bind(payload.permissions.as_ref().map(Json))
        .bind(payload.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn touch_last_access(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_access_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
