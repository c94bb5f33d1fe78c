// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{user_repo::NewUser, AccountRepository, BankRepository, UserRepository},
    middleware::rbac::Module,
    models::auth::{AuthResponse, Claims, ModulePermissions, Role, SetupPayload, User},
    services::seed::seed_defaults,
};

/// Código fixo do primeiro administrador.
const FIRST_ADMIN_CODE: &str = "ADM001";

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    account_repo: AccountRepository,
    bank_repo: BankRepository,
    jwt_secret: String,
    jwt_expiration_hours: i64,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        account_repo: AccountRepository,
        bank_repo: BankRepository,
        jwt_secret: String,
        jwt_expiration_hours: i64,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            account_repo,
            bank_repo,
            jwt_secret,
            jwt_expiration_hours,
            pool,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        if !user.active {
            return Err(AppError::InactiveUser);
        }

        self.user_repo.touch_last_access(user.id).await?;

        let token = self.create_token(&user)?;
        tracing::info!("🔑 Login de {}", user.username);

        Ok(AuthResponse { token, user })
    }

    /// Cria o primeiro administrador, o plano de contas básico e o banco
    /// padrão; só funciona com a tabela de usuários vazia.
    pub async fn setup(&self, payload: &SetupPayload) -> Result<AuthResponse, AppError> {
        let password_hash = hash_password(payload.password.clone()).await?;

        let mut tx = self.pool.begin().await?;

        if self.user_repo.count(&mut *tx).await? > 0 {
            return Err(AppError::SetupAlreadyDone);
        }

        let permissions: ModulePermissions = Module::ALL
            .iter()
            .map(|module| (module.as_str().to_string(), true))
            .collect();

        let user = self
            .user_repo
            .create(
                &mut *tx,
                NewUser {
                    code: FIRST_ADMIN_CODE,
                    employee_id: None,
                    username: &payload.username,
                    password_hash: &password_hash,
                    email: &payload.email,
                    role: Role::Admin,
                    permissions: &permissions,
                },
            )
            .await?;

        let (accounts, banks) = seed_defaults(&mut *tx, &self.account_repo, &self.bank_repo).await?;

        tx.commit().await?;

        tracing::info!(
            "🚀 Administrador inicial '{}' criado ({} contas, {} banco)",
            user.username,
            accounts,
            banks
        );

        let token = self.create_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn needs_setup(&self) -> Result<bool, AppError> {
        Ok(self.user_repo.count(&self.pool).await? == 0)
    }

    pub async fn current_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    /// Valida assinatura e expiração; não consulta o banco.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            permissions: user.permissions.0.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

/// bcrypt fora do runtime assíncrono.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{postgres::PgPoolOptions, types::Json};

    fn service(secret: &str) -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/backoffice_test")
            .expect("url válida");
        AuthService::new(
            UserRepository::new(pool.clone()),
            AccountRepository::new(pool.clone()),
            BankRepository::new(pool.clone()),
            secret.to_string(),
            24,
            pool,
        )
    }

    fn user(role: Role) -> User {
        let mut permissions = ModulePermissions::new();
        permissions.insert("movements".to_string(), true);

        User {
            id: Uuid::new_v4(),
            code: "USR001".to_string(),
            employee_id: None,
            username: "maria".to_string(),
            password_hash: String::new(),
            email: "maria@empresa.com.br".to_string(),
            role,
            permissions: Json(permissions),
            active: true,
            last_access_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn token_carries_identity_and_permissions() {
        let auth = service("segredo");
        let user = user(Role::Manager);

        let token = auth.create_token(&user).unwrap();
        let claims = auth.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.permissions.get("movements"), Some(&true));
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = service("um").create_token(&user(Role::Admin)).unwrap();

        assert!(matches!(
            service("outro").validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        assert!(matches!(
            service("segredo").validate_token("nao.e.jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn hashed_password_verifies() {
        let hashed = hash_password("senha123".to_string()).await.unwrap();
        assert!(verify("senha123", &hashed).unwrap());
        assert!(!verify("errada", &hashed).unwrap());
    }
}
