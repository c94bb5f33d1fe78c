// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        AccountRepository, BankRepository, DreRepository, EmployeeRepository, GoalRepository,
        InvoiceRepository, MovementRepository, UserRepository,
    },
    services::{
        account_service::AccountService, auth::AuthService, bank_service::BankService,
        dre_service::DreService, employee_service::EmployeeService, goal_service::GoalService,
        invoice_service::InvoiceService, movement_service::MovementService,
        report_service::ReportService, user_service::UserService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub database_max_connections: u32,
    pub jwt_expiration_hours: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS deve ser um número inteiro")?,
            Err(_) => 5,
        };

        let jwt_expiration_hours = match env::var("JWT_EXPIRATION_HOURS") {
            Ok(value) => value
                .parse()
                .context("JWT_EXPIRATION_HOURS deve ser um número inteiro")?,
            Err(_) => 24,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            database_max_connections,
            jwt_expiration_hours,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,

    pub auth_service: AuthService,
    pub user_service: UserService,
    pub employee_service: EmployeeService,
    pub account_service: AccountService,
    pub bank_service: BankService,
    pub movement_service: MovementService,
    pub report_service: ReportService,
    pub goal_service: GoalService,
    pub dre_service: DreService,
    pub invoice_service: InvoiceService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências a partir de uma pool já criada.
    pub fn with_pool(db_pool: PgPool, config: &Config) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let account_repo = AccountRepository::new(db_pool.clone());
        let bank_repo = BankRepository::new(db_pool.clone());
        let movement_repo = MovementRepository::new(db_pool.clone());
        let goal_repo = GoalRepository::new(db_pool.clone());
        let dre_repo = DreRepository::new(db_pool.clone());
        let invoice_repo = InvoiceRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            account_repo.clone(),
            bank_repo.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
            db_pool.clone(),
        );
        let user_service = UserService::new(user_repo);
        let employee_service = EmployeeService::new(employee_repo);
        let account_service = AccountService::new(account_repo.clone());
        let bank_service = BankService::new(bank_repo);
        let movement_service = MovementService::new(movement_repo.clone());
        let report_service = ReportService::new(movement_repo.clone(), account_repo.clone());
        let goal_service = GoalService::new(goal_repo, account_repo, movement_repo.clone(), db_pool.clone());
        let dre_service = DreService::new(dre_repo);
        let invoice_service = InvoiceService::new(invoice_repo, movement_repo, db_pool.clone());

        Self {
            db_pool,
            i18n_store: Arc::new(I18nStore::new()),
            auth_service,
            user_service,
            employee_service,
            account_service,
            bank_service,
            movement_service,
            report_service,
            goal_service,
            dre_service,
            invoice_service,
        }
    }
}
