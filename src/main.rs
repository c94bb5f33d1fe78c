//src/main.rs

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Nível de log via RUST_LOG; padrão "info".
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        tracing::error!("❌ Falha ao iniciar a aplicação: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    tracing::info!("📚 Swagger UI em /swagger-ui");

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação: só /me exige token
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/setup", post(handlers::auth::setup))
        .route("/check-setup", get(handlers::auth::check_setup))
        .route(
            "/me",
            get(handlers::auth::me).route_layer(axum_middleware::from_fn_with_state(
                app_state.clone(),
                auth_guard,
            )),
        );

    let user_routes = Router::new()
        .route("/", get(handlers::users::list_users).post(handlers::users::create_user))
        .route("/{id}", put(handlers::users::update_user));

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route("/{id}", put(handlers::employees::update_employee));

    let account_routes = Router::new()
        .route(
            "/",
            get(handlers::accounts::list_accounts).post(handlers::accounts::create_account),
        )
        .route("/hierarchy/{kind}", get(handlers::accounts::account_hierarchy))
        .route(
            "/{id}",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        );

    let bank_routes = Router::new()
        .route("/", get(handlers::banks::list_banks).post(handlers::banks::create_bank))
        .route("/{id}", put(handlers::banks::update_bank));

    let movement_routes = Router::new()
        .route(
            "/",
            get(handlers::movements::list_movements).post(handlers::movements::create_movement),
        )
        .route("/summary", get(handlers::movements::movements_summary))
        .route(
            "/{id}",
            get(handlers::movements::get_movement)
                .put(handlers::movements::update_movement)
                .delete(handlers::movements::delete_movement),
        )
        .route("/{id}/pay", patch(handlers::movements::pay_movement));

    let report_routes = Router::new()
        .route("/dre", get(handlers::reports::dre_report))
        .route("/cash-flow", get(handlers::reports::cash_flow_report));

    let goal_routes = Router::new()
        .route("/", get(handlers::goals::list_goals).post(handlers::goals::create_goal))
        .route(
            "/{id}",
            get(handlers::goals::get_goal).delete(handlers::goals::delete_goal),
        );

    let dre_routes = Router::new()
        .route("/", get(handlers::dre::list_dre_items).post(handlers::dre::create_dre_item))
        .route("/{id}/accounts", post(handlers::dre::link_dre_account));

    let invoice_routes = Router::new()
        .route(
            "/",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route("/{id}/installments", post(handlers::invoices::add_installments));

    // Tudo aqui passa pelo auth_guard; a permissão por módulo fica nos handlers
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/employees", employee_routes)
        .nest("/accounts", account_routes)
        .nest("/banks", bank_routes)
        .nest("/movements", movement_routes)
        .nest("/reports", report_routes)
        .nest("/goals", goal_routes)
        .nest("/dre-plan", dre_routes)
        .nest("/invoices", invoice_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use sqlx::{postgres::PgPoolOptions, types::Json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::models::auth::{ModulePermissions, Role, User};

    // Pool preguiçosa: as rotas testadas rejeitam antes de qualquer acesso ao banco.
    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost/backoffice_test".to_string(),
            jwt_secret: "segredo-de-teste".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            database_max_connections: 1,
            jwt_expiration_hours: 1,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("url válida");
        AppState::with_pool(pool, &config)
    }

    fn token(state: &AppState, role: Role, granted: &[&str]) -> String {
        let permissions: ModulePermissions = granted.iter().map(|m| (m.to_string(), true)).collect();
        let user = User {
            id: Uuid::new_v4(),
            code: "T001".to_string(),
            employee_id: None,
            username: "teste".to_string(),
            password_hash: String::new(),
            email: "teste@empresa.com.br".to_string(),
            role,
            permissions: Json(permissions),
            active: true,
            last_access_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        state.auth_service.create_token(&user).unwrap()
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, body)
    }

    fn get_request(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let state = test_state();
        let (status, body) = send(&state, get_request("/api/health", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn protected_route_without_token_is_unauthorized() {
        let state = test_state();
        let (status, _) = send(&state, get_request("/api/movements", None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unauthorized_message_follows_accept_language() {
        let state = test_state();
        let request = Request::builder()
            .uri("/api/movements")
            .header(header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Token de autenticação inválido ou ausente.");
    }

    #[tokio::test]
    async fn tampered_token_is_unauthorized() {
        let state = test_state();
        let (status, _) = send(&state, get_request("/api/goals", Some("abc.def.ghi"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn user_without_grant_is_forbidden() {
        let state = test_state();
        let token = token(&state, Role::User, &["movements"]);

        let request = Request::builder()
            .uri("/api/users")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"]["module"], "users");
    }

    #[tokio::test]
    async fn manager_without_grants_is_forbidden() {
        let state = test_state();
        let token = token(&state, Role::Manager, &[]);

        let (status, _) = send(&state, get_request("/api/users", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&state, get_request("/api/movements", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"]["module"], "movements");
    }

    #[tokio::test]
    async fn inverted_period_is_bad_request() {
        let state = test_state();
        let token = token(&state, Role::Admin, &[]);

        let (status, body) = send(
            &state,
            get_request("/api/reports/dre?start=2024-03-31&end=2024-01-01", Some(&token)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn missing_or_malformed_period_dates_are_json_bad_requests() {
        let state = test_state();
        let token = token(&state, Role::User, &["reports", "movements"]);

        let (status, body) = send(&state, get_request("/api/reports/cash-flow?end=2024-03-31", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["details"]["start"].is_array());

        let (status, body) = send(
            &state,
            get_request("/api/movements/summary?start=2024-01-01&end=amanha", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["details"]["end"].is_array());
    }

    #[tokio::test]
    async fn unknown_hierarchy_kind_is_bad_request() {
        let state = test_state();
        let token = token(&state, Role::User, &["chart_of_accounts"]);

        let (status, body) = send(&state, get_request("/api/accounts/hierarchy/ATIVO", Some(&token))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["details"]["kind"].is_array());
    }

    #[tokio::test]
    async fn goal_with_invalid_quarter_is_rejected_with_field_details() {
        let state = test_state();
        let token = token(&state, Role::Admin, &[]);

        let request = Request::builder()
            .method("POST")
            .uri("/api/goals")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({
                    "accountId": Uuid::new_v4(),
                    "year": 2024,
                    "quarter": 5,
                    "quarterlyTarget": 1000
                })
                .to_string(),
            ))
            .unwrap();
        let (status, body) = send(&state, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["details"]["quarter"].is_array());
    }
}
