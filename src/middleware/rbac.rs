// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use utoipa::ToSchema;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthContext, i18n::Locale},
    models::auth::{ModulePermissions, Role},
};

/// Módulos do back-office sujeitos a permissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    ChartOfAccounts,
    Movements,
    Reports,
    Goals,
    Banks,
    Users,
    Employees,
    Invoices,
    DrePlan,
}

impl Module {
    pub const ALL: [Module; 9] = [
        Module::ChartOfAccounts,
        Module::Movements,
        Module::Reports,
        Module::Goals,
        Module::Banks,
        Module::Users,
        Module::Employees,
        Module::Invoices,
        Module::DrePlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::ChartOfAccounts => "chart_of_accounts",
            Module::Movements => "movements",
            Module::Reports => "reports",
            Module::Goals => "goals",
            Module::Banks => "banks",
            Module::Users => "users",
            Module::Employees => "employees",
            Module::Invoices => "invoices",
            Module::DrePlan => "dre_plan",
        }
    }
}

/// Regra de acesso, sem I/O: admin acessa tudo; os demais perfis
/// dependem da concessão explícita do módulo.
pub fn has_access(role: Role, permissions: &ModulePermissions, module: Module) -> bool {
    match role {
        Role::Admin => true,
        Role::Manager | Role::User => permissions.get(module.as_str()).copied().unwrap_or(false),
    }
}

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn module() -> Module;
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts
impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = match Locale::from_request_parts(parts, state).await {
            Ok(locale) => locale,
            Err(never) => match never {},
        };

        // A. Extrai o contexto colocado pelo auth_guard
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .ok_or_else(|| AppError::InvalidToken.to_api_error(&locale, &app_state.i18n_store))?;

        // B. Avalia a permissão
        let module = T::module();
        if !has_access(ctx.role, &ctx.permissions, module) {
            tracing::warn!("Usuário {} sem acesso ao módulo {}", ctx.username, module.as_str());
            return Err(AppError::PermissionDenied(module.as_str())
                .to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission {
    ($name:ident, $module:expr) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn module() -> Module {
                $module
            }
        }
    };
}

permission!(PermChartOfAccounts, Module::ChartOfAccounts);
permission!(PermMovements, Module::Movements);
permission!(PermReports, Module::Reports);
permission!(PermGoals, Module::Goals);
permission!(PermBanks, Module::Banks);
permission!(PermUsers, Module::Users);
permission!(PermEmployees, Module::Employees);
permission!(PermInvoices, Module::Invoices);
permission!(PermDrePlan, Module::DrePlan);

#[cfg(test)]
mod tests {
    use super::*;

    fn grants(modules: &[(&str, bool)]) -> ModulePermissions {
        modules.iter().map(|(m, g)| (m.to_string(), *g)).collect()
    }

    #[test]
    fn admin_reaches_every_module_without_grants() {
        let none = ModulePermissions::new();
        for module in Module::ALL {
            assert!(has_access(Role::Admin, &none, module));
        }
    }

    #[test]
    fn user_needs_explicit_grant() {
        let perms = grants(&[("movements", true), ("reports", false)]);
        assert!(has_access(Role::User, &perms, Module::Movements));
        assert!(!has_access(Role::User, &perms, Module::Reports));
        assert!(!has_access(Role::User, &perms, Module::Goals));
    }

    #[test]
    fn manager_without_grants_is_denied_everywhere() {
        let none = ModulePermissions::new();
        for module in Module::ALL {
            assert!(!has_access(Role::Manager, &none, module));
        }
        assert!(has_access(Role::Manager, &grants(&[("users", true)]), Module::Users));
        assert!(!has_access(Role::Manager, &grants(&[("goals", false)]), Module::Goals));
    }

    #[test]
    fn module_keys_round_trip_through_serde() {
        for module in Module::ALL {
            let json = serde_json::to_value(module).unwrap();
            assert_eq!(json, serde_json::Value::String(module.as_str().to_string()));
        }
    }
}
