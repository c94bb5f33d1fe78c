// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::setup,
        handlers::auth::check_setup,
        handlers::auth::me,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_user,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::update_employee,

        // --- Chart of Accounts ---
        handlers::accounts::list_accounts,
        handlers::accounts::account_hierarchy,
        handlers::accounts::get_account,
        handlers::accounts::create_account,
        handlers::accounts::update_account,
        handlers::accounts::delete_account,

        // --- Banks ---
        handlers::banks::list_banks,
        handlers::banks::create_bank,
        handlers::banks::update_bank,

        // --- Movements ---
        handlers::movements::list_movements,
        handlers::movements::movements_summary,
        handlers::movements::get_movement,
        handlers::movements::create_movement,
        handlers::movements::update_movement,
        handlers::movements::pay_movement,
        handlers::movements::delete_movement,

        // --- Reports ---
        handlers::reports::dre_report,
        handlers::reports::cash_flow_report,

        // --- Goals ---
        handlers::goals::list_goals,
        handlers::goals::create_goal,
        handlers::goals::get_goal,
        handlers::goals::delete_goal,

        // --- DRE Plan ---
        handlers::dre::list_dre_items,
        handlers::dre::create_dre_item,
        handlers::dre::link_dre_account,

        // --- Invoices ---
        handlers::invoices::list_invoices,
        handlers::invoices::create_invoice,
        handlers::invoices::add_installments,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::SetupPayload,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,
            models::auth::SetupStatus,

            // --- Employees ---
            models::employees::Employee,
            models::employees::CreateEmployeePayload,
            models::employees::UpdateEmployeePayload,

            // --- Chart of Accounts ---
            models::accounts::AccountKind,
            models::accounts::ExpenseType,
            models::accounts::Account,
            models::accounts::AccountNode,
            models::accounts::AccountHierarchy,
            models::accounts::CreateAccountPayload,
            models::accounts::UpdateAccountPayload,

            // --- Banks ---
            models::banks::BankAccountKind,
            models::banks::Bank,
            models::banks::CreateBankPayload,
            models::banks::UpdateBankPayload,

            // --- Movements ---
            models::movements::MovementKind,
            models::movements::MovementStatus,
            models::movements::MovementOrigin,
            models::movements::Movement,
            models::movements::CreateMovementPayload,
            models::movements::UpdateMovementPayload,
            models::movements::PayMovementPayload,

            // --- Reports ---
            models::reports::Period,
            models::reports::PeriodSummary,
            models::reports::DreLine,
            models::reports::DreReport,
            models::reports::CashFlowEntry,

            // --- Goals ---
            models::goals::Goal,
            models::goals::WeeklyGoal,
            models::goals::GoalDetail,
            models::goals::CreateGoalPayload,

            // --- DRE Plan ---
            models::dre::DreItemKind,
            models::dre::DreItem,
            models::dre::DreAccountLink,
            models::dre::CreateDreItemPayload,
            models::dre::LinkAccountPayload,

            // --- Invoices ---
            models::invoices::InvoiceStatus,
            models::invoices::ImportSource,
            models::invoices::PurchaseInvoice,
            models::invoices::Installment,
            models::invoices::CreateInvoicePayload,
            models::invoices::InstallmentInput,
            models::invoices::AddInstallmentsPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login e configuração inicial"),
        (name = "Users", description = "Usuários e permissões por módulo"),
        (name = "Employees", description = "Cadastro de funcionários"),
        (name = "Chart of Accounts", description = "Plano de contas (receitas e despesas)"),
        (name = "Banks", description = "Contas bancárias"),
        (name = "Movements", description = "Lançamentos financeiros"),
        (name = "Reports", description = "DRE e fluxo de caixa"),
        (name = "Goals", description = "Metas trimestrais e semanais"),
        (name = "DRE Plan", description = "Estrutura da DRE"),
        (name = "Invoices", description = "Notas fiscais de compra e parcelas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_protected_routes_with_bearer_scheme() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/accounts/hierarchy/{kind}"));
        assert!(doc.paths.paths.contains_key("/api/goals"));
        assert!(doc.paths.paths.contains_key("/api/reports/cash-flow"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_jwt"));
    }
}
