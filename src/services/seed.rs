// src/services/seed.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::{
    common::error::AppError,
    db::{AccountRepository, BankRepository},
    models::{
        accounts::{Account, AccountKind, CreateAccountPayload, ExpenseType},
        banks::{BankAccountKind, CreateBankPayload},
    },
    services::account_service::check_parent_link,
};

/// Conta do plano básico criado junto com o primeiro administrador.
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    pub code: &'static str,
    pub description: &'static str,
    pub kind: AccountKind,
    pub level: i16,
    pub parent_code: Option<&'static str>,
    pub expense_type: Option<ExpenseType>,
}

// Pais sempre antes dos filhos.
pub const SEED_ACCOUNTS: [SeedAccount; 8] = [
    SeedAccount { code: "1", description: "RECEITAS", kind: AccountKind::Revenue, level: 1, parent_code: None, expense_type: None },
    SeedAccount { code: "1.1", description: "Receitas Operacionais", kind: AccountKind::Revenue, level: 2, parent_code: Some("1"), expense_type: None },
    SeedAccount { code: "1.1.01", description: "Vendas de Serviços", kind: AccountKind::Revenue, level: 3, parent_code: Some("1.1"), expense_type: None },
    SeedAccount { code: "2", description: "DESPESAS", kind: AccountKind::Expense, level: 1, parent_code: None, expense_type: None },
    SeedAccount { code: "2.1", description: "Despesas Operacionais", kind: AccountKind::Expense, level: 2, parent_code: Some("2"), expense_type: None },
    SeedAccount { code: "2.1.01", description: "Salários e Encargos", kind: AccountKind::Expense, level: 3, parent_code: Some("2.1"), expense_type: Some(ExpenseType::Fixed) },
    SeedAccount { code: "2.1.02", description: "Aluguel", kind: AccountKind::Expense, level: 3, parent_code: Some("2.1"), expense_type: Some(ExpenseType::Fixed) },
    SeedAccount { code: "2.1.03", description: "Material de Consumo", kind: AccountKind::Expense, level: 3, parent_code: Some("2.1"), expense_type: Some(ExpenseType::Variable) },
];

pub const DEFAULT_BANK_NAME: &str = "Caixa Geral";

impl SeedAccount {
    pub fn payload(&self, parent: Option<&Account>) -> CreateAccountPayload {
        CreateAccountPayload {
            code: self.code.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            level: self.level,
            parent_id: parent.map(|p| p.id),
            affects_result: true,
            expense_type: self.expense_type,
            uses_goal: false,
            sort_order: 0,
        }
    }
}

pub fn default_bank() -> CreateBankPayload {
    CreateBankPayload {
        name: DEFAULT_BANK_NAME.to_string(),
        branch: Some("0000".to_string()),
        account_number: Some("0000".to_string()),
        kind: Some(BankAccountKind::Checking),
        opening_balance: Decimal::ZERO,
    }
}

/// Grava o plano de contas básico e o banco padrão na conexão recebida
/// (normalmente a transação do setup). Devolve (contas, bancos) criados.
pub async fn seed_defaults(
    conn: &mut PgConnection,
    account_repo: &AccountRepository,
    bank_repo: &BankRepository,
) -> Result<(usize, usize), AppError> {
    let mut created: HashMap<&str, Account> = HashMap::new();

    for seed in SEED_ACCOUNTS {
        let parent = seed.parent_code.and_then(|code| created.get(code));
        check_parent_link(seed.kind, seed.level, parent)?;

        let account = account_repo.create(&mut *conn, &seed.payload(parent)).await?;
        created.insert(seed.code, account);
    }

    bank_repo.create(&mut *conn, &default_bank()).await?;

    Ok((created.len(), 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::services::account_service::build_hierarchy;

    fn materialize(seed: &SeedAccount, parent: Option<&Account>) -> Account {
        let payload = seed.payload(parent);
        Account {
            id: Uuid::new_v4(),
            code: payload.code,
            description: payload.description,
            kind: payload.kind,
            level: payload.level,
            parent_id: payload.parent_id,
            affects_result: payload.affects_result,
            expense_type: payload.expense_type,
            uses_goal: payload.uses_goal,
            active: true,
            sort_order: payload.sort_order,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn materialize_all() -> Vec<Account> {
        let mut by_code: HashMap<&str, Account> = HashMap::new();
        let mut accounts = Vec::new();
        for seed in &SEED_ACCOUNTS {
            let parent = seed.parent_code.and_then(|code| by_code.get(code));
            check_parent_link(seed.kind, seed.level, parent).unwrap();
            let account = materialize(seed, parent);
            by_code.insert(seed.code, account.clone());
            accounts.push(account);
        }
        accounts
    }

    #[test]
    fn every_seed_account_passes_parent_rules() {
        let accounts = materialize_all();
        assert_eq!(accounts.len(), 8);
        assert!(accounts.iter().filter(|a| a.parent_id.is_none()).all(|a| a.level == 1));
    }

    #[test]
    fn seed_chart_builds_a_forest_without_orphans() {
        let accounts = materialize_all();

        let revenue: Vec<Account> = accounts.iter().filter(|a| a.kind == AccountKind::Revenue).cloned().collect();
        let expense: Vec<Account> = accounts.iter().filter(|a| a.kind == AccountKind::Expense).cloned().collect();

        let revenue = build_hierarchy(revenue);
        assert!(revenue.orphans.is_empty());
        assert_eq!(revenue.roots.len(), 1);
        assert_eq!(revenue.roots[0].account.code, "1");

        let expense = build_hierarchy(expense);
        assert!(expense.orphans.is_empty());
        assert_eq!(expense.roots[0].children[0].children.len(), 3);
    }

    #[test]
    fn leaf_expenses_carry_their_type() {
        let types: Vec<_> = SEED_ACCOUNTS
            .iter()
            .filter(|s| s.code.starts_with("2.1."))
            .map(|s| s.expense_type)
            .collect();
        assert_eq!(
            types,
            vec![Some(ExpenseType::Fixed), Some(ExpenseType::Fixed), Some(ExpenseType::Variable)]
        );
    }

    #[test]
    fn default_bank_is_an_empty_checking_account() {
        let bank = default_bank();
        assert_eq!(bank.name, "Caixa Geral");
        assert_eq!(bank.kind, Some(BankAccountKind::Checking));
        assert_eq!(bank.opening_balance, Decimal::ZERO);
    }
}
