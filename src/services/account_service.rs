// src/services/account_service.rs

use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AccountRepository,
    models::accounts::{
        Account, AccountFilter, AccountHierarchy, AccountKind, AccountNode, CreateAccountPayload,
        UpdateAccountPayload, MIN_LEVEL,
    },
};

#[derive(Clone)]
pub struct AccountService {
    repo: AccountRepository,
}

impl AccountService {
    pub fn new(repo: AccountRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AppError> {
        self.repo.list(filter.kind, filter.active).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Account, AppError> {
        self.repo
            .find_by_id(self.repo.pool(), id)
            .await?
            .ok_or(AppError::NotFound("account"))
    }

    pub async fn create(&self, payload: &CreateAccountPayload) -> Result<Account, AppError> {
        let parent = match payload.parent_id {
            Some(parent_id) => Some(
                self.repo
                    .find_by_id(self.repo.pool(), parent_id)
                    .await?
                    .ok_or(AppError::ParentAccountNotFound)?,
            ),
            None => None,
        };

        check_parent_link(payload.kind, payload.level, parent.as_ref())?;

        let account = self.repo.create(self.repo.pool(), payload).await?;
        tracing::info!("📒 Conta {} - {} criada", account.code, account.description);
        Ok(account)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateAccountPayload) -> Result<Account, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("account"))
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.deactivate(id).await? {
            return Err(AppError::NotFound("account"));
        }
        Ok(())
    }

    /// Árvore das contas ativas de um tipo.
    pub async fn hierarchy(&self, kind: AccountKind) -> Result<AccountHierarchy, AppError> {
        let accounts = self.repo.list(Some(kind), Some(true)).await?;
        let hierarchy = build_hierarchy(accounts);

        if !hierarchy.orphans.is_empty() {
            let codes: Vec<&str> = hierarchy.orphans.iter().map(|n| n.account.code.as_str()).collect();
            tracing::warn!("⚠️ Contas fora da hierarquia ({:?}): {:?}", kind, codes);
        }

        Ok(hierarchy)
    }
}

/// Regras de vínculo com a conta pai para uma conta nova.
pub fn check_parent_link(kind: AccountKind, level: i16, parent: Option<&Account>) -> Result<(), AppError> {
    match parent {
        None if level != MIN_LEVEL => Err(AppError::InvalidAccountLevel { expected: MIN_LEVEL, got: level }),
        None => Ok(()),
        Some(parent) if parent.kind != kind => Err(AppError::ParentKindMismatch),
        Some(parent) if parent.level + 1 != level => Err(AppError::InvalidAccountLevel {
            expected: parent.level + 1,
            got: level,
        }),
        Some(_) => Ok(()),
    }
}

/// Monta a floresta do plano de contas a partir da lista plana.
///
/// As contas ficam num vetor (arena); um índice id -> posição e a lista de
/// filhos de cada posição são montados uma única vez. Um filho só é ligado ao
/// pai se `nivel(filho) == nivel(pai) + 1`, então não há ciclos.
///
/// Raízes: sem pai e nível 1. Contas com pai inexistente, nível incompatível
/// com o pai, ou sem pai fora do nível 1 vão para `orphans` (com a sua própria
/// subárvore). A ordem de entrada é preservada em todos os níveis.
pub fn build_hierarchy(accounts: Vec<Account>) -> AccountHierarchy {
    let position: HashMap<Uuid, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| (account.id, i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); accounts.len()];
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for (i, account) in accounts.iter().enumerate() {
        match account.parent_id {
            None if account.level == MIN_LEVEL => roots.push(i),
            None => orphans.push(i),
            Some(parent_id) => match position.get(&parent_id) {
                Some(&p) if accounts[p].level + 1 == account.level => children[p].push(i),
                _ => orphans.push(i),
            },
        }
    }

    let mut arena: Vec<Option<Account>> = accounts.into_iter().map(Some).collect();

    AccountHierarchy {
        roots: render(&roots, &mut arena, &children),
        orphans: render(&orphans, &mut arena, &children),
    }
}

fn render(indices: &[usize], arena: &mut [Option<Account>], children: &[Vec<usize>]) -> Vec<AccountNode> {
    indices
        .iter()
        .filter_map(|&i| {
            // Cada posição aparece em exatamente uma lista, então é consumida uma vez.
            let account = arena[i].take()?;
            Some(AccountNode {
                account,
                children: render(&children[i], arena, children),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(code: &str, level: i16, parent: Option<&Account>) -> Account {
        Account {
            id: Uuid::new_v4(),
            code: code.to_string(),
            description: format!("Conta {code}"),
            kind: AccountKind::Revenue,
            level,
            parent_id: parent.map(|p| p.id),
            affects_result: true,
            expense_type: None,
            uses_goal: false,
            active: true,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn codes(nodes: &[AccountNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.account.code.as_str()).collect()
    }

    fn assert_levels_step_by_one(node: &AccountNode) {
        for child in &node.children {
            assert_eq!(child.account.level, node.account.level + 1);
            assert_eq!(child.account.parent_id, Some(node.account.id));
            assert_levels_step_by_one(child);
        }
    }

    #[test]
    fn builds_nested_forest_in_code_order() {
        let r1 = account("1", 1, None);
        let r1_1 = account("1.1", 2, Some(&r1));
        let r1_1_1 = account("1.1.01", 3, Some(&r1_1));
        let r1_2 = account("1.2", 2, Some(&r1));
        let r2 = account("2", 1, None);

        let tree = build_hierarchy(vec![r1, r1_1, r1_1_1, r1_2, r2]);

        assert_eq!(codes(&tree.roots), vec!["1", "2"]);
        assert_eq!(codes(&tree.roots[0].children), vec!["1.1", "1.2"]);
        assert_eq!(codes(&tree.roots[0].children[0].children), vec!["1.1.01"]);
        assert!(tree.roots[1].children.is_empty());
        assert!(tree.orphans.is_empty());
        tree.roots.iter().for_each(assert_levels_step_by_one);
    }

    #[test]
    fn dangling_parent_goes_to_orphans_with_its_subtree() {
        let ghost = account("9", 1, None);
        let root = account("1", 1, None);
        let lost = account("9.1", 2, Some(&ghost));
        let lost_child = account("9.1.01", 3, Some(&lost));

        let tree = build_hierarchy(vec![root, lost, lost_child]);

        assert_eq!(codes(&tree.roots), vec!["1"]);
        assert_eq!(codes(&tree.orphans), vec!["9.1"]);
        assert_eq!(codes(&tree.orphans[0].children), vec!["9.1.01"]);
    }

    #[test]
    fn cross_level_link_is_not_attached() {
        let root = account("1", 1, None);
        let skipped = account("1.1.01", 3, Some(&root));
        let floating_root = account("5", 2, None);

        let tree = build_hierarchy(vec![root, skipped, floating_root]);

        assert!(tree.roots[0].children.is_empty());
        assert_eq!(codes(&tree.orphans), vec!["1.1.01", "5"]);
    }

    #[test]
    fn self_reference_does_not_loop() {
        let mut weird = account("1", 1, None);
        weird.parent_id = Some(weird.id);

        let tree = build_hierarchy(vec![weird]);

        assert!(tree.roots.is_empty());
        assert_eq!(codes(&tree.orphans), vec!["1"]);
    }

    #[test]
    fn building_twice_yields_identical_trees() {
        let r1 = account("1", 1, None);
        let r1_1 = account("1.1", 2, Some(&r1));
        let ghost = account("7", 1, None);
        let orphan = account("7.1", 2, Some(&ghost));
        let input = vec![r1, r1_1, orphan];

        assert_eq!(build_hierarchy(input.clone()), build_hierarchy(input));
    }

    #[test]
    fn empty_input_gives_empty_forest() {
        let tree = build_hierarchy(Vec::new());
        assert!(tree.roots.is_empty());
        assert!(tree.orphans.is_empty());
    }

    #[test]
    fn parent_link_rules() {
        let root = account("1", 1, None);

        assert!(check_parent_link(AccountKind::Revenue, 1, None).is_ok());
        assert!(check_parent_link(AccountKind::Revenue, 2, Some(&root)).is_ok());

        assert!(matches!(
            check_parent_link(AccountKind::Revenue, 2, None),
            Err(AppError::InvalidAccountLevel { expected: 1, got: 2 })
        ));
        assert!(matches!(
            check_parent_link(AccountKind::Revenue, 3, Some(&root)),
            Err(AppError::InvalidAccountLevel { expected: 2, got: 3 })
        ));
        assert!(matches!(
            check_parent_link(AccountKind::Expense, 2, Some(&root)),
            Err(AppError::ParentKindMismatch)
        ));
    }
}
