// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// (chave, pt, en)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos.", "One or more fields are invalid."),
    ("error.invalid_period", "A data inicial deve ser anterior ou igual à data final.", "The start date must be on or before the end date."),
    ("error.invalid_credentials", "Usuário ou senha inválidos.", "Invalid username or password."),
    ("error.inactive_user", "Usuário inativo.", "Inactive user."),
    ("error.invalid_token", "Token de autenticação inválido ou ausente.", "Missing or invalid authentication token."),
    ("error.permission_denied", "Acesso negado a este módulo.", "Access to this module is denied."),
    ("error.setup_done", "Sistema já foi inicializado.", "The system has already been initialized."),
    ("error.not_found.user", "Usuário não encontrado.", "User not found."),
    ("error.not_found.employee", "Funcionário não encontrado.", "Employee not found."),
    ("error.not_found.account", "Conta não encontrada.", "Account not found."),
    ("error.not_found.bank", "Banco não encontrado.", "Bank not found."),
    ("error.not_found.movement", "Movimentação não encontrada.", "Movement not found."),
    ("error.not_found.goal", "Meta não encontrada.", "Goal not found."),
    ("error.not_found.dre_item", "Item do plano DRE não encontrado.", "DRE plan item not found."),
    ("error.not_found.invoice", "Nota fiscal não encontrada.", "Invoice not found."),
    ("error.parent_not_found", "A conta pai informada não existe.", "The parent account does not exist."),
    ("error.parent_kind_mismatch", "A conta pai deve ser do mesmo tipo (RECEITA/DESPESA).", "The parent account must have the same kind."),
    ("error.invalid_level", "O nível da conta não corresponde à sua posição na hierarquia.", "The account level does not match its position in the hierarchy."),
    ("error.movement_canceled", "Movimentação cancelada não pode ser paga.", "A canceled movement cannot be paid."),
    ("error.reference_not_found", "Um dos registros referenciados não existe.", "A referenced record does not exist."),
    ("error.conflict", "Registro duplicado.", "Duplicate record."),
    ("error.internal", "Ocorreu um erro inesperado.", "An unexpected error occurred."),
];

/// Catálogo de mensagens por idioma, montado uma vez e compartilhado no AppState.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut pt = HashMap::new();
        let mut en = HashMap::new();
        for (key, pt_msg, en_msg) in MESSAGES {
            pt.insert(*key, *pt_msg);
            en.insert(*key, *en_msg);
        }

        let mut messages = HashMap::new();
        messages.insert("pt", pt);
        messages.insert("en", en);
        Self { messages }
    }

    /// Idioma desconhecido cai no padrão; chave desconhecida volta a própria chave.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.messages
            .get(lang)
            .or_else(|| self.messages.get(DEFAULT_LANG))
            .and_then(|catalog| catalog.get(key).copied())
            .unwrap_or(key)
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_keys() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "error.not_found.goal"), "Meta não encontrada.");
        assert_eq!(store.translate("en", "error.not_found.goal"), "Goal not found.");
    }

    #[test]
    fn unknown_language_falls_back_to_default() {
        let store = I18nStore::new();
        assert_eq!(store.translate("fr", "error.inactive_user"), "Inactive user.");
    }

    #[test]
    fn unknown_key_is_echoed() {
        let store = I18nStore::new();
        assert_eq!(store.translate("pt", "error.nope"), "error.nope");
    }

    #[test]
    fn every_key_has_both_languages() {
        let store = I18nStore::new();
        for (key, _, _) in MESSAGES {
            assert_ne!(store.translate("pt", key), *key);
            assert_ne!(store.translate("en", key), *key);
        }
    }
}
