// src/services/dre_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DreRepository,
    models::dre::{CreateDreItemPayload, DreAccountLink, DreItem},
};

#[derive(Clone)]
pub struct DreService {
    repo: DreRepository,
}

impl DreService {
    pub fn new(repo: DreRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<DreItem>, AppError> {
        self.repo.list().await
    }

    pub async fn create(&self, payload: &CreateDreItemPayload) -> Result<DreItem, AppError> {
        self.repo.create(payload).await
    }

    /// Item ou conta inexistente cai na FK (422).
    pub async fn link_account(&self, dre_item_id: Uuid, account_id: Uuid) -> Result<DreAccountLink, AppError> {
        let link = self.repo.link_account(dre_item_id, account_id).await?;
        tracing::info!("🔗 Conta {} vinculada ao item DRE {}", account_id, dre_item_id);
        Ok(link)
    }
}
