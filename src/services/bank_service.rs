// src/services/bank_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BankRepository,
    models::banks::{Bank, CreateBankPayload, UpdateBankPayload},
};

#[derive(Clone)]
pub struct BankService {
    repo: BankRepository,
}

impl BankService {
    pub fn new(repo: BankRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Bank>, AppError> {
        self.repo.list().await
    }

    pub async fn create(&self, payload: &CreateBankPayload) -> Result<Bank, AppError> {
        let bank = self.repo.create(self.repo.pool(), payload).await?;
        tracing::info!("🏦 Conta bancária '{}' cadastrada", bank.name);
        Ok(bank)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateBankPayload) -> Result<Bank, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("bank"))
    }
}
