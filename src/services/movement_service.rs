// src/services/movement_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{movement_repo::NewMovement, MovementRepository},
    models::{
        movements::{
            CreateMovementPayload, Movement, MovementFilter, MovementOrigin, MovementStatus,
            PayMovementPayload, UpdateMovementPayload,
        },
        reports::{Period, PeriodSummary},
    },
    services::report_service::summarize_period,
};

#[derive(Clone)]
pub struct MovementService {
    repo: MovementRepository,
}

impl MovementService {
    pub fn new(repo: MovementRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &MovementFilter) -> Result<Vec<Movement>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Movement, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("movement"))
    }

    /// Lançamento manual; o usuário logado fica registrado como autor.
    pub async fn create(&self, payload: &CreateMovementPayload, user_id: Uuid) -> Result<Movement, AppError> {
        let movement = self
            .repo
            .create(
                self.repo.pool(),
                NewMovement {
                    kind: payload.kind,
                    description: &payload.description,
                    account_id: payload.account_id,
                    bank_id: payload.bank_id,
                    amount: payload.amount,
                    movement_date: payload.movement_date,
                    due_date: payload.due_date,
                    payment_date: payload.payment_date,
                    status: payload.status.unwrap_or(MovementStatus::Pending),
                    payment_method: payload.payment_method.as_deref(),
                    notes: payload.notes.as_deref(),
                    origin: MovementOrigin::Manual,
                    invoice_id: None,
                    user_id: Some(user_id),
                },
            )
            .await?;

        tracing::info!(
            "💸 Movimentação {:?} de {} registrada ({})",
            movement.kind,
            movement.amount,
            movement.description
        );
        Ok(movement)
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateMovementPayload) -> Result<Movement, AppError> {
        if let Some(target) = payload.status {
            let current = self.get(id).await?;
            check_status_change(current.status, target)?;
        }

        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("movement"))
    }

    /// Baixa: vira PAID; sem data informada, usa hoje.
    pub async fn pay(&self, id: Uuid, payload: &PayMovementPayload) -> Result<Movement, AppError> {
        let current = self.get(id).await?;
        check_status_change(current.status, MovementStatus::Paid)?;

        let payment_date = payload.payment_date.unwrap_or_else(|| Utc::now().date_naive());

        self.repo
            .mark_paid(id, payment_date, payload.bank_id)
            .await?
            .ok_or(AppError::NotFound("movement"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("movement"));
        }
        Ok(())
    }

    pub async fn summary(&self, period: Period) -> Result<PeriodSummary, AppError> {
        if !period.is_valid() {
            return Err(AppError::InvalidPeriod);
        }

        let movements = self.repo.list_paid_in_period(&period, None).await?;
        Ok(summarize_period(&movements, period))
    }
}

/// Movimentação cancelada não pode ser baixada, nem pela baixa nem pela edição.
pub fn check_status_change(current: MovementStatus, target: MovementStatus) -> Result<(), AppError> {
    if current == MovementStatus::Canceled && target == MovementStatus::Paid {
        return Err(AppError::MovementCanceled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canceled_movement_cannot_become_paid() {
        assert!(matches!(
            check_status_change(MovementStatus::Canceled, MovementStatus::Paid),
            Err(AppError::MovementCanceled)
        ));
    }

    #[test]
    fn other_transitions_are_allowed() {
        assert!(check_status_change(MovementStatus::Pending, MovementStatus::Paid).is_ok());
        assert!(check_status_change(MovementStatus::Paid, MovementStatus::Canceled).is_ok());
        assert!(check_status_change(MovementStatus::Canceled, MovementStatus::Pending).is_ok());
        assert!(check_status_change(MovementStatus::Canceled, MovementStatus::Canceled).is_ok());
    }
}
