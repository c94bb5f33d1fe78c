// src/services/invoice_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{movement_repo::NewMovement, InvoiceRepository, MovementRepository},
    models::{
        invoices::{AddInstallmentsPayload, CreateInvoicePayload, Installment, PurchaseInvoice},
        movements::{MovementKind, MovementOrigin, MovementStatus},
    },
};

#[derive(Clone)]
pub struct InvoiceService {
    invoice_repo: InvoiceRepository,
    movement_repo: MovementRepository,
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(invoice_repo: InvoiceRepository, movement_repo: MovementRepository, pool: PgPool) -> Self {
        Self {
            invoice_repo,
            movement_repo,
            pool,
        }
    }

    pub async fn list(&self) -> Result<Vec<PurchaseInvoice>, AppError> {
        self.invoice_repo.list().await
    }

    pub async fn create(&self, payload: &CreateInvoicePayload) -> Result<PurchaseInvoice, AppError> {
        let invoice = self.invoice_repo.create(payload).await?;
        tracing::info!("🧾 NF {} registrada ({})", invoice.number, invoice.total_amount);
        Ok(invoice)
    }

    /// Grava as parcelas; com `account_id`, cada parcela gera uma conta a pagar
    /// (saída PENDING) vinculada. Tudo ou nada.
    pub async fn add_installments(
        &self,
        invoice_id: Uuid,
        payload: &AddInstallmentsPayload,
        user_id: Uuid,
    ) -> Result<Vec<Installment>, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoice = self
            .invoice_repo
            .find_by_id(&mut *tx, invoice_id)
            .await?
            .ok_or(AppError::NotFound("invoice"))?;

        let count = payload.installments.len();
        let mut created = Vec::with_capacity(count);

        for input in &payload.installments {
            let movement_id = match payload.account_id {
                Some(account_id) => {
                    let description = installment_description(&invoice, input.number, count);
                    let movement = self
                        .movement_repo
                        .create(
                            &mut *tx,
                            NewMovement {
                                kind: MovementKind::Out,
                                description: &description,
                                account_id,
                                bank_id: payload.bank_id,
                                amount: input.amount,
                                movement_date: input.due_date,
                                due_date: Some(input.due_date),
                                payment_date: None,
                                status: MovementStatus::Pending,
                                payment_method: None,
                                notes: None,
                                origin: MovementOrigin::PurchaseInvoice,
                                invoice_id: Some(invoice.id),
                                user_id: Some(user_id),
                            },
                        )
                        .await?;
                    Some(movement.id)
                }
                None => None,
            };

            let installment = self
                .invoice_repo
                .create_installment(&mut *tx, invoice.id, input, movement_id)
                .await?;
            created.push(installment);
        }

        tx.commit().await?;

        tracing::info!("🧾 {} parcela(s) lançada(s) para a NF {}", created.len(), invoice.number);
        Ok(created)
    }
}

/// Descrição da conta a pagar gerada por uma parcela.
pub fn installment_description(invoice: &PurchaseInvoice, number: i32, count: usize) -> String {
    match invoice.supplier_name.as_deref() {
        Some(supplier) => format!("NF {} - {} - parcela {}/{}", invoice.number, supplier, number, count),
        None => format!("NF {} - parcela {}/{}", invoice.number, number, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoices::{ImportSource, InvoiceStatus};
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn invoice(supplier_name: Option<&str>) -> PurchaseInvoice {
        PurchaseInvoice {
            id: Uuid::new_v4(),
            number: "000123".to_string(),
            series: Some("1".to_string()),
            access_key: None,
            issued_on: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            supplier_document: None,
            supplier_name: supplier_name.map(str::to_string),
            supplier_city: None,
            supplier_state: None,
            total_amount: Decimal::from(1200),
            products_amount: None,
            services_amount: None,
            discount_amount: None,
            import_source: ImportSource::Manual,
            status: InvoiceStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn description_names_supplier_when_known() {
        assert_eq!(
            installment_description(&invoice(Some("Atacadão")), 2, 3),
            "NF 000123 - Atacadão - parcela 2/3"
        );
        assert_eq!(installment_description(&invoice(None), 1, 1), "NF 000123 - parcela 1/1");
    }
}
