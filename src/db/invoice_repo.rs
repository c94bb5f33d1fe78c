// src/db/invoice_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::invoices::{CreateInvoicePayload, ImportSource, Installment, InstallmentInput, PurchaseInvoice},
};

#[derive(Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  NOTAS FISCAIS DE COMPRA
    // =========================================================================

    pub async fn list(&self) -> Result<Vec<PurchaseInvoice>, AppError> {
        let invoices = sqlx::query_as::<_, PurchaseInvoice>(
            "SELECT * FROM purchase_invoices ORDER BY issued_on ASC, number ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(invoices)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<PurchaseInvoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, PurchaseInvoice>("SELECT * FROM purchase_invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(invoice)
    }

    pub async fn create(&self, payload: &CreateInvoicePayload) -> Result<PurchaseInvoice, AppError> {
        sqlx::query_as::<_, PurchaseInvoice>(
            r#"
            INSERT INTO purchase_invoices (
                id, number, series, access_key, issued_on,
                supplier_document, supplier_name, supplier_city, supplier_state,
                total_amount, products_amount, services_amount, discount_amount,
                import_source
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.number)
        .bind(payload.series.as_deref())
        .bind(payload.access_key.as_deref())
        .bind(payload.issued_on)
        .bind(payload.supplier_document.as_deref())
        .bind(payload.supplier_name.as_deref())
        .bind(payload.supplier_city.as_deref())
        .bind(payload.supplier_state.as_deref())
        .bind(payload.total_amount)
        .bind(payload.products_amount)
        .bind(payload.services_amount)
        .bind(payload.discount_amount)
        .bind(payload.import_source.unwrap_or(ImportSource::Manual))
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    // =========================================================================
    //  PARCELAS
    // =========================================================================

    pub async fn create_installment<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
        input: &InstallmentInput,
        movement_id: Option<Uuid>,
    ) -> Result<Installment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Installment>(
            r#"
            INSERT INTO purchase_installments (id, invoice_id, number, due_date, amount, movement_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(invoice_id)
        .bind(input.number)
        .bind(input.due_date)
        .bind(input.amount)
        .bind(movement_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from_db)
    }
}
