// src/db/employee_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::employees::{CreateEmployeePayload, Employee, UpdateEmployeePayload},
};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn create(&self, payload: &CreateEmployeePayload) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (id, name, cpf, phone, email, position, hired_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.cpf)
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.position.as_deref())
        .bind(payload.hired_on)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_db)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateEmployeePayload,
    ) -> Result<Option<Employee>, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees SET
                name         = COALESCE($2, name),
                phone        = COALESCE($3, phone),
                email        = COALESCE($4, email),
                position     = COALESCE($5, position),
                hired_on     = COALESCE($6, hired_on),
                dismissed_on = COALESCE($7, dismissed_on),
                active       = COALESCE($8, active),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name.as_deref())
        .bind(payload.phone.as_deref())
        .bind(payload.email.as_deref())
        .bind(payload.position.as_deref())
        .bind(payload.hired_on)
        .bind(payload.dismissed_on)
        .bind(payload.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_db)
    }
}
