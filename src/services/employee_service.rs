// src/services/employee_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EmployeeRepository,
    models::employees::{CreateEmployeePayload, Employee, UpdateEmployeePayload},
};

#[derive(Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Employee>, AppError> {
        self.repo.list().await
    }

    pub async fn create(&self, payload: &CreateEmployeePayload) -> Result<Employee, AppError> {
        self.repo.create(payload).await
    }

    pub async fn update(&self, id: Uuid, payload: &UpdateEmployeePayload) -> Result<Employee, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("employee"))
    }
}
