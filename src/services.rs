pub mod account_service;
pub mod auth;
pub mod bank_service;
pub mod dre_service;
pub mod employee_service;
pub mod goal_service;
pub mod invoice_service;
pub mod movement_service;
pub mod report_service;
pub mod seed;
pub mod user_service;
