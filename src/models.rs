pub mod accounts;
pub mod auth;
pub mod banks;
pub mod dre;
pub mod employees;
pub mod goals;
pub mod invoices;
pub mod movements;
pub mod reports;
