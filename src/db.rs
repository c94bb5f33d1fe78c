pub mod user_repo;
pub use user_repo::UserRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod bank_repo;
pub use bank_repo::BankRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
pub mod goal_repo;
pub use goal_repo::GoalRepository;
pub mod dre_repo;
pub use dre_repo::DreRepository;
pub mod invoice_repo;
pub use invoice_repo::InvoiceRepository;
