pub mod expense_repository;
pub mod payment_repository;
pub mod tenant_repository;

pub use expense_repository::ExpenseRepository;
pub use payment_repository::PaymentRepository;
pub use tenant_repository::TenantRepository;
