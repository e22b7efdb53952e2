pub mod vendor_repo;
pub use vendor_repo::VendorRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod demand_repo;
pub use demand_repo::DemandRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod generation_repo;
pub use generation_repo::{GenerationStore, PgGenerationStore};
pub mod returns_repo;
pub use returns_repo::ReturnsRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
pub mod notification_repo;
pub use notification_repo::NotificationRepository;

#[cfg(test)]
pub mod memory_store;
