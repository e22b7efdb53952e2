pub mod auth;
pub mod availability;
pub mod order_generation;
pub use order_generation::GenerationService;
pub mod packing_service;
pub use packing_service::PackingService;
pub mod vendor_service;
pub use vendor_service::VendorService;
pub mod order_service;
pub use order_service::OrderService;
pub mod returns_service;
pub use returns_service::ReturnsService;
