pub mod auth;
pub mod demand;
pub mod generation;
pub mod notification;
pub mod order;
pub mod packing;
pub mod payment;
pub mod product;
pub mod returns;
pub mod vendor;
