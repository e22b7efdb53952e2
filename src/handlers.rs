pub mod auth;
pub mod back_office;
pub mod catalog;
pub mod generation;
pub mod orders;
pub mod vendor;
