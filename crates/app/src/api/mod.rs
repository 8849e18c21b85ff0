//! Backend storefront API
//!
//! The backend owns the catalog, banners and orders; this module only
//! consumes its REST surface.

pub mod data;
mod errors;
mod service;

pub use errors::ApiError;
pub use service::*;
