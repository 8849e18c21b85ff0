//! Tokri
//!
//! Tokri is a storefront cart and checkout engine: cart state transitions and
//! derived totals, the delivery tariff, address validation, order records and
//! invoice rendering. It performs no IO; persistence and backend calls live in
//! the application layer.

pub mod address;
pub mod cart;
pub mod delivery;
pub mod ids;
pub mod invoice;
pub mod order;
pub mod products;
