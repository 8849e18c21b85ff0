//! Order Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    address::DeliveryAddress,
    cart::{Cart, CartLine},
    delivery::DeliveryLocation,
    ids::TypedId,
};

/// Order identifier, assigned by the backend once the order is stored.
pub type OrderId = TypedId<OrderRecord>;

/// The only payment method accepted at checkout.
pub const PAYMENT_METHOD: &str = "Cash on Delivery";

/// Length of the random suffix appended to order numbers.
const ORDER_SUFFIX_LEN: usize = 6;

/// Order lifecycle states. The backend owns transitions after submission;
/// the client consumes them read-only for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        };

        f.write_str(name)
    }
}

/// Errors from order construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// An order needs at least one cart line.
    #[error("the cart is empty")]
    EmptyCart,
}

/// Immutable snapshot of cart, address and computed totals submitted to the
/// backend. The client never mutates a record after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Backend-assigned id; absent until the backend has stored the order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub order_number: String,
    pub customer: DeliveryAddress,
    pub items: Vec<CartLine>,
    pub delivery_location: DeliveryLocation,
    /// Sum of line totals, in minor units.
    pub subtotal: u64,
    /// Flat tariff for the delivery location, in minor units.
    pub delivery_charge: u64,
    /// `subtotal + delivery_charge`, in minor units.
    pub grand_total: u64,
    pub order_date: Timestamp,
    pub payment_method: String,
    pub status: OrderStatus,
}

impl OrderRecord {
    /// Build an order from the current cart and delivery details.
    ///
    /// Totals are computed here, never caller-supplied, so
    /// `grand_total == subtotal + delivery_charge` holds by construction.
    /// The new record starts as [`OrderStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] when the cart has no lines.
    pub fn build(
        cart: &Cart,
        customer: DeliveryAddress,
        location: DeliveryLocation,
        placed_at: Timestamp,
        rng: &mut impl Rng,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let totals = cart.totals();
        let delivery_charge = location.charge();

        Ok(Self {
            id: None,
            order_number: order_number(placed_at, rng),
            customer,
            items: cart.lines().to_vec(),
            delivery_location: location,
            subtotal: totals.subtotal,
            delivery_charge,
            grand_total: totals.subtotal + delivery_charge,
            order_date: placed_at,
            payment_method: PAYMENT_METHOD.to_string(),
            status: OrderStatus::Pending,
        })
    }
}

/// Collision-resistant order number: placement time in milliseconds plus a
/// random alphanumeric suffix.
#[must_use]
pub fn order_number(placed_at: Timestamp, rng: &mut impl Rng) -> String {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(ORDER_SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!("{}-{suffix}", placed_at.as_millisecond())
}
