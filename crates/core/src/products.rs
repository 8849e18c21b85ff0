//! Product Models

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Product identifier, assigned by the backend catalog.
pub type ProductId = TypedId<Product>;

/// A catalog entry as served by the backend.
///
/// Cart lines capture this as a snapshot at add-time; `price` and `stock` are
/// not re-checked against the live catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in minor currency units (poisha).
    pub price: u64,
    /// Units available when the product was fetched.
    pub stock: u32,
    /// Color variants the customer can choose between.
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One selectable color variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    /// Machine value, e.g. `"#1f2933"`.
    pub value: String,
    /// Name shown to the customer, e.g. `"Charcoal"`.
    pub name: String,
}

impl ColorOption {
    /// Create a color option from its machine value and display name.
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}
