//! Cart
//!
//! The cart is the single source of truth for what the customer intends to
//! purchase. Every operation is a synchronous state transition; a rejected
//! transition leaves the cart exactly as it was. Totals are derived on every
//! read and never stored.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{ColorOption, Product, ProductId};

/// Errors from cart state transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The resulting quantity would exceed the product's stock snapshot.
    #[error("only {stock} of {name} in stock")]
    StockExceeded {
        /// Product name, for the user-facing message.
        name: String,
        /// Stock captured when the product was added.
        stock: u32,
        /// Quantity the operation would have produced.
        requested: u32,
    },

    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// No line exists for the given product and color.
    #[error("item is not in the cart")]
    LineNotFound,

    /// A line already exists at the destination color; variants never merge
    /// implicitly.
    #[error("that color is already in the cart")]
    ColorConflict,
}

/// One (product, color) pairing in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot captured at add-time.
    pub product: Product,
    pub quantity: u32,
    /// The selected color variant. Part of the line's identity.
    pub color: ColorOption,
    pub added_at: Timestamp,
}

impl CartLine {
    /// Price of this line: unit price times quantity, in minor units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }

    fn matches(&self, product: &ProductId, color_value: &str) -> bool {
        self.product.id == *product && self.color.value == color_value
    }
}

/// Derived cart totals, recomputed from the line items on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of all line totals, in minor units.
    pub subtotal: u64,
    /// Total number of units across all lines.
    pub units: u32,
}

/// Shopping cart: an ordered list of lines keyed by (product, color).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted lines.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The current lines, in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up the line for a (product, color) pairing.
    #[must_use]
    pub fn find(&self, product: &ProductId, color_value: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.matches(product, color_value))
    }

    /// Add a product at the given color, merging into an existing line when
    /// one matches the same (product, color) key.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`] when `quantity` is zero.
    /// - [`CartError::StockExceeded`] when the resulting quantity would exceed
    ///   the stock snapshot; the cart is left unchanged.
    pub fn add_or_merge(
        &mut self,
        product: Product,
        quantity: u32,
        color: ColorOption,
        added_at: Timestamp,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(&product.id, &color.value))
        {
            let requested = line.quantity.saturating_add(quantity);

            if requested > line.product.stock {
                return Err(CartError::StockExceeded {
                    name: line.product.name.clone(),
                    stock: line.product.stock,
                    requested,
                });
            }

            line.quantity = requested;

            return Ok(());
        }

        if quantity > product.stock {
            return Err(CartError::StockExceeded {
                name: product.name,
                stock: product.stock,
                requested: quantity,
            });
        }

        self.lines.push(CartLine {
            product,
            quantity,
            color,
            added_at,
        });

        Ok(())
    }

    /// Replace a line's quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`] when `quantity` is zero.
    /// - [`CartError::LineNotFound`] when no line matches.
    /// - [`CartError::StockExceeded`] when `quantity` exceeds the stock
    ///   snapshot; the line keeps its previous quantity.
    pub fn set_quantity(
        &mut self,
        product: &ProductId,
        color_value: &str,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product, color_value))
            .ok_or(CartError::LineNotFound)?;

        if quantity > line.product.stock {
            return Err(CartError::StockExceeded {
                name: line.product.name.clone(),
                stock: line.product.stock,
                requested: quantity,
            });
        }

        line.quantity = quantity;

        Ok(())
    }

    /// Move a line to a different color variant, preserving its quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::ColorConflict`] when a line already exists at the
    ///   destination (product, color); variants never merge implicitly.
    /// - [`CartError::LineNotFound`] when no line matches the old color.
    pub fn change_color(
        &mut self,
        product: &ProductId,
        old_color_value: &str,
        new_color: ColorOption,
    ) -> Result<(), CartError> {
        if self
            .lines
            .iter()
            .any(|line| line.matches(product, &new_color.value))
        {
            return Err(CartError::ColorConflict);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product, old_color_value))
            .ok_or(CartError::LineNotFound)?;

        line.color = new_color;

        Ok(())
    }

    /// Remove a line and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when no line matches.
    pub fn remove(&mut self, product: &ProductId, color_value: &str) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.matches(product, color_value))
            .ok_or(CartError::LineNotFound)?;

        Ok(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute the subtotal and unit count from the current lines.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.lines.iter().fold(
            CartTotals {
                subtotal: 0,
                units: 0,
            },
            |acc, line| CartTotals {
                subtotal: acc.subtotal + line.line_total(),
                units: acc.units.saturating_add(line.quantity),
            },
        )
    }
}
