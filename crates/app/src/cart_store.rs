//! Persistent cart store.
//!
//! Wraps the in-memory [`Cart`] with its durable storage. Every successful
//! state transition is written back synchronously; rejected transitions write
//! nothing. The initial load never writes — an empty cart is not persisted
//! until the first real mutation.

use std::sync::Arc;

use jiff::Timestamp;
use mockall::automock;
use thiserror::Error;
use tracing::warn;

use tokri::{
    cart::{Cart, CartError, CartTotals},
    products::{ColorOption, Product, ProductId},
};

use crate::storage::{CartStorage, StorageError};

/// Errors from cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Interactive confirmation for destructive cart actions.
#[automock]
pub trait ConfirmPrompt: Send + Sync {
    /// Present the message and return whether the user agreed.
    fn confirm(&self, message: &str) -> bool;
}

/// Outcome of a confirmation-gated removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The user confirmed and the line is gone.
    Removed,
    /// The user declined; nothing changed.
    Declined,
}

/// The cart plus its durable home.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn CartStorage>,
}

impl CartStore {
    /// Load the persisted cart. Missing data yields an empty cart; corrupt
    /// data is discarded with a warning and also yields an empty cart. The
    /// empty state is not written back here.
    pub fn load(storage: Arc<dyn CartStorage>) -> Self {
        let cart = match storage.load() {
            Ok(Some(lines)) => Cart::from_lines(lines),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!("discarding unreadable cart: {error}");
                Cart::new()
            }
        };

        Self { cart, storage }
    }

    /// The current cart state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived totals of the current cart.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add a product, merging into an existing (product, color) line.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] rejections (nothing is written) and
    /// [`StorageError`] persistence failures.
    pub fn add_or_merge(
        &mut self,
        product: Product,
        quantity: u32,
        color: ColorOption,
        added_at: Timestamp,
    ) -> Result<(), CartStoreError> {
        self.cart.add_or_merge(product, quantity, color, added_at)?;
        self.persist()
    }

    /// Replace a line's quantity.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] rejections (nothing is written) and
    /// [`StorageError`] persistence failures.
    pub fn set_quantity(
        &mut self,
        product: &ProductId,
        color_value: &str,
        quantity: u32,
    ) -> Result<(), CartStoreError> {
        self.cart.set_quantity(product, color_value, quantity)?;
        self.persist()
    }

    /// Move a line to a different color variant.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] rejections (nothing is written) and
    /// [`StorageError`] persistence failures.
    pub fn change_color(
        &mut self,
        product: &ProductId,
        old_color_value: &str,
        new_color: ColorOption,
    ) -> Result<(), CartStoreError> {
        self.cart.change_color(product, old_color_value, new_color)?;
        self.persist()
    }

    /// Remove a line after interactive confirmation. Declining leaves the
    /// cart and its persisted copy untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] when no line matches, before any
    /// prompt is shown; propagates persistence failures.
    pub fn remove(
        &mut self,
        product: &ProductId,
        color_value: &str,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<RemoveOutcome, CartStoreError> {
        let line = self
            .cart
            .find(product, color_value)
            .ok_or(CartError::LineNotFound)?;

        let message = format!(
            "Remove {} ({}) from the cart?",
            line.product.name, line.color.name
        );

        if !prompt.confirm(&message) {
            return Ok(RemoveOutcome::Declined);
        }

        self.cart.remove(product, color_value)?;
        self.persist()?;

        Ok(RemoveOutcome::Removed)
    }

    /// Empty the cart and drop its persisted blob. Used after a successful
    /// order submission.
    ///
    /// # Errors
    ///
    /// Propagates [`StorageError`] when the blob cannot be removed.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.storage.clear().map_err(CartStoreError::from)
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        self.storage
            .save(self.cart.lines())
            .map_err(CartStoreError::from)
    }
}
