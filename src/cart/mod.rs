//! Cart

use thiserror::Error;
use tracing::debug;

use crate::{
    products::{Product, ProductKey},
    weight::Weight,
};

mod line;

pub use line::{CartItem, LineId};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line was not found in the cart.
    #[error("Line {0} not found")]
    LineNotFound(LineId),

    /// Produce must go through the scale, not the scanner.
    #[error("{0} is sold by weight and cannot be scanned")]
    WeighedProductScanned(String),

    /// Packaged goods have no weight.
    #[error("{0} is sold per unit and cannot be weighed")]
    UnitProductWeighed(String),
}

/// Result of changing the quantity of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),

    /// The quantity reached zero and the line was removed.
    Removed,
}

/// Cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    next_line: u64,
}

impl Cart {
    /// Create a new, empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scanned unit of a packaged product.
    ///
    /// A repeat scan of a product already in the cart increments that line
    /// instead of adding a new one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::WeighedProductScanned`] if the product is sold by weight.
    pub fn scan(&mut self, key: ProductKey, product: &Product) -> Result<LineId, CartError> {
        if product.is_weighed() {
            return Err(CartError::WeighedProductScanned(product.name.clone()));
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.key == key && item.weight.is_none())
        {
            item.quantity = item.quantity.saturating_add(1);

            debug!(line = %item.id, quantity = item.quantity, "incremented cart line");

            return Ok(item.id);
        }

        Ok(self.push(key, product, None))
    }

    /// Add a weighed produce item.
    ///
    /// Each weighing is its own line, even for the same product and weight.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnitProductWeighed`] if the product is sold per unit.
    pub fn add_weighed(
        &mut self,
        key: ProductKey,
        product: &Product,
        weight: Weight,
    ) -> Result<LineId, CartError> {
        if !product.is_weighed() {
            return Err(CartError::UnitProductWeighed(product.name.clone()));
        }

        Ok(self.push(key, product, Some(weight)))
    }

    /// Add `delta` to the quantity of a line. A line whose quantity would drop to
    /// zero or below is removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in the cart.
    pub fn update_quantity(&mut self, line: LineId, delta: i32) -> Result<QuantityChange, CartError> {
        let position = self.position(line)?;

        let item = self
            .items
            .get_mut(position)
            .ok_or(CartError::LineNotFound(line))?;

        let quantity = i64::from(item.quantity) + i64::from(delta);

        if quantity <= 0 {
            self.items.remove(position);

            debug!(%line, "removed cart line at zero quantity");

            return Ok(QuantityChange::Removed);
        }

        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        Ok(QuantityChange::Updated(item.quantity))
    }

    /// Remove a line regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in the cart.
    pub fn remove(&mut self, line: LineId) -> Result<CartItem, CartError> {
        let position = self.position(line)?;

        Ok(self.items.remove(position))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line is not in the cart.
    pub fn get(&self, line: LineId) -> Result<&CartItem, CartError> {
        self.items
            .iter()
            .find(|item| item.id == line)
            .ok_or(CartError::LineNotFound(line))
    }

    /// Iterate over the lines in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(CartItem::quantity).sum()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, line: LineId) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.id == line)
            .ok_or(CartError::LineNotFound(line))
    }

    fn push(&mut self, key: ProductKey, product: &Product, weight: Option<Weight>) -> LineId {
        let id = LineId(self.next_line);
        self.next_line += 1;

        self.items.push(CartItem {
            id,
            key,
            product: product.clone(),
            quantity: 1,
            weight,
        });

        debug!(line = %id, sku = %product.sku, "added cart line");

        id
    }
}
