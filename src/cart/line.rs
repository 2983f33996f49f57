//! Cart lines

use std::fmt;

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{Product, ProductKey},
    weight::Weight,
};

/// Identifies a line in a cart for the lifetime of that cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub(super) u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A product in the cart, with its quantity and (for produce) measured weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub(super) id: LineId,
    pub(super) key: ProductKey,
    pub(super) product: Product,
    pub(super) quantity: u32,
    pub(super) weight: Option<Weight>,
}

impl CartItem {
    /// Line identifier
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Catalog key of the product on this line
    pub fn product_key(&self) -> ProductKey {
        self.key
    }

    /// Product on this line
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Measured weight for produce lines
    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }

    /// Unit price (per kilogram for produce)
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.product.price
    }

    /// Whether this line was weighed on the scale
    pub fn is_weighed(&self) -> bool {
        self.weight.is_some()
    }
}
