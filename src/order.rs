//! Order numbers

use std::fmt;

use crate::random::{RandomSource, pick_index};

const FIRST: u32 = 10_000;
const COUNT: usize = 90_000;

/// Order number shown on the success screen and the receipt, `ORD-NNNNN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderNumber(u32);

impl OrderNumber {
    /// Draw a five digit order number.
    pub fn generate<R: RandomSource + ?Sized>(random: &mut R) -> Self {
        let offset = pick_index(random, COUNT).unwrap_or_default();

        Self(FIRST + u32::try_from(offset).unwrap_or_default())
    }

    /// Numeric part of the order number.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD-{}", self.0)
    }
}
