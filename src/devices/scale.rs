//! Produce scale
//!
//! Selecting a product puts a random amount of it on the scale. The reading
//! then climbs in fixed steps, one per tick, until it settles on that amount.

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive};
use tracing::debug;

use crate::{
    devices::DeviceError,
    products::ProductKey,
    random::RandomSource,
    weight::Weight,
};

/// Scale state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scale {
    product: Option<ProductKey>,
    reading: Decimal,
    target: Decimal,
    weighing: bool,
}

/// Smallest amount put on the scale, and how much more it can be.
const MIN_KG: Decimal = Decimal::from_parts(1, 0, 0, false, 1);
const SPAN_KG: Decimal = Decimal::TWO;

impl Scale {
    /// Put `product` on the scale and start weighing.
    ///
    /// The target is drawn uniformly from 0.10 to 2.10 kg, rounded to two
    /// decimals. Any previous reading is discarded.
    pub fn select<R: RandomSource + ?Sized>(&mut self, product: ProductKey, random: &mut R) {
        let draw = Decimal::from_f64(random.next_unit().clamp(0.0, 1.0)).unwrap_or_default();
        let target = (draw * SPAN_KG + MIN_KG)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        debug!(?product, %target, "weighing produce");

        *self = Self {
            product: Some(product),
            reading: Decimal::ZERO,
            target,
            weighing: true,
        };
    }

    /// Raise the reading by `step`. Returns `true` once the reading has settled.
    pub fn tick(&mut self, step: Decimal) -> bool {
        if !self.weighing {
            return true;
        }

        self.reading = (self.reading + step).min(self.target);

        if self.reading >= self.target {
            self.weighing = false;
        }

        !self.weighing
    }

    /// The settled weight on the scale. The product stays on the scale until
    /// [`Scale::reset`].
    ///
    /// # Errors
    ///
    /// - [`DeviceError::NothingOnScale`]: no product was selected.
    /// - [`DeviceError::StillWeighing`]: the reading has not settled.
    pub fn settled(&self) -> Result<(ProductKey, Weight), DeviceError> {
        let product = self.product.ok_or(DeviceError::NothingOnScale)?;

        if self.weighing {
            return Err(DeviceError::StillWeighing);
        }

        Ok((product, Weight::from_kilograms(self.reading)?))
    }

    /// Empty the scale.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Selected product
    pub fn product(&self) -> Option<ProductKey> {
        self.product
    }

    /// Current reading in kilograms
    pub fn reading(&self) -> Decimal {
        self.reading
    }

    /// Whether the reading is still climbing
    pub fn is_weighing(&self) -> bool {
        self.weighing
    }
}
