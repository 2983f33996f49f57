//! Pricing
//!
//! Line totals, subtotal, tax and total for a cart.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    fixtures::minor_units_per_major,
    weight::Weight,
};

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// An amount could not be represented in minor units.
    #[error("amount overflowed while pricing the cart")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How tax is rounded before it is added to the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TaxRounding {
    /// Round tax to the currency's minor unit.
    Exact,

    /// Round tax to whole major units (whole rupiah).
    #[default]
    WholeUnit,
}

/// Tax rate and rounding applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxPolicy {
    /// Tax rate as a fraction of the subtotal
    pub rate: Percentage,

    /// Tax rounding
    pub rounding: TaxRounding,
}

impl Default for TaxPolicy {
    /// 11% PPN, rounded to whole rupiah.
    fn default() -> Self {
        Self {
            rate: Percentage::from(Decimal::new(11, 2)),
            rounding: TaxRounding::WholeUnit,
        }
    }
}

/// Priced cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of all line totals
    pub subtotal: Money<'static, Currency>,

    /// Tax on the subtotal
    pub tax: Money<'static, Currency>,

    /// Subtotal plus tax
    pub total: Money<'static, Currency>,
}

impl Totals {
    /// Totals for an empty cart.
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            tax: zero,
            total: zero,
        }
    }
}

/// Calculates the total of a single line: unit price × (weight or 1) × quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result cannot be represented in minor units.
pub fn line_total(item: &CartItem) -> Result<Money<'static, Currency>, PricingError> {
    let unit_minor = Decimal::from(item.unit_price().to_minor_units());
    let weight = item.weight().map_or(Decimal::ONE, Weight::kilograms);

    let minor = unit_minor
        .checked_mul(weight)
        .and_then(|value| value.checked_mul(Decimal::from(item.quantity())))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(
        round_minor(minor)?,
        item.unit_price().currency(),
    ))
}

/// Prices a cart.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: an amount could not be represented in minor units.
/// - [`PricingError::Money`]: money arithmetic failed, e.g. mixed currencies.
pub fn price_cart(
    cart: &Cart,
    policy: &TaxPolicy,
    currency: &'static Currency,
) -> Result<Totals, PricingError> {
    let subtotal = cart.iter().try_fold(
        Money::from_minor(0, currency),
        |acc, item| -> Result<_, PricingError> { Ok(acc.add(line_total(item)?)?) },
    )?;

    let tax = Money::from_minor(tax_minor(subtotal.to_minor_units(), policy, currency)?, currency);
    let total = subtotal.add(tax)?;

    Ok(Totals {
        subtotal,
        tax,
        total,
    })
}

fn tax_minor(
    subtotal_minor: i64,
    policy: &TaxPolicy,
    currency: &Currency,
) -> Result<i64, PricingError> {
    let raw = (policy.rate * Decimal::ONE)
        .checked_mul(Decimal::from(subtotal_minor))
        .ok_or(PricingError::Overflow)?;

    match policy.rounding {
        TaxRounding::Exact => round_minor(raw),
        TaxRounding::WholeUnit => {
            let per_major = minor_units_per_major(currency);
            let major = raw.checked_div(per_major).ok_or(PricingError::Overflow)?;

            round_minor(major)?
                .checked_mul(per_major.to_i64().ok_or(PricingError::Overflow)?)
                .ok_or(PricingError::Overflow)
        }
    }
}

fn round_minor(value: Decimal) -> Result<i64, PricingError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::IDR;
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::{
        products::{Product, ProductCategory, ProductKey},
        weight::Weight,
    };

    use super::*;

    fn idr(major: i64) -> Money<'static, Currency> {
        let per_major = minor_units_per_major(IDR).to_i64().unwrap_or(1);

        Money::from_minor(major * per_major, IDR)
    }

    fn product(price: i64, category: ProductCategory) -> Product {
        Product {
            sku: format!("{price}"),
            name: format!("Item {price}"),
            price: idr(price),
            image: String::new(),
            category,
        }
    }

    fn exact() -> TaxPolicy {
        TaxPolicy {
            rounding: TaxRounding::Exact,
            ..TaxPolicy::default()
        }
    }

    #[test]
    fn empty_cart_prices_to_zero() -> TestResult {
        let totals = price_cart(&Cart::new(), &TaxPolicy::default(), IDR)?;

        assert_eq!(totals, Totals::zero(IDR));

        Ok(())
    }

    #[test]
    fn unit_items_multiply_by_quantity() -> TestResult {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();
        let noodles = product(3500, ProductCategory::Packaged);

        let mut cart = Cart::new();
        let key = keys.insert(());
        cart.scan(key, &noodles)?;
        cart.scan(key, &noodles)?;

        let totals = price_cart(&cart, &TaxPolicy::default(), IDR)?;

        assert_eq!(totals.subtotal, idr(7000));
        assert_eq!(totals.tax, idr(770));
        assert_eq!(totals.total, idr(7770));

        Ok(())
    }

    #[test]
    fn weighed_line_total_uses_weight() -> TestResult {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();
        let apples = product(45_000, ProductCategory::Produce);

        let mut cart = Cart::new();
        let line = cart.add_weighed(
            keys.insert(()),
            &apples,
            Weight::from_kilograms(Decimal::new(15, 1))?,
        )?;

        assert_eq!(line_total(cart.get(line)?)?, idr(67_500));

        Ok(())
    }

    #[test]
    fn exact_and_whole_unit_rounding_differ_on_fractional_tax() -> TestResult {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();
        let item = product(3_333, ProductCategory::Packaged);

        let mut cart = Cart::new();
        cart.scan(keys.insert(()), &item)?;

        // 3333 × 11% = 366.63
        let exact_totals = price_cart(&cart, &exact(), IDR)?;
        let whole_totals = price_cart(&cart, &TaxPolicy::default(), IDR)?;

        assert_eq!(
            exact_totals.tax.to_minor_units(),
            idr(36_663).to_minor_units() / 100
        );
        assert_eq!(whole_totals.tax, idr(367));
        assert_eq!(whole_totals.total, idr(3_700));

        Ok(())
    }

    #[test]
    fn total_is_subtotal_plus_tax_for_mixed_cart() -> TestResult {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();
        let milk = product(18_900, ProductCategory::Packaged);
        let bananas = product(22_000, ProductCategory::Produce);

        let mut cart = Cart::new();
        let milk_line = cart.scan(keys.insert(()), &milk)?;
        cart.update_quantity(milk_line, 2)?;
        cart.add_weighed(
            keys.insert(()),
            &bananas,
            Weight::from_kilograms(Decimal::new(137, 2))?,
        )?;

        for policy in [exact(), TaxPolicy::default()] {
            let totals = price_cart(&cart, &policy, IDR)?;
            let line_sum = cart.iter().try_fold(0_i64, |acc, item| {
                line_total(item).map(|money| acc + money.to_minor_units())
            })?;

            // 3 × 18900 + 1.37 × 22000 = 56700 + 30140
            assert_eq!(totals.subtotal, idr(86_840));
            assert_eq!(totals.subtotal.to_minor_units(), line_sum);
            assert_eq!(
                totals.total.to_minor_units(),
                totals.subtotal.to_minor_units() + totals.tax.to_minor_units()
            );
        }

        Ok(())
    }

    #[test]
    fn custom_rate_is_applied() -> TestResult {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();
        let item = product(10_000, ProductCategory::Packaged);

        let mut cart = Cart::new();
        cart.scan(keys.insert(()), &item)?;

        let policy = TaxPolicy {
            rate: Percentage::from(0.2),
            rounding: TaxRounding::WholeUnit,
        };

        let totals = price_cart(&cart, &policy, IDR)?;

        assert_eq!(totals.tax, idr(2_000));
        assert_eq!(totals.total, idr(12_000));

        Ok(())
    }
}
