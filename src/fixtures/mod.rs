//! Fixtures
//!
//! YAML fixture formats for the mock product catalog.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, IDR, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::products::ProductCategory;

/// Catalog bundled with the kiosk.
pub const BUNDLED_CATALOG_YAML: &str = include_str!("../../fixtures/catalog/kiosk.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Wrapper for the catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in display order
    pub products: Vec<ProductFixture>,
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the document is not a valid catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product SKU / barcode
    pub sku: String,

    /// Product name
    pub name: String,

    /// Product price in major units (e.g., "3500 IDR"); per kilogram for produce
    pub price: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub image: String,

    /// Product category
    pub category: ProductCategory,
}

/// Parse price string (e.g., "3500 IDR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "IDR" => IDR,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(minor_units_per_major(currency))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Number of minor units in one major unit of `currency` (100 sen per rupiah).
pub fn minor_units_per_major(currency: &Currency) -> Decimal {
    Decimal::from(10_i64.pow(currency.exponent))
}
