//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// How a product is sold at the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Barcoded, packaged goods sold per unit.
    Packaged,

    /// Loose produce sold by weight.
    Produce,
}

impl ProductCategory {
    /// Whether products in this category are priced per kilogram.
    pub fn is_weighed(self) -> bool {
        matches!(self, ProductCategory::Produce)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::Packaged => f.write_str("packaged"),
            ProductCategory::Produce => f.write_str("produce"),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Stock keeping unit, also the barcode printed on packaged goods
    pub sku: String,

    /// Product name
    pub name: String,

    /// Unit price, or price per kilogram for weighed produce
    pub price: Money<'static, Currency>,

    /// Thumbnail image URL
    pub image: String,

    /// Product category
    pub category: ProductCategory,
}

impl Product {
    /// Whether the product is sold by weight.
    pub fn is_weighed(&self) -> bool {
        self.category.is_weighed()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::IDR;

    use super::*;

    fn product(category: ProductCategory) -> Product {
        Product {
            sku: "w1".to_string(),
            name: "Apel Fuji".to_string(),
            price: Money::from_minor(4_500_000, IDR),
            image: String::new(),
            category,
        }
    }

    #[test]
    fn produce_is_weighed() {
        assert!(product(ProductCategory::Produce).is_weighed());
        assert!(!product(ProductCategory::Packaged).is_weighed());
    }

    #[test]
    fn category_displays_as_snake_case() {
        assert_eq!(ProductCategory::Packaged.to_string(), "packaged");
        assert_eq!(ProductCategory::Produce.to_string(), "produce");
    }
}
