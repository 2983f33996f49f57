//! Catalog
//!
//! The fixed product list the kiosk sells from.

use std::io;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    fixtures::{BUNDLED_CATALOG_YAML, CatalogFixture, FixtureError, parse_price},
    products::{Product, ProductKey},
};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The fixture could not be parsed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The fixture contains no products.
    #[error("catalog contains no products")]
    Empty,

    /// Two products share a SKU.
    #[error("duplicate SKU in catalog: {0}")]
    DuplicateSku(String),

    /// Products are priced in more than one currency (sku, product currency, catalog currency).
    #[error("product {0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    order: Vec<ProductKey>,
    by_sku: FxHashMap<String, ProductKey>,
    currency: &'static Currency,
}

impl Catalog {
    /// Load the catalog bundled with the kiosk.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled fixture is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml(BUNDLED_CATALOG_YAML)
    }

    /// Load a catalog from a YAML fixture.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the fixture cannot be parsed, is empty,
    /// repeats a SKU or mixes currencies.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture = CatalogFixture::from_yaml(yaml)?;

        let mut products = Vec::with_capacity(fixture.products.len());

        for product in fixture.products {
            let (minor_units, currency) = parse_price(&product.price)?;

            products.push(Product {
                sku: product.sku,
                name: product.name,
                price: Money::from_minor(minor_units, currency),
                image: product.image,
                category: product.category,
            });
        }

        Self::with_products(products)
    }

    /// Build a catalog from products, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if `products` is empty, repeats a SKU or
    /// mixes currencies.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut slots = SlotMap::with_key();
        let mut order = Vec::new();
        let mut by_sku = FxHashMap::default();
        let mut currency: Option<&'static Currency> = None;

        for product in products {
            let product_currency = product.price.currency();

            match currency {
                Some(expected) if expected != product_currency => {
                    return Err(CatalogError::CurrencyMismatch(
                        product.sku,
                        product_currency.iso_alpha_code,
                        expected.iso_alpha_code,
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            if by_sku.contains_key(&product.sku) {
                return Err(CatalogError::DuplicateSku(product.sku));
            }

            let sku = product.sku.clone();
            let key = slots.insert(product);

            by_sku.insert(sku, key);
            order.push(key);
        }

        let currency = currency.ok_or(CatalogError::Empty)?;

        Ok(Catalog {
            products: slots,
            order,
            by_sku,
            currency,
        })
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Look up a product key by SKU.
    pub fn find_sku(&self, sku: &str) -> Option<ProductKey> {
        self.by_sku.get(sku).copied()
    }

    /// Iterate over all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.order
            .iter()
            .filter_map(|&key| self.products.get(key).map(|product| (key, product)))
    }

    /// Packaged products, in catalog order. These are what the scanner can read.
    pub fn scannable(&self) -> Vec<ProductKey> {
        self.iter()
            .filter(|(_, product)| !product.is_weighed())
            .map(|(key, _)| key)
            .collect()
    }

    /// Produce sold by weight, in catalog order.
    pub fn weighable(&self) -> Vec<ProductKey> {
        self.iter()
            .filter(|(_, product)| product.is_weighed())
            .map(|(key, _)| key)
            .collect()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog is empty. Always `false` for a loaded catalog.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Currency all products are priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the catalog as a table.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["SKU", "Name", "Sold", "Price"]);

        for (_, product) in self.iter() {
            let price = if product.is_weighed() {
                format!("{}/kg", product.price)
            } else {
                product.price.to_string()
            };

            builder.push_record([
                product.sku.clone(),
                product.name.clone(),
                product.category.to_string(),
                price,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..4), Alignment::right());

        writeln!(out, "{table}")
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{IDR, USD};
    use testresult::TestResult;

    use crate::products::ProductCategory;

    use super::*;

    fn product(sku: &str, minor: i64, currency: &'static Currency) -> Product {
        Product {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            price: Money::from_minor(minor, currency),
            image: String::new(),
            category: ProductCategory::Packaged,
        }
    }

    #[test]
    fn bundled_catalog_splits_scannable_and_weighable() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.scannable().len(), 5);
        assert_eq!(catalog.weighable().len(), 4);
        assert_eq!(catalog.currency(), IDR);

        Ok(())
    }

    #[test]
    fn write_to_lists_every_product() -> TestResult {
        let catalog = Catalog::bundled()?;
        let mut out = Vec::new();

        catalog.write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Indomie Goreng"), "{text}");
        assert!(text.contains("Brokoli Segar"), "{text}");
        assert!(text.contains("/kg"), "{text}");

        Ok(())
    }

    #[test]
    fn iter_keeps_fixture_order() -> TestResult {
        let catalog = Catalog::bundled()?;

        let skus: Vec<&str> = catalog.iter().map(|(_, p)| p.sku.as_str()).collect();

        assert_eq!(skus, vec!["1", "2", "3", "4", "5", "w1", "w2", "w3", "w4"]);

        Ok(())
    }

    #[test]
    fn find_sku_returns_matching_product() -> TestResult {
        let catalog = Catalog::bundled()?;

        let key = catalog.find_sku("w2").ok_or("missing w2")?;
        let product = catalog.get(key).ok_or("missing product")?;

        assert_eq!(product.name, "Pisang Cavendish");
        assert!(product.is_weighed());
        assert_eq!(catalog.find_sku("nope"), None);

        Ok(())
    }

    #[test]
    fn empty_catalog_errors() {
        let result = Catalog::with_products([]);

        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_sku_errors() {
        let result = Catalog::with_products([product("1", 100, IDR), product("1", 200, IDR)]);

        assert!(matches!(result, Err(CatalogError::DuplicateSku(sku)) if sku == "1"));
    }

    #[test]
    fn mixed_currency_errors() {
        let result = Catalog::with_products([product("1", 100, IDR), product("2", 100, USD)]);

        match result {
            Err(CatalogError::CurrencyMismatch(sku, found, expected)) => {
                assert_eq!(sku, "2");
                assert_eq!(found, USD.iso_alpha_code);
                assert_eq!(expected, IDR.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_price_in_yaml_errors() {
        let yaml = "products:\n  - sku: \"1\"\n    name: Broken\n    price: free\n    category: packaged\n";

        let result = Catalog::from_yaml(yaml);

        assert!(matches!(
            result,
            Err(CatalogError::Fixture(FixtureError::InvalidPrice(_)))
        ));
    }
}
