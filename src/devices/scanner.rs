//! Barcode scanner

use tracing::debug;

use crate::{
    catalog::Catalog,
    products::ProductKey,
    random::{RandomSource, pick_index},
};

/// Confirmation shown after a product was scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanToast {
    /// Scanned product
    pub product: ProductKey,

    /// Display name at the time of the scan
    pub name: String,
}

/// Camera scanner state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanner {
    scanning: bool,
    toast: Option<ScanToast>,
}

impl Scanner {
    /// Start a scan. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.scanning {
            return false;
        }

        self.scanning = true;

        true
    }

    /// Stop scanning and show the toast for `product`.
    pub fn complete(&mut self, product: ProductKey, name: impl Into<String>) {
        self.scanning = false;
        self.toast = Some(ScanToast {
            product,
            name: name.into(),
        });
    }

    /// Show a toast without a camera scan, e.g. after a barcode wedge read.
    pub fn show_toast(&mut self, product: ProductKey, name: impl Into<String>) {
        self.toast = Some(ScanToast {
            product,
            name: name.into(),
        });
    }

    /// Hide the toast.
    pub fn hide_toast(&mut self) {
        self.toast = None;
    }

    /// Abort any running scan and hide the toast.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a scan is in progress.
    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Current toast, if any.
    pub fn toast(&self) -> Option<&ScanToast> {
        self.toast.as_ref()
    }
}

/// Pick the product a scan resolves to.
///
/// A code that matches a packaged product's SKU picks that product. Anything
/// else, including no code at all, picks a packaged product at random.
pub fn resolve_scan<R: RandomSource + ?Sized>(
    catalog: &Catalog,
    random: &mut R,
    code: Option<&str>,
) -> Option<ProductKey> {
    if let Some(key) = code
        .and_then(|code| catalog.find_sku(code.trim()))
        .filter(|key| catalog.get(*key).is_some_and(|product| !product.is_weighed()))
    {
        return Some(key);
    }

    let scannable = catalog.scannable();
    let picked = pick_index(random, scannable.len()).and_then(|index| scannable.get(index).copied());

    debug!(code, ?picked, "no SKU match, picked a demo product");

    picked
}

/// Keyboard-wedge barcode reader.
///
/// USB barcode readers type the code followed by Enter. Characters are
/// buffered until Enter arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarcodeWedge {
    buffer: String,
}

impl BarcodeWedge {
    /// Feed one key press, named the way browsers name keys (`"a"`, `"Enter"`,
    /// `"Shift"`). Returns the completed code on Enter.
    ///
    /// Presses with a command modifier held, and named keys other than Enter,
    /// are ignored. Enter with an empty buffer does nothing.
    pub fn key(&mut self, key: &str, modifier: bool) -> Option<String> {
        if modifier {
            return None;
        }

        if key == "Enter" {
            if self.buffer.is_empty() {
                return None;
            }

            return Some(std::mem::take(&mut self.buffer));
        }

        let mut chars = key.chars();

        if let (Some(ch), None) = (chars.next(), chars.next()) {
            self.buffer.push(ch);
        }

        None
    }

    /// Characters typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drop anything typed so far.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
