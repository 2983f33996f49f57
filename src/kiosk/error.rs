//! Kiosk errors

use thiserror::Error;

use crate::{
    assistance::AssistanceError, cart::CartError, devices::DeviceError, kiosk::Screen,
    pricing::PricingError, products::ProductKey, receipt::ReceiptError,
};

/// Errors returned by the kiosk controller.
///
/// A rejected action leaves the kiosk untouched.
#[derive(Debug, Error)]
pub enum KioskError {
    /// The action does not apply to the current screen.
    #[error("{action} is not available on the {screen} screen")]
    InvalidAction {
        /// Action name
        action: &'static str,

        /// Screen the kiosk was on
        screen: Screen,
    },

    /// Checkout or cart review needs at least one item.
    #[error("the cart is empty")]
    EmptyCart,

    /// Checkout needs a network connection.
    #[error("the kiosk is offline")]
    Offline,

    /// A product key did not resolve to a produce item.
    #[error("product {0:?} is not a weighable catalog item")]
    NotWeighable(ProductKey),

    /// The catalog has nothing to scan.
    #[error("no scannable products in the catalog")]
    NothingToScan,

    /// Cart error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Pricing error
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Device error
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Help modal error
    #[error(transparent)]
    Assistance(#[from] AssistanceError),

    /// Receipt error
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}
