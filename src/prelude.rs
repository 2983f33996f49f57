//! Kiosk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    assistance::{Assistance, AssistanceError, AssistanceReason},
    cart::{Cart, CartError, CartItem, LineId, QuantityChange},
    catalog::{Catalog, CatalogError},
    config::{FlowLayout, KioskConfig},
    devices::{CardStage, DeviceError},
    kiosk::{Action, Kiosk, KioskError, Screen},
    order::OrderNumber,
    payment::{PaymentMethod, PaymentOutcome},
    pricing::{PricingError, TaxPolicy, TaxRounding, Totals},
    products::{Product, ProductCategory, ProductKey},
    random::{RandomSource, ScriptedRandom, SeededRandom},
    receipt::{Receipt, ReceiptError},
    weight::Weight,
};
