//! QR code images
//!
//! QR codes are decorative; images come from a public generator.

use rust_decimal::prelude::ToPrimitive;
use rusty_money::{Money, iso::Currency};

use crate::{fixtures::minor_units_per_major, order::OrderNumber};

const GENERATOR: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Image URL for a QR code of `size`×`size` pixels encoding `payload`.
pub fn image_url(size: u32, payload: &str) -> String {
    format!("{GENERATOR}?size={size}x{size}&data={}", urlencoding::encode(payload))
}

/// Payment payload, `<prefix>-<total in whole major units>`.
pub fn payment_payload(prefix: &str, total: &Money<'static, Currency>) -> String {
    let per_major = minor_units_per_major(total.currency())
        .to_i64()
        .unwrap_or(1)
        .max(1);
    let major = total.to_minor_units() / per_major;

    format!("{prefix}-{major}")
}

/// Payload printed on the receipt.
pub fn receipt_payload(order: OrderNumber) -> String {
    order.to_string()
}
