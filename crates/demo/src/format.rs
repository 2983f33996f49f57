use std::time::Duration;

use decimal_percentage::Percentage;
use humanize_duration::{Truncate, prelude::DurationExt};
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

/// Format an amount as whole rupiah with dotted thousands, e.g. `Rp 18.900`.
pub(crate) fn rupiah(money: &Money<'static, Currency>) -> String {
    let whole = money
        .amount()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .normalize()
        .to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);

    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(digit);
    }

    let sign = if money.is_negative() { "-" } else { "" };

    format!("{sign}Rp {grouped}")
}

/// Price label for a catalog product.
pub(crate) fn unit_price(money: &Money<'static, Currency>, weighed: bool) -> String {
    if weighed {
        format!("{}/kg", rupiah(money))
    } else {
        rupiah(money)
    }
}

/// Tax row label, e.g. `PPN (11%)`.
pub(crate) fn tax_label(rate: Percentage) -> String {
    let points = ((rate * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2).normalize();

    format!("PPN ({points}%)")
}

pub(crate) fn kilograms(weight: Decimal) -> String {
    format!("{weight:.2} kg")
}

/// `mm:ss` clock face for the QRIS countdown.
pub(crate) fn countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Spoken form of the remaining QRIS time.
pub(crate) fn remaining(seconds: u32) -> String {
    if seconds == 0 {
        return "waktu habis".to_string();
    }

    format!("{} tersisa", Duration::from_secs(u64::from(seconds)).human(Truncate::Second))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::IDR;

    use super::*;

    #[test]
    fn rupiah_groups_thousands() {
        assert_eq!(rupiah(&Money::from_major(3_500, IDR)), "Rp 3.500");
        assert_eq!(rupiah(&Money::from_major(1_234_567, IDR)), "Rp 1.234.567");
        assert_eq!(rupiah(&Money::from_major(500, IDR)), "Rp 500");
        assert_eq!(rupiah(&Money::from_major(0, IDR)), "Rp 0");
    }

    #[test]
    fn rupiah_rounds_half_up_to_whole_units() {
        let price = Money::from_decimal(Decimal::new(42_350, 2), IDR);

        assert_eq!(rupiah(&price), "Rp 424");
    }

    #[test]
    fn weighed_prices_are_per_kilogram() {
        let price = Money::from_major(45_000, IDR);

        assert_eq!(unit_price(&price, true), "Rp 45.000/kg");
        assert_eq!(unit_price(&price, false), "Rp 45.000");
    }

    #[test]
    fn tax_label_shows_whole_points() {
        assert_eq!(tax_label(Percentage::from(0.11)), "PPN (11%)");
        assert_eq!(tax_label(Percentage::from(0.125)), "PPN (12.5%)");
    }

    #[test]
    fn kilograms_keep_two_decimals() {
        assert_eq!(kilograms(Decimal::new(11, 1)), "1.10 kg");
        assert_eq!(kilograms(Decimal::new(205, 2)), "2.05 kg");
    }

    #[test]
    fn countdown_is_a_clock_face() {
        assert_eq!(countdown(60), "01:00");
        assert_eq!(countdown(59), "00:59");
        assert_eq!(countdown(5), "00:05");
        assert_eq!(countdown(0), "00:00");
    }

    #[test]
    fn remaining_reports_timeout() {
        assert_eq!(remaining(0), "waktu habis");
        assert!(remaining(42).ends_with("tersisa"));
    }
}
