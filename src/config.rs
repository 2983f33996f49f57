//! Kiosk configuration
//!
//! Every setting is a CLI flag with a `KIOSK_*` environment fallback. The
//! defaults reproduce the behaviour of the shop floor kiosk.

use std::{str::FromStr, time::Duration};

use clap::Args;
use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::pricing::{TaxPolicy, TaxRounding};

/// Errors raised while parsing configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Percentage could not be parsed.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),

    /// Probability outside 0..=1.
    #[error("probability must be between 0 and 1, got {0}")]
    InvalidProbability(String),
}

/// Where the customer scans items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FlowLayout {
    /// Scan directly on the cart screen.
    #[default]
    Combined,

    /// A dedicated scan screen in front of the cart review.
    SeparateScan,
}

/// Kiosk settings.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct KioskConfig {
    /// Screen layout for scanning
    #[arg(long, env = "KIOSK_LAYOUT", value_enum, default_value_t = FlowLayout::Combined)]
    pub layout: FlowLayout,

    /// Tax rate, as "11%" or "0.11"
    #[arg(long, env = "KIOSK_TAX_RATE", default_value = "11%", value_parser = parse_percentage)]
    pub tax_rate: Percentage,

    /// Tax rounding (exact, whole-unit)
    #[arg(long, env = "KIOSK_TAX_ROUNDING", value_enum, default_value_t = TaxRounding::WholeUnit)]
    pub tax_rounding: TaxRounding,

    /// Block checkout while offline
    #[arg(
        long,
        env = "KIOSK_REQUIRE_NETWORK",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub require_network: bool,

    /// Camera scan time in milliseconds
    #[arg(long, env = "KIOSK_SCAN_DELAY_MS", default_value_t = 800)]
    pub scan_delay_ms: u64,

    /// How long the scan toast stays up, in milliseconds
    #[arg(long, env = "KIOSK_SCAN_TOAST_MS", default_value_t = 2_000)]
    pub scan_toast_ms: u64,

    /// How long the barcode toast stays up, in milliseconds
    #[arg(long, env = "KIOSK_BARCODE_TOAST_MS", default_value_t = 3_000)]
    pub barcode_toast_ms: u64,

    /// Scale update interval in milliseconds
    #[arg(long, env = "KIOSK_SCALE_TICK_MS", default_value_t = 50)]
    pub scale_tick_ms: u64,

    /// Scale reading step per update, in grams
    #[arg(
        long,
        env = "KIOSK_SCALE_STEP_GRAMS",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub scale_step_grams: u32,

    /// Seconds before a QRIS code expires
    #[arg(
        long,
        env = "KIOSK_QRIS_COUNTDOWN_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub qris_countdown_secs: u32,

    /// Time until a QRIS payment is confirmed, in milliseconds
    #[arg(long, env = "KIOSK_QRIS_CONFIRM_MS", default_value_t = 5_000)]
    pub qris_confirm_ms: u64,

    /// Time the card terminal waits for a card, in milliseconds
    #[arg(long, env = "KIOSK_CARD_INSERT_MS", default_value_t = 4_000)]
    pub card_insert_ms: u64,

    /// Card processing time in milliseconds
    #[arg(long, env = "KIOSK_CARD_PROCESSING_MS", default_value_t = 3_000)]
    pub card_processing_ms: u64,

    /// How long "approved" shows before the success screen, in milliseconds
    #[arg(long, env = "KIOSK_CARD_APPROVED_MS", default_value_t = 2_000)]
    pub card_approved_ms: u64,

    /// Probability that a card payment is approved
    #[arg(long, env = "KIOSK_CARD_APPROVAL_RATE", default_value = "0.9", value_parser = parse_probability)]
    pub card_approval_rate: f64,

    /// Time on the exit screen before the kiosk resets, in milliseconds
    #[arg(long, env = "KIOSK_EXIT_RESET_MS", default_value_t = 5_000)]
    pub exit_reset_ms: u64,

    /// How long the network toast lingers after reconnecting, in milliseconds
    #[arg(long, env = "KIOSK_NETWORK_TOAST_MS", default_value_t = 2_000)]
    pub network_toast_ms: u64,

    /// Prefix of the QRIS payment payload
    #[arg(long, env = "KIOSK_QR_PREFIX", default_value = "YOGYA-PAY")]
    pub qr_prefix: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            layout: FlowLayout::Combined,
            tax_rate: Percentage::from(Decimal::new(11, 2)),
            tax_rounding: TaxRounding::WholeUnit,
            require_network: true,
            scan_delay_ms: 800,
            scan_toast_ms: 2_000,
            barcode_toast_ms: 3_000,
            scale_tick_ms: 50,
            scale_step_grams: 50,
            qris_countdown_secs: 60,
            qris_confirm_ms: 5_000,
            card_insert_ms: 4_000,
            card_processing_ms: 3_000,
            card_approved_ms: 2_000,
            card_approval_rate: 0.9,
            exit_reset_ms: 5_000,
            network_toast_ms: 2_000,
            qr_prefix: "YOGYA-PAY".to_string(),
        }
    }
}

impl KioskConfig {
    /// Tax policy applied at checkout.
    pub fn tax_policy(&self) -> TaxPolicy {
        TaxPolicy {
            rate: self.tax_rate,
            rounding: self.tax_rounding,
        }
    }

    /// Scale reading step in kilograms, at least one gram.
    pub fn scale_step(&self) -> Decimal {
        Decimal::new(i64::from(self.scale_step_grams.max(1)), 3)
    }

    /// Camera scan time
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    /// Scan toast lifetime
    pub fn scan_toast(&self) -> Duration {
        Duration::from_millis(self.scan_toast_ms)
    }

    /// Barcode toast lifetime
    pub fn barcode_toast(&self) -> Duration {
        Duration::from_millis(self.barcode_toast_ms)
    }

    /// Scale update interval
    pub fn scale_tick(&self) -> Duration {
        Duration::from_millis(self.scale_tick_ms)
    }

    /// QRIS confirmation delay
    pub fn qris_confirm(&self) -> Duration {
        Duration::from_millis(self.qris_confirm_ms)
    }

    /// Card insert wait
    pub fn card_insert(&self) -> Duration {
        Duration::from_millis(self.card_insert_ms)
    }

    /// Card processing time
    pub fn card_processing(&self) -> Duration {
        Duration::from_millis(self.card_processing_ms)
    }

    /// Card approved display time
    pub fn card_approved(&self) -> Duration {
        Duration::from_millis(self.card_approved_ms)
    }

    /// Exit screen timeout
    pub fn exit_reset(&self) -> Duration {
        Duration::from_millis(self.exit_reset_ms)
    }

    /// Network toast linger time
    pub fn network_toast(&self) -> Duration {
        Duration::from_millis(self.network_toast_ms)
    }
}

/// Parses a percentage, either as "11%" or as a fraction such as "0.11".
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPercentage`] if the value is not a decimal
/// number or is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let invalid = || ConfigError::InvalidPercentage(s.to_string());
    let trimmed = s.trim();

    let fraction = match trimmed.strip_suffix('%') {
        Some(points) => Decimal::from_str(points.trim())
            .map_err(|_err| invalid())?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?,
        None => Decimal::from_str(trimmed).map_err(|_err| invalid())?,
    };

    if fraction < Decimal::ZERO {
        return Err(invalid());
    }

    Ok(Percentage::from(fraction))
}

/// Parses a probability in `0..=1`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidProbability`] for non-numbers and values out of range.
pub fn parse_probability(s: &str) -> Result<f64, ConfigError> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_err| ConfigError::InvalidProbability(s.to_string()))?;

    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidProbability(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        kiosk: KioskConfig,
    }

    #[test]
    fn parse_percentage_accepts_both_formats() -> TestResult {
        assert_eq!(parse_percentage("11%")?, Percentage::from(Decimal::new(11, 2)));
        assert_eq!(parse_percentage(" 0.2 ")?, Percentage::from(Decimal::new(2, 1)));
        assert_eq!(parse_percentage("12.5 %")?, Percentage::from(Decimal::new(125, 3)));
        assert_eq!(parse_percentage("0%")?, Percentage::from(Decimal::ZERO));
        assert_eq!(
            parse_percentage("eleven"),
            Err(ConfigError::InvalidPercentage("eleven".to_string()))
        );

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_non_decimal_and_negative_rates() {
        for input in ["NaN", "inf", "1e40%", "-5%", "-0.1", "%", ""] {
            assert_eq!(
                parse_percentage(input),
                Err(ConfigError::InvalidPercentage(input.to_string())),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn zero_scale_step_and_countdown_are_rejected() {
        assert!(
            Cli::try_parse_from(["kiosk", "--scale-step-grams", "0"]).is_err(),
            "a zero scale step never settles"
        );
        assert!(
            Cli::try_parse_from(["kiosk", "--qris-countdown-secs", "0"]).is_err(),
            "a zero countdown expires immediately"
        );
    }

    #[test]
    fn defaults_match_flag_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["kiosk"])?;

        assert_eq!(cli.kiosk, KioskConfig::default());

        Ok(())
    }

    #[test]
    fn parse_probability_rejects_out_of_range() {
        assert_eq!(parse_probability("0.5"), Ok(0.5));
        assert!(parse_probability("1.5").is_err());
        assert!(parse_probability("-0.1").is_err());
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let cli = Cli::try_parse_from([
            "kiosk",
            "--layout",
            "separate-scan",
            "--tax-rounding",
            "exact",
            "--require-network",
            "false",
            "--qris-confirm-ms",
            "90000",
        ])?;

        assert_eq!(cli.kiosk.layout, FlowLayout::SeparateScan);
        assert_eq!(cli.kiosk.tax_rounding, TaxRounding::Exact);
        assert!(!cli.kiosk.require_network);
        assert_eq!(cli.kiosk.qris_confirm(), Duration::from_secs(90));

        Ok(())
    }

    #[test]
    fn scale_step_is_in_kilograms() {
        assert_eq!(KioskConfig::default().scale_step(), Decimal::new(5, 2));

        let zero = KioskConfig {
            scale_step_grams: 0,
            ..KioskConfig::default()
        };

        assert_eq!(zero.scale_step(), Decimal::new(1, 3));
    }
}
