//! Payments

use std::fmt;

/// Payment method offered on the method-selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PaymentMethod {
    /// QRIS: scan a QR code with an e-wallet or banking app
    Qris,

    /// Debit or credit card
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Qris => write!(f, "QRIS"),
            PaymentMethod::Card => write!(f, "Card"),
        }
    }
}

/// How a payment attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOutcome {
    /// Payment went through.
    Approved,

    /// The card was declined.
    Declined,

    /// The QR code expired before payment was confirmed.
    TimedOut,

    /// The customer backed out.
    Cancelled,
}

impl PaymentOutcome {
    /// Whether the order can proceed to the success screen.
    pub fn is_approved(self) -> bool {
        matches!(self, PaymentOutcome::Approved)
    }
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentOutcome::Approved => "approved",
            PaymentOutcome::Declined => "declined",
            PaymentOutcome::TimedOut => "timed out",
            PaymentOutcome::Cancelled => "cancelled",
        };

        f.write_str(label)
    }
}
