//! Screens and timers

use std::fmt;

/// A full-frame kiosk screen. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Attract screen
    #[default]
    Welcome,

    /// Dedicated scan screen (separate-scan layout)
    Scan,

    /// Cart review; also the scan screen in the combined layout
    Cart,

    /// Produce scale
    Weight,

    /// Payment method selection
    PaymentMethods,

    /// QRIS code and countdown
    Qris,

    /// Card terminal prompts
    CardPayment,

    /// Payment succeeded
    Success,

    /// Digital receipt
    Receipt,

    /// Bagging reminder
    Bagging,

    /// Thank-you screen, resets on its own
    Exit,
}

impl Screen {
    /// Whether the header bar is shown on this screen.
    pub fn shows_header(self) -> bool {
        !matches!(self, Screen::Welcome | Screen::Exit)
    }

    /// Whether a payment is in progress on this screen.
    pub fn is_payment(self) -> bool {
        matches!(self, Screen::Qris | Screen::CardPayment)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Welcome => "welcome",
            Screen::Scan => "scan",
            Screen::Cart => "cart",
            Screen::Weight => "weight",
            Screen::PaymentMethods => "payment-methods",
            Screen::Qris => "qris",
            Screen::CardPayment => "card-payment",
            Screen::Success => "success",
            Screen::Receipt => "receipt",
            Screen::Bagging => "bagging",
            Screen::Exit => "exit",
        };

        f.write_str(name)
    }
}

/// Lifetime of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerScope {
    /// Cancelled when the screen is left
    Screen(Screen),

    /// Survives screen changes
    Global,
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// The camera scan finished.
    ScanCompleted,

    /// Hide the scan toast.
    ScanToastExpired,

    /// Raise the scale reading.
    ScaleTick,

    /// One second of the QRIS countdown.
    QrisTick,

    /// The QRIS payment was confirmed.
    QrisConfirmed,

    /// The card terminal stops waiting for a tap and reads the card.
    CardInserted,

    /// The acquirer answered.
    CardProcessed,

    /// The approval message has been shown long enough.
    CardApprovalShown,

    /// Return to the welcome screen.
    AutoReset,

    /// Hide the network toast.
    NetworkToastExpired,
}
