//! Card terminal

use std::fmt;

use tracing::debug;

use crate::{devices::DeviceError, payment::PaymentOutcome, random::RandomSource};

/// Stage of a card payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardStage {
    /// Waiting for the customer to insert or tap a card
    #[default]
    Insert,

    /// Talking to the (imaginary) acquirer
    Processing,

    /// Payment approved
    Approved,

    /// Payment declined
    Declined,
}

impl fmt::Display for CardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardStage::Insert => "insert",
            CardStage::Processing => "processing",
            CardStage::Approved => "approved",
            CardStage::Declined => "declined",
        };

        f.write_str(label)
    }
}

/// Card terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardTerminal {
    stage: CardStage,
    attempts: u32,
}

impl CardTerminal {
    /// Reset the terminal for a new payment.
    pub fn begin(&mut self) {
        *self = Self {
            stage: CardStage::Insert,
            attempts: 1,
        };
    }

    /// Card read, start processing.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CardStage`] unless the terminal is waiting for a card.
    pub fn read_card(&mut self) -> Result<(), DeviceError> {
        self.expect(CardStage::Insert)?;
        self.stage = CardStage::Processing;

        Ok(())
    }

    /// Resolve processing. Approved when the draw lands inside `approval_rate`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CardStage`] unless the terminal is processing.
    pub fn resolve<R: RandomSource + ?Sized>(
        &mut self,
        random: &mut R,
        approval_rate: f64,
    ) -> Result<PaymentOutcome, DeviceError> {
        self.expect(CardStage::Processing)?;

        let draw = random.next_unit();
        let outcome = if draw > 1.0 - approval_rate {
            PaymentOutcome::Approved
        } else {
            PaymentOutcome::Declined
        };

        self.stage = match outcome {
            PaymentOutcome::Approved => CardStage::Approved,
            _ => CardStage::Declined,
        };

        debug!(draw, %outcome, attempt = self.attempts, "card payment resolved");

        Ok(outcome)
    }

    /// Start over after a decline.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::CardStage`] unless the card was declined.
    pub fn retry(&mut self) -> Result<(), DeviceError> {
        self.expect(CardStage::Declined)?;
        self.stage = CardStage::Insert;
        self.attempts = self.attempts.saturating_add(1);

        Ok(())
    }

    /// Current stage
    pub fn stage(&self) -> CardStage {
        self.stage
    }

    /// Attempts made in this payment, counting the current one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn expect(self, expected: CardStage) -> Result<(), DeviceError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(DeviceError::CardStage {
                expected,
                actual: self.stage,
            })
        }
    }
}
