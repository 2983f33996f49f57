//! QRIS session
//!
//! A QR code stays valid for a fixed number of one-second ticks. The session
//! records the first outcome it sees and ignores everything after it.

use crate::{devices::DeviceError, payment::PaymentOutcome};

/// QRIS payment session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QrisSession {
    remaining: u32,
    total: u32,
    outcome: Option<PaymentOutcome>,
}

impl QrisSession {
    /// Start a session that expires after `ticks` seconds.
    pub fn begin(&mut self, ticks: u32) {
        *self = Self {
            remaining: ticks,
            total: ticks,
            outcome: None,
        };
    }

    /// Count down one second.
    ///
    /// Returns [`PaymentOutcome::TimedOut`] when the countdown reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::QrisEnded`] if the session already has an outcome.
    pub fn tick(&mut self) -> Result<Option<PaymentOutcome>, DeviceError> {
        if self.outcome.is_some() {
            return Err(DeviceError::QrisEnded);
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            return self.finish(PaymentOutcome::TimedOut).map(Some);
        }

        Ok(None)
    }

    /// Record the outcome of the session.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::QrisEnded`] if the session already has an outcome.
    pub fn finish(&mut self, outcome: PaymentOutcome) -> Result<PaymentOutcome, DeviceError> {
        if self.outcome.is_some() {
            return Err(DeviceError::QrisEnded);
        }

        self.outcome = Some(outcome);

        Ok(outcome)
    }

    /// Seconds left before the code expires
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Fraction of the countdown left, for the progress bar
    pub fn remaining_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        f64::from(self.remaining) / f64::from(self.total)
    }

    /// Outcome, once the session has ended
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        self.outcome
    }
}
