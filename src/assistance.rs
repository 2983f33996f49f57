//! Staff assistance
//!
//! The help modal walks the customer through picking a reason and calling a
//! staff member. It can be opened from any screen and never blocks timers.

use std::fmt;

use thiserror::Error;
use tracing::info;

/// Errors raised by the help modal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistanceError {
    /// The modal is closed.
    #[error("the assistance modal is not open")]
    NotOpen,

    /// Staff can only be called once a reason is picked.
    #[error("pick a reason before calling staff")]
    NoReason,

    /// The action does not apply while staff is on the way.
    #[error("staff has already been called")]
    AlreadyCalled,

    /// There is no staff call to cancel.
    #[error("no staff call to cancel")]
    NotWaiting,
}

/// Why the customer needs help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistanceReason {
    /// An item will not scan
    ScanFailure,

    /// General help
    GeneralHelp,

    /// Payment trouble
    PaymentIssue,

    /// Anything else
    Other,
}

impl AssistanceReason {
    /// Every reason, in the order the modal lists them.
    pub const ALL: [AssistanceReason; 4] = [
        AssistanceReason::ScanFailure,
        AssistanceReason::GeneralHelp,
        AssistanceReason::PaymentIssue,
        AssistanceReason::Other,
    ];

    /// Label shown on the kiosk.
    pub fn label(self) -> &'static str {
        match self {
            AssistanceReason::ScanFailure => "Gagal Scan",
            AssistanceReason::GeneralHelp => "Perlu Bantuan",
            AssistanceReason::PaymentIssue => "Masalah Bayar",
            AssistanceReason::Other => "Kendala Lain",
        }
    }
}

impl fmt::Display for AssistanceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Help modal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Assistance {
    /// Modal hidden
    #[default]
    Closed,

    /// Picking a reason
    Selecting {
        /// Reason picked so far
        reason: Option<AssistanceReason>,
    },

    /// Staff called, waiting for them to arrive
    Waiting {
        /// Reason given when calling
        reason: AssistanceReason,
    },
}

impl Assistance {
    /// Open the modal. Always starts from a fresh selection.
    pub fn open(&mut self) {
        *self = Assistance::Selecting { reason: None };
    }

    /// Close the modal from any step.
    pub fn close(&mut self) {
        *self = Assistance::Closed;
    }

    /// Pick a reason.
    ///
    /// # Errors
    ///
    /// - [`AssistanceError::NotOpen`]: the modal is closed.
    /// - [`AssistanceError::AlreadyCalled`]: staff is already on the way.
    pub fn select(&mut self, reason: AssistanceReason) -> Result<(), AssistanceError> {
        match self {
            Assistance::Closed => Err(AssistanceError::NotOpen),
            Assistance::Waiting { .. } => Err(AssistanceError::AlreadyCalled),
            Assistance::Selecting { reason: picked } => {
                *picked = Some(reason);

                Ok(())
            }
        }
    }

    /// Call staff with the picked reason.
    ///
    /// # Errors
    ///
    /// - [`AssistanceError::NotOpen`]: the modal is closed.
    /// - [`AssistanceError::NoReason`]: no reason picked yet.
    /// - [`AssistanceError::AlreadyCalled`]: staff is already on the way.
    pub fn call_staff(&mut self) -> Result<AssistanceReason, AssistanceError> {
        match *self {
            Assistance::Closed => Err(AssistanceError::NotOpen),
            Assistance::Waiting { .. } => Err(AssistanceError::AlreadyCalled),
            Assistance::Selecting { reason: None } => Err(AssistanceError::NoReason),
            Assistance::Selecting {
                reason: Some(reason),
            } => {
                *self = Assistance::Waiting { reason };

                info!(%reason, "staff called");

                Ok(reason)
            }
        }
    }

    /// Cancel the staff call and go back to picking a reason.
    ///
    /// # Errors
    ///
    /// Returns [`AssistanceError::NotWaiting`] unless staff was called.
    pub fn cancel_call(&mut self) -> Result<(), AssistanceError> {
        match self {
            Assistance::Waiting { .. } => {
                *self = Assistance::Selecting { reason: None };

                Ok(())
            }
            _ => Err(AssistanceError::NotWaiting),
        }
    }

    /// Whether the modal is showing
    pub fn is_open(&self) -> bool {
        !matches!(self, Assistance::Closed)
    }
}
