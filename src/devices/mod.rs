//! Simulated hardware
//!
//! Each device is a small state machine. Devices never schedule anything
//! themselves; the kiosk drives them from its timers.

use thiserror::Error;

use crate::weight::WeightError;

pub mod card;
pub mod network;
pub mod qris;
pub mod scale;
pub mod scanner;

pub use card::{CardStage, CardTerminal};
pub use network::{NetworkChange, NetworkStatus};
pub use qris::QrisSession;
pub use scale::Scale;
pub use scanner::{BarcodeWedge, ScanToast, Scanner};

/// Errors raised by simulated devices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    /// The card terminal was asked to do something its current stage does not allow.
    #[error("card terminal is in stage {actual}, expected {expected}")]
    CardStage {
        /// Stage the operation needs
        expected: CardStage,

        /// Stage the terminal is in
        actual: CardStage,
    },

    /// The scale has no product selected.
    #[error("no produce selected on the scale")]
    NothingOnScale,

    /// The scale reading has not settled yet.
    #[error("scale is still weighing")]
    StillWeighing,

    /// The QRIS session already ended.
    #[error("QRIS session already ended")]
    QrisEnded,

    /// The scale produced an invalid weight.
    #[error(transparent)]
    Weight(#[from] WeightError),
}
