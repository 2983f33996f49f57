//! Customer and system actions

use crate::{
    assistance::AssistanceReason, cart::LineId, payment::PaymentMethod, products::ProductKey,
};

/// Everything that can happen to the kiosk, apart from time passing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Tap "start" on the welcome screen.
    Start,

    /// Point an item at the camera scanner.
    RequestScan,

    /// A complete barcode arrived from a reader.
    Barcode(String),

    /// One key press from a keyboard-wedge reader.
    KeyPressed {
        /// Browser key name
        key: String,

        /// Whether a command modifier was held
        modifier: bool,
    },

    /// Go to the produce scale.
    OpenWeighing,

    /// Put a produce item on the scale.
    SelectProduce(ProductKey),

    /// Add the weighed item to the cart.
    ConfirmWeight,

    /// Leave the scale without adding anything.
    CancelWeighing,

    /// Go from the scan screen to the cart.
    ReviewCart,

    /// Go from the cart back to the scan screen.
    BackToScan,

    /// Change the quantity of a cart line.
    ChangeQuantity {
        /// Line to change
        line: LineId,

        /// Amount to add; negative to remove
        delta: i32,
    },

    /// Remove a cart line.
    RemoveLine(LineId),

    /// Proceed to payment.
    Checkout,

    /// Pick a payment method.
    SelectPayment(PaymentMethod),

    /// Leave payment method selection.
    BackToCart,

    /// Abort the current payment.
    CancelPayment,

    /// Tap a card instead of waiting for insertion.
    TapCard,

    /// Try again after a decline.
    RetryCard,

    /// Open the receipt after paying.
    ViewReceipt,

    /// Done with the receipt.
    FinishReceipt,

    /// Done bagging.
    CompleteBagging,

    /// Start over from the exit screen.
    Reset,

    /// Leave the cart for the welcome screen.
    BackToWelcome,

    /// Open the help modal.
    OpenAssistance,

    /// Close the help modal.
    CloseAssistance,

    /// Pick why help is needed.
    SelectAssistanceReason(AssistanceReason),

    /// Call a staff member.
    CallStaff,

    /// Cancel the staff call.
    CancelStaffCall,

    /// Connectivity changed.
    NetworkChanged(bool),
}

impl Action {
    /// Short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::RequestScan => "request-scan",
            Action::Barcode(_) => "barcode",
            Action::KeyPressed { .. } => "key-pressed",
            Action::OpenWeighing => "open-weighing",
            Action::SelectProduce(_) => "select-produce",
            Action::ConfirmWeight => "confirm-weight",
            Action::CancelWeighing => "cancel-weighing",
            Action::ReviewCart => "review-cart",
            Action::BackToScan => "back-to-scan",
            Action::ChangeQuantity { .. } => "change-quantity",
            Action::RemoveLine(_) => "remove-line",
            Action::Checkout => "checkout",
            Action::SelectPayment(_) => "select-payment",
            Action::BackToCart => "back-to-cart",
            Action::CancelPayment => "cancel-payment",
            Action::TapCard => "tap-card",
            Action::RetryCard => "retry-card",
            Action::ViewReceipt => "view-receipt",
            Action::FinishReceipt => "finish-receipt",
            Action::CompleteBagging => "complete-bagging",
            Action::Reset => "reset",
            Action::BackToWelcome => "back-to-welcome",
            Action::OpenAssistance => "open-assistance",
            Action::CloseAssistance => "close-assistance",
            Action::SelectAssistanceReason(_) => "select-assistance-reason",
            Action::CallStaff => "call-staff",
            Action::CancelStaffCall => "cancel-staff-call",
            Action::NetworkChanged(_) => "network-changed",
        }
    }
}
