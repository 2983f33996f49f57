//! Kiosk
//!
//! The root controller. It owns every piece of kiosk state, accepts customer
//! actions through [`Kiosk::dispatch`] and moves simulated time forward through
//! [`Kiosk::advance`]. Views only read from it.

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    assistance::Assistance,
    cart::Cart,
    catalog::Catalog,
    config::{FlowLayout, KioskConfig},
    devices::{BarcodeWedge, CardStage, CardTerminal, NetworkChange, NetworkStatus, QrisSession, Scale, Scanner},
    order::OrderNumber,
    payment::{PaymentMethod, PaymentOutcome},
    pricing::Totals,
    qr,
    random::{RandomSource, SeededRandom},
    receipt::Receipt,
    scheduler::{Fired, Scheduler, TimerKey},
};

mod action;
mod checkout;
mod error;
mod screen;
mod shopping;

pub use action::Action;
pub use error::KioskError;
pub use screen::{Screen, TimerEvent, TimerScope};

/// Self-checkout kiosk.
#[derive(Debug, Clone)]
pub struct Kiosk<R = SeededRandom> {
    config: KioskConfig,
    catalog: Catalog,
    random: R,
    scheduler: Scheduler<TimerScope, TimerEvent>,
    screen: Screen,
    cart: Cart,
    totals: Totals,
    order: Option<OrderNumber>,
    payment_method: Option<PaymentMethod>,
    last_outcome: Option<PaymentOutcome>,
    assistance: Assistance,
    network: NetworkStatus,
    scanner: Scanner,
    wedge: BarcodeWedge,
    scale: Scale,
    qris: QrisSession,
    card: CardTerminal,
    toast_timer: Option<TimerKey>,
    scale_timer: Option<TimerKey>,
    card_timer: Option<TimerKey>,
    network_timer: Option<TimerKey>,
}

impl Kiosk<SeededRandom> {
    /// Create a kiosk with OS-seeded randomness.
    pub fn new(config: KioskConfig, catalog: Catalog) -> Self {
        Self::with_random(config, catalog, SeededRandom::from_entropy())
    }

    /// Create a kiosk whose random draws are reproducible.
    pub fn seeded(config: KioskConfig, catalog: Catalog, seed: u64) -> Self {
        Self::with_random(config, catalog, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> Kiosk<R> {
    /// Create a kiosk on the welcome screen with an empty cart.
    pub fn with_random(config: KioskConfig, catalog: Catalog, random: R) -> Self {
        let totals = Totals::zero(catalog.currency());

        Self {
            config,
            catalog,
            random,
            scheduler: Scheduler::new(),
            screen: Screen::Welcome,
            cart: Cart::new(),
            totals,
            order: None,
            payment_method: None,
            last_outcome: None,
            assistance: Assistance::default(),
            network: NetworkStatus::default(),
            scanner: Scanner::default(),
            wedge: BarcodeWedge::default(),
            scale: Scale::default(),
            qris: QrisSession::default(),
            card: CardTerminal::default(),
            toast_timer: None,
            scale_timer: None,
            card_timer: None,
            network_timer: None,
        }
    }

    /// Apply an action.
    ///
    /// # Errors
    ///
    /// Returns [`KioskError::InvalidAction`] when the action does not apply to the
    /// current screen, or the guard error of the transition. The kiosk is left
    /// unchanged when an action is rejected.
    pub fn dispatch(&mut self, action: Action) -> Result<(), KioskError> {
        debug!(action = action.name(), screen = %self.screen, "dispatching action");

        match action {
            Action::Start
            | Action::RequestScan
            | Action::Barcode(_)
            | Action::KeyPressed { .. }
            | Action::OpenWeighing
            | Action::SelectProduce(_)
            | Action::ConfirmWeight
            | Action::CancelWeighing
            | Action::ReviewCart
            | Action::BackToScan
            | Action::ChangeQuantity { .. }
            | Action::RemoveLine(_)
            | Action::BackToWelcome => self.dispatch_shopping(action),
            Action::Checkout
            | Action::SelectPayment(_)
            | Action::BackToCart
            | Action::CancelPayment
            | Action::TapCard
            | Action::RetryCard
            | Action::ViewReceipt
            | Action::FinishReceipt
            | Action::CompleteBagging
            | Action::Reset => self.dispatch_checkout(&action),
            Action::OpenAssistance
            | Action::CloseAssistance
            | Action::SelectAssistanceReason(_)
            | Action::CallStaff
            | Action::CancelStaffCall => self.dispatch_assistance(&action),
            Action::NetworkChanged(online) => {
                self.network_changed(online);

                Ok(())
            }
        }
    }

    /// The help modal floats over every screen.
    fn dispatch_assistance(&mut self, action: &Action) -> Result<(), KioskError> {
        match *action {
            Action::OpenAssistance => self.assistance.open(),
            Action::CloseAssistance => self.assistance.close(),
            Action::SelectAssistanceReason(reason) => self.assistance.select(reason)?,
            Action::CallStaff => {
                let reason = self.assistance.call_staff()?;

                info!(?reason, screen = %self.screen, "staff called");
            }
            Action::CancelStaffCall => self.assistance.cancel_call()?,
            _ => return Err(self.invalid(action.name())),
        }

        Ok(())
    }

    /// Move simulated time forward, firing every timer that comes due.
    ///
    /// Timers fire one at a time in due order; a timer cancelled by an earlier
    /// handler does not fire.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a timer handler. Timers due after the
    /// failing one stay scheduled.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), KioskError> {
        let until = self.scheduler.now() + elapsed;

        while let Some(fired) = self.scheduler.pop_due(until) {
            self.handle_timer(&fired)?;
        }

        self.scheduler.settle(until);

        Ok(())
    }

    fn handle_timer(&mut self, fired: &Fired<TimerScope, TimerEvent>) -> Result<(), KioskError> {
        if let TimerScope::Screen(screen) = fired.scope
            && screen != self.screen
        {
            debug!(event = ?fired.event, %screen, "dropping timer for inactive screen");

            return Ok(());
        }

        debug!(event = ?fired.event, at = ?fired.at, "timer fired");

        match fired.event {
            TimerEvent::ScanCompleted => self.scan_completed()?,
            TimerEvent::ScanToastExpired => {
                self.scanner.hide_toast();
                self.toast_timer = None;
            }
            TimerEvent::ScaleTick => self.scale_tick(),
            TimerEvent::QrisTick => self.qris_tick()?,
            TimerEvent::QrisConfirmed => self.qris_confirmed()?,
            TimerEvent::CardInserted => self.card_inserted()?,
            TimerEvent::CardProcessed => self.card_processed()?,
            TimerEvent::CardApprovalShown => {
                self.card_timer = None;
                self.payment_succeeded();
            }
            TimerEvent::AutoReset => self.reset_session(),
            TimerEvent::NetworkToastExpired => {
                self.network.hide_toast();
                self.network_timer = None;
            }
        }

        Ok(())
    }

    /// Leave the current screen and enter `next`.
    ///
    /// Timers scoped to the old screen are cancelled and its transient device
    /// state cleared before the new screen's timers start.
    fn go(&mut self, next: Screen) {
        let previous = self.screen;
        let cancelled = self.scheduler.cancel_scope(&TimerScope::Screen(previous));

        match previous {
            Screen::Scan | Screen::Cart => {
                self.scanner.reset();
                self.wedge.clear();
                self.toast_timer = None;
            }
            Screen::Weight => {
                self.scale.reset();
                self.scale_timer = None;
            }
            Screen::CardPayment => self.card_timer = None,
            _ => {}
        }

        self.screen = next;

        info!(from = %previous, to = %next, cancelled, "screen changed");

        match next {
            Screen::Qris => self.start_qris(),
            Screen::CardPayment => self.start_card(),
            Screen::Exit => {
                self.scheduler.after(
                    self.config.exit_reset(),
                    TimerScope::Screen(Screen::Exit),
                    TimerEvent::AutoReset,
                );
            }
            _ => {}
        }
    }

    fn reset_session(&mut self) {
        self.cart.clear();
        self.totals = Totals::zero(self.catalog.currency());
        self.order = None;
        self.payment_method = None;
        self.last_outcome = None;

        info!("session reset");

        self.go(Screen::Welcome);
    }

    fn network_changed(&mut self, online: bool) {
        match self.network.set_online(online) {
            NetworkChange::WentOffline => {
                if let Some(key) = self.network_timer.take() {
                    self.scheduler.cancel(key);
                }

                info!("kiosk went offline");
            }
            NetworkChange::WentOnline => {
                self.network_timer = Some(self.scheduler.after(
                    self.config.network_toast(),
                    TimerScope::Global,
                    TimerEvent::NetworkToastExpired,
                ));

                info!("kiosk back online");
            }
            NetworkChange::Unchanged => {}
        }
    }

    fn expect_screen(&self, action: &'static str, allowed: &[Screen]) -> Result<(), KioskError> {
        if allowed.contains(&self.screen) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> KioskError {
        KioskError::InvalidAction {
            action,
            screen: self.screen,
        }
    }

    /// Screen the customer scans on: the cart, or the scan screen in the
    /// separate-scan layout.
    pub fn shopping_screen(&self) -> Screen {
        match self.config.layout {
            FlowLayout::Combined => Screen::Cart,
            FlowLayout::SeparateScan => Screen::Scan,
        }
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Settings
    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// Product catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart totals, kept up to date after every cart change
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Order number, set once payment succeeds
    pub fn order(&self) -> Option<OrderNumber> {
        self.order
    }

    /// Payment method picked for the current order
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Outcome of the latest payment attempt
    pub fn last_outcome(&self) -> Option<PaymentOutcome> {
        self.last_outcome
    }

    /// Help modal
    pub fn assistance(&self) -> &Assistance {
        &self.assistance
    }

    /// Connectivity
    pub fn network(&self) -> &NetworkStatus {
        &self.network
    }

    /// Camera scanner
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Keyboard barcode reader
    pub fn wedge(&self) -> &BarcodeWedge {
        &self.wedge
    }

    /// Produce scale
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    /// QRIS session
    pub fn qris(&self) -> &QrisSession {
        &self.qris
    }

    /// Card terminal
    pub fn card(&self) -> &CardTerminal {
        &self.card
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Whether any timer is still scheduled
    pub fn has_pending_timers(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Units in the cart, for the header badge
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Whether barcodes are accepted on the current screen
    pub fn accepts_barcodes(&self) -> bool {
        self.screen == self.shopping_screen()
    }

    /// Whether [`Action::Checkout`] would be accepted right now
    pub fn can_checkout(&self) -> bool {
        self.screen == Screen::Cart
            && !self.cart.is_empty()
            && (self.network.is_online() || !self.config.require_network)
    }

    /// Whether the card terminal is in a stage the customer can back out of
    pub fn can_cancel_card(&self) -> bool {
        matches!(self.card.stage(), CardStage::Insert | CardStage::Declined)
    }

    /// Receipt for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`KioskError::Receipt`] if a line cannot be priced.
    pub fn receipt(&self) -> Result<Receipt, KioskError> {
        Ok(Receipt::new(
            &self.cart,
            self.totals,
            self.config.tax_rate,
            self.order,
        )?)
    }

    /// QR image for the QRIS payment of the current total.
    pub fn payment_qr_url(&self, size: u32) -> String {
        qr::image_url(
            size,
            &qr::payment_payload(&self.config.qr_prefix, &self.totals.total),
        )
    }

    /// QR image printed on the receipt, once there is an order number.
    pub fn receipt_qr_url(&self, size: u32) -> Option<String> {
        self.order
            .map(|order| qr::image_url(size, &qr::receipt_payload(order)))
    }
}
