//! Checkout and payment

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    devices::CardStage,
    kiosk::{Action, Kiosk, KioskError, Screen, TimerEvent, TimerScope},
    order::OrderNumber,
    payment::{PaymentMethod, PaymentOutcome},
    random::RandomSource,
};

const QRIS_TICK: Duration = Duration::from_secs(1);

impl<R: RandomSource> Kiosk<R> {
    pub(super) fn dispatch_checkout(&mut self, action: &Action) -> Result<(), KioskError> {
        let name = action.name();

        match *action {
            Action::Checkout => {
                self.expect_screen(name, &[Screen::Cart])?;
                self.checkout()?;
            }
            Action::SelectPayment(method) => {
                self.expect_screen(name, &[Screen::PaymentMethods])?;
                self.select_payment(method);
            }
            Action::BackToCart => {
                self.expect_screen(name, &[Screen::PaymentMethods])?;
                self.go(Screen::Cart);
            }
            Action::CancelPayment => {
                self.expect_screen(name, &[Screen::Qris, Screen::CardPayment])?;
                self.cancel_payment(name)?;
            }
            Action::TapCard => {
                self.expect_screen(name, &[Screen::CardPayment])?;
                self.tap_card()?;
            }
            Action::RetryCard => {
                self.expect_screen(name, &[Screen::CardPayment])?;
                self.retry_card()?;
            }
            Action::ViewReceipt => {
                self.expect_screen(name, &[Screen::Success])?;
                self.go(Screen::Receipt);
            }
            Action::FinishReceipt => {
                self.expect_screen(name, &[Screen::Receipt])?;
                self.go(Screen::Bagging);
            }
            Action::CompleteBagging => {
                self.expect_screen(name, &[Screen::Bagging])?;
                self.go(Screen::Exit);
            }
            Action::Reset => {
                self.expect_screen(name, &[Screen::Exit])?;
                self.reset_session();
            }
            _ => return Err(self.invalid(name)),
        }

        Ok(())
    }

    fn checkout(&mut self) -> Result<(), KioskError> {
        if self.cart.is_empty() {
            return Err(KioskError::EmptyCart);
        }

        if self.config.require_network && !self.network.is_online() {
            return Err(KioskError::Offline);
        }

        info!(items = self.cart.item_count(), total = %self.totals.total, "checkout");

        self.go(Screen::PaymentMethods);

        Ok(())
    }

    fn select_payment(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
        self.last_outcome = None;

        self.go(match method {
            PaymentMethod::Qris => Screen::Qris,
            PaymentMethod::Card => Screen::CardPayment,
        });
    }

    fn cancel_payment(&mut self, action: &'static str) -> Result<(), KioskError> {
        match self.screen {
            Screen::Qris => {
                self.qris.finish(PaymentOutcome::Cancelled)?;
            }
            Screen::CardPayment if self.can_cancel_card() => {}
            _ => return Err(self.invalid(action)),
        }

        self.last_outcome = Some(PaymentOutcome::Cancelled);
        self.go(Screen::PaymentMethods);

        Ok(())
    }

    pub(super) fn start_qris(&mut self) {
        let scope = TimerScope::Screen(Screen::Qris);

        self.qris.begin(self.config.qris_countdown_secs);
        self.scheduler.every(QRIS_TICK, scope, TimerEvent::QrisTick);
        self.scheduler
            .after(self.config.qris_confirm(), scope, TimerEvent::QrisConfirmed);
    }

    pub(super) fn qris_tick(&mut self) -> Result<(), KioskError> {
        if let Some(outcome) = self.qris.tick()? {
            warn!(%outcome, "QRIS code expired");

            self.last_outcome = Some(outcome);
            self.go(Screen::PaymentMethods);
        }

        Ok(())
    }

    pub(super) fn qris_confirmed(&mut self) -> Result<(), KioskError> {
        self.qris.finish(PaymentOutcome::Approved)?;
        self.payment_succeeded();

        Ok(())
    }

    pub(super) fn start_card(&mut self) {
        self.card.begin();
        self.schedule_card(self.config.card_insert(), TimerEvent::CardInserted);
    }

    fn tap_card(&mut self) -> Result<(), KioskError> {
        self.card.read_card()?;

        debug!("card tapped");

        self.schedule_card(self.config.card_processing(), TimerEvent::CardProcessed);

        Ok(())
    }

    fn retry_card(&mut self) -> Result<(), KioskError> {
        self.card.retry()?;
        self.last_outcome = None;

        info!(attempt = self.card.attempts(), "retrying card payment");

        self.schedule_card(self.config.card_insert(), TimerEvent::CardInserted);

        Ok(())
    }

    pub(super) fn card_inserted(&mut self) -> Result<(), KioskError> {
        self.card.read_card()?;
        self.schedule_card(self.config.card_processing(), TimerEvent::CardProcessed);

        Ok(())
    }

    pub(super) fn card_processed(&mut self) -> Result<(), KioskError> {
        let outcome = self
            .card
            .resolve(&mut self.random, self.config.card_approval_rate)?;

        self.last_outcome = Some(outcome);
        self.card_timer = None;

        if self.card.stage() == CardStage::Approved {
            self.schedule_card(self.config.card_approved(), TimerEvent::CardApprovalShown);
        } else {
            warn!(%outcome, attempt = self.card.attempts(), "card payment failed");
        }

        Ok(())
    }

    /// Replace the pending card stage timer.
    fn schedule_card(&mut self, delay: Duration, event: TimerEvent) {
        if let Some(key) = self.card_timer.take() {
            self.scheduler.cancel(key);
        }

        self.card_timer = Some(self.scheduler.after(
            delay,
            TimerScope::Screen(Screen::CardPayment),
            event,
        ));
    }

    pub(super) fn payment_succeeded(&mut self) {
        let order = OrderNumber::generate(&mut self.random);

        self.order = Some(order);
        self.last_outcome = Some(PaymentOutcome::Approved);

        info!(
            %order,
            method = ?self.payment_method,
            total = %self.totals.total,
            "payment approved"
        );

        self.go(Screen::Success);
    }
}
