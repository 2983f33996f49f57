//! Scripted sessions
//!
//! Drives a kiosk through a whole visit (scan, weigh, pay, bag) without a
//! screen, the way a customer would.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    kiosk::{Action, Kiosk, KioskError, Screen},
    payment::{PaymentMethod, PaymentOutcome},
    products::Product,
    random::RandomSource,
    receipt::Receipt,
};

/// How often the script checks on the kiosk while waiting.
const POLL: Duration = Duration::from_millis(50);

/// Longest the script waits for any one step, in simulated time.
const STEP_LIMIT: Duration = Duration::from_mins(10);

/// Errors raised while running a script.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The kiosk rejected an action or a timer failed.
    #[error(transparent)]
    Kiosk(#[from] KioskError),

    /// A SKU in the script is not produce in the catalog.
    #[error("no produce with SKU {0}")]
    UnknownProduce(String),

    /// Payment did not go through.
    #[error("payment {0}")]
    PaymentFailed(PaymentOutcome),

    /// The kiosk never reached the screen the script was waiting for.
    #[error("gave up waiting on the {0} screen")]
    Stalled(Screen),
}

/// What the customer does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Barcodes typed into the reader, in order
    pub barcodes: Vec<String>,

    /// Camera scans after the barcodes
    pub scans: u32,

    /// Produce SKUs to weigh
    pub weigh: Vec<String>,

    /// Payment method
    pub method: PaymentMethod,

    /// Card attempts before giving up
    pub card_attempts: u32,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            barcodes: Vec::new(),
            scans: 3,
            weigh: Vec::new(),
            method: PaymentMethod::Qris,
            card_attempts: 3,
        }
    }
}

/// Run `script` from the welcome screen and return the receipt.
///
/// The kiosk ends back on the welcome screen.
///
/// # Errors
///
/// Returns a [`SimulationError`] if the kiosk rejects a step, payment fails or
/// a step never completes.
pub fn run<R: RandomSource>(kiosk: &mut Kiosk<R>, script: &Script) -> Result<Receipt, SimulationError> {
    kiosk.dispatch(Action::Start)?;

    for code in &script.barcodes {
        kiosk.dispatch(Action::Barcode(code.clone()))?;
    }

    for _ in 0..script.scans {
        let before = kiosk.item_count();

        kiosk.dispatch(Action::RequestScan)?;
        wait_until(kiosk, |kiosk| kiosk.item_count() > before)?;
    }

    for sku in &script.weigh {
        let key = kiosk
            .catalog()
            .find_sku(sku)
            .filter(|key| kiosk.catalog().get(*key).is_some_and(Product::is_weighed))
            .ok_or_else(|| SimulationError::UnknownProduce(sku.clone()))?;

        kiosk.dispatch(Action::OpenWeighing)?;
        kiosk.dispatch(Action::SelectProduce(key))?;
        wait_until(kiosk, |kiosk| !kiosk.scale().is_weighing())?;
        kiosk.dispatch(Action::ConfirmWeight)?;
    }

    if kiosk.screen() == Screen::Scan {
        kiosk.dispatch(Action::ReviewCart)?;
    }

    kiosk.dispatch(Action::Checkout)?;
    pay(kiosk, script)?;

    let receipt = kiosk.receipt()?;

    info!(order = ?receipt.order(), total = %receipt.totals().total, "session paid");

    kiosk.dispatch(Action::ViewReceipt)?;
    kiosk.dispatch(Action::FinishReceipt)?;
    kiosk.dispatch(Action::CompleteBagging)?;
    wait_until(kiosk, |kiosk| kiosk.screen() == Screen::Welcome)?;

    Ok(receipt)
}

fn pay<R: RandomSource>(kiosk: &mut Kiosk<R>, script: &Script) -> Result<(), SimulationError> {
    kiosk.dispatch(Action::SelectPayment(script.method))?;

    let mut attempts = 1;

    loop {
        wait_until(kiosk, |kiosk| {
            !kiosk.screen().is_payment() || kiosk.last_outcome() == Some(PaymentOutcome::Declined)
        })?;

        match kiosk.last_outcome() {
            Some(PaymentOutcome::Approved) if kiosk.screen() == Screen::Success => return Ok(()),
            Some(PaymentOutcome::Declined) if attempts < script.card_attempts => {
                warn!(attempts, "card declined, retrying");

                attempts += 1;
                kiosk.dispatch(Action::RetryCard)?;
            }
            Some(outcome) => return Err(SimulationError::PaymentFailed(outcome)),
            None => return Err(SimulationError::Stalled(kiosk.screen())),
        }
    }
}

fn wait_until<R: RandomSource>(
    kiosk: &mut Kiosk<R>,
    done: impl Fn(&Kiosk<R>) -> bool,
) -> Result<(), SimulationError> {
    let deadline = kiosk.now() + STEP_LIMIT;

    while !done(kiosk) {
        if kiosk.now() >= deadline {
            return Err(SimulationError::Stalled(kiosk.screen()));
        }

        kiosk.advance(POLL)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::Catalog,
        config::{FlowLayout, KioskConfig},
        random::ScriptedRandom,
    };

    use super::*;

    #[test]
    fn qris_session_ends_on_welcome_with_receipt() -> TestResult {
        let mut kiosk = Kiosk::seeded(KioskConfig::default(), Catalog::bundled()?, 7);
        let script = Script {
            barcodes: vec!["1".to_string(), "1".to_string(), "2".to_string()],
            scans: 0,
            weigh: vec!["w2".to_string()],
            ..Script::default()
        };

        let receipt = run(&mut kiosk, &script)?;

        assert!(receipt.order().is_some());
        assert_eq!(receipt.lines().len(), 3);
        assert_eq!(kiosk.screen(), Screen::Welcome);
        assert!(kiosk.cart().is_empty());

        Ok(())
    }

    #[test]
    fn declined_card_is_retried() -> TestResult {
        // scan pick, decline, approve, order number
        let random = ScriptedRandom::new([0.0, 0.05, 0.5, 0.0], 0.0);
        let config = KioskConfig {
            layout: FlowLayout::SeparateScan,
            ..KioskConfig::default()
        };
        let mut kiosk = Kiosk::with_random(config, Catalog::bundled()?, random);
        let script = Script {
            scans: 1,
            method: PaymentMethod::Card,
            ..Script::default()
        };

        let receipt = run(&mut kiosk, &script)?;

        assert_eq!(receipt.order().map(|order| order.to_string()), Some("ORD-10000".to_string()));

        Ok(())
    }

    #[test]
    fn gives_up_after_card_attempts() -> TestResult {
        let random = ScriptedRandom::new([0.0], 0.0);
        let mut kiosk = Kiosk::with_random(KioskConfig::default(), Catalog::bundled()?, random);
        let script = Script {
            scans: 1,
            method: PaymentMethod::Card,
            card_attempts: 2,
            ..Script::default()
        };

        let result = run(&mut kiosk, &script);

        assert!(
            matches!(result, Err(SimulationError::PaymentFailed(PaymentOutcome::Declined))),
            "{result:?}"
        );
        assert_eq!(kiosk.screen(), Screen::CardPayment);

        Ok(())
    }

    #[test]
    fn unknown_produce_is_reported() -> TestResult {
        let mut kiosk = Kiosk::seeded(KioskConfig::default(), Catalog::bundled()?, 1);
        let script = Script {
            scans: 0,
            weigh: vec!["1".to_string()],
            ..Script::default()
        };

        let result = run(&mut kiosk, &script);

        assert!(matches!(result, Err(SimulationError::UnknownProduce(sku)) if sku == "1"));

        Ok(())
    }
}
