//! End-to-end screen flow: shop, pay, bag and reset, in both layouts.

use std::time::Duration;

use kiosk::prelude::*;
use rusty_money::{Money, iso::IDR};
use testresult::TestResult;

fn kiosk_with(config: KioskConfig, draws: &[f64]) -> TestResult<Kiosk<ScriptedRandom>> {
    Ok(Kiosk::with_random(
        config,
        Catalog::bundled()?,
        ScriptedRandom::new(draws.iter().copied(), 0.0),
    ))
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn qris_happy_path_runs_to_exit_and_resets() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[0.0])?;

    kiosk.dispatch(Action::Start)?;
    assert_eq!(kiosk.screen(), Screen::Cart);

    kiosk.dispatch(Action::Barcode("1".to_string()))?;
    kiosk.dispatch(Action::Barcode("1".to_string()))?;

    assert_eq!(kiosk.cart().len(), 1);
    assert_eq!(kiosk.item_count(), 2);
    assert_eq!(kiosk.totals().subtotal, Money::from_major(7_000, IDR));
    assert_eq!(kiosk.totals().tax, Money::from_major(770, IDR));
    assert_eq!(kiosk.totals().total, Money::from_major(7_770, IDR));

    kiosk.dispatch(Action::Checkout)?;
    assert_eq!(kiosk.screen(), Screen::PaymentMethods);

    kiosk.dispatch(Action::SelectPayment(PaymentMethod::Qris))?;
    assert_eq!(kiosk.screen(), Screen::Qris);
    assert!(kiosk.payment_qr_url(250).ends_with("data=YOGYA-PAY-7770"));

    kiosk.advance(secs(5))?;

    assert_eq!(kiosk.screen(), Screen::Success);
    assert_eq!(kiosk.last_outcome(), Some(PaymentOutcome::Approved));
    assert_eq!(kiosk.order().map(|order| order.to_string()), Some("ORD-10000".to_string()));
    assert!(kiosk.receipt_qr_url(150).is_some_and(|url| url.ends_with("data=ORD-10000")));

    kiosk.dispatch(Action::ViewReceipt)?;
    let receipt = kiosk.receipt()?;
    assert_eq!(receipt.totals().total, Money::from_major(7_770, IDR));

    kiosk.dispatch(Action::FinishReceipt)?;
    kiosk.dispatch(Action::CompleteBagging)?;
    assert_eq!(kiosk.screen(), Screen::Exit);

    kiosk.advance(Duration::from_millis(4_999))?;
    assert_eq!(kiosk.screen(), Screen::Exit);

    kiosk.advance(Duration::from_millis(1))?;

    assert_eq!(kiosk.screen(), Screen::Welcome);
    assert!(kiosk.cart().is_empty());
    assert_eq!(kiosk.order(), None);
    assert_eq!(*kiosk.totals(), Totals::zero(IDR));
    assert!(!kiosk.has_pending_timers());

    Ok(())
}

#[test]
fn reset_from_exit_does_not_wait_for_timer() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::Start)?;
    kiosk.dispatch(Action::Barcode("2".to_string()))?;
    kiosk.dispatch(Action::Checkout)?;
    kiosk.dispatch(Action::SelectPayment(PaymentMethod::Qris))?;
    kiosk.advance(secs(5))?;
    kiosk.dispatch(Action::ViewReceipt)?;
    kiosk.dispatch(Action::FinishReceipt)?;
    kiosk.dispatch(Action::CompleteBagging)?;
    kiosk.dispatch(Action::Reset)?;

    assert_eq!(kiosk.screen(), Screen::Welcome);
    assert!(kiosk.cart().is_empty());

    // the auto reset was cancelled along with the exit screen
    kiosk.dispatch(Action::Start)?;
    kiosk.advance(secs(10))?;

    assert_eq!(kiosk.screen(), Screen::Cart);

    Ok(())
}

#[test]
fn separate_scan_layout_reviews_cart_before_checkout() -> TestResult {
    let config = KioskConfig {
        layout: FlowLayout::SeparateScan,
        ..KioskConfig::default()
    };
    let mut kiosk = kiosk_with(config, &[])?;

    kiosk.dispatch(Action::Start)?;
    assert_eq!(kiosk.screen(), Screen::Scan);

    assert!(matches!(
        kiosk.dispatch(Action::ReviewCart),
        Err(KioskError::EmptyCart)
    ));
    assert_eq!(kiosk.screen(), Screen::Scan);

    assert!(matches!(
        kiosk.dispatch(Action::Checkout),
        Err(KioskError::InvalidAction { screen: Screen::Scan, .. })
    ));

    kiosk.dispatch(Action::Barcode("3".to_string()))?;
    kiosk.dispatch(Action::ReviewCart)?;
    assert_eq!(kiosk.screen(), Screen::Cart);

    kiosk.dispatch(Action::BackToScan)?;
    assert_eq!(kiosk.screen(), Screen::Scan);

    kiosk.dispatch(Action::BackToWelcome)?;
    assert_eq!(kiosk.screen(), Screen::Welcome);
    assert_eq!(kiosk.item_count(), 1);

    kiosk.dispatch(Action::Start)?;
    assert_eq!(kiosk.screen(), Screen::Scan);

    Ok(())
}

#[test]
fn back_to_scan_is_rejected_in_combined_layout() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::Start)?;

    assert!(matches!(
        kiosk.dispatch(Action::BackToScan),
        Err(KioskError::InvalidAction { .. })
    ));
    assert_eq!(kiosk.screen(), Screen::Cart);

    Ok(())
}

#[test]
fn actions_off_screen_are_rejected_without_change() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    for action in [
        Action::Checkout,
        Action::ConfirmWeight,
        Action::ViewReceipt,
        Action::Reset,
        Action::TapCard,
        Action::RequestScan,
    ] {
        let result = kiosk.dispatch(action.clone());

        assert!(
            matches!(result, Err(KioskError::InvalidAction { screen: Screen::Welcome, .. })),
            "{action:?} gave {result:?}"
        );
    }

    assert_eq!(kiosk.screen(), Screen::Welcome);
    assert!(!kiosk.has_pending_timers());

    Ok(())
}

#[test]
fn checkout_guards_empty_cart_and_network() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::Start)?;

    assert!(matches!(kiosk.dispatch(Action::Checkout), Err(KioskError::EmptyCart)));

    kiosk.dispatch(Action::Barcode("1".to_string()))?;
    kiosk.dispatch(Action::NetworkChanged(false))?;

    assert!(!kiosk.can_checkout());
    assert!(matches!(kiosk.dispatch(Action::Checkout), Err(KioskError::Offline)));
    assert_eq!(kiosk.screen(), Screen::Cart);

    kiosk.dispatch(Action::NetworkChanged(true))?;

    assert!(kiosk.can_checkout());
    kiosk.dispatch(Action::Checkout)?;
    assert_eq!(kiosk.screen(), Screen::PaymentMethods);

    kiosk.dispatch(Action::BackToCart)?;
    assert_eq!(kiosk.screen(), Screen::Cart);

    Ok(())
}

#[test]
fn offline_checkout_allowed_when_network_not_required() -> TestResult {
    let config = KioskConfig {
        require_network: false,
        ..KioskConfig::default()
    };
    let mut kiosk = kiosk_with(config, &[])?;

    kiosk.dispatch(Action::NetworkChanged(false))?;
    kiosk.dispatch(Action::Start)?;
    kiosk.dispatch(Action::Barcode("5".to_string()))?;
    kiosk.dispatch(Action::Checkout)?;

    assert_eq!(kiosk.screen(), Screen::PaymentMethods);

    Ok(())
}

#[test]
fn network_toast_hides_after_reconnect() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::NetworkChanged(false))?;
    assert!(kiosk.network().toast_visible());

    kiosk.dispatch(Action::NetworkChanged(true))?;
    kiosk.advance(Duration::from_millis(1_500))?;
    assert!(kiosk.network().toast_visible());

    // dropping again before the toast hides keeps it up
    kiosk.dispatch(Action::NetworkChanged(false))?;
    kiosk.advance(secs(5))?;
    assert!(kiosk.network().toast_visible());

    kiosk.dispatch(Action::NetworkChanged(true))?;
    kiosk.dispatch(Action::Start)?;
    kiosk.advance(secs(2))?;

    assert!(!kiosk.network().toast_visible());
    assert!(kiosk.network().is_online());

    Ok(())
}

#[test]
fn assistance_does_not_block_payment_timers() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::Start)?;
    kiosk.dispatch(Action::Barcode("4".to_string()))?;
    kiosk.dispatch(Action::Checkout)?;
    kiosk.dispatch(Action::SelectPayment(PaymentMethod::Qris))?;

    kiosk.dispatch(Action::OpenAssistance)?;
    kiosk.dispatch(Action::SelectAssistanceReason(AssistanceReason::PaymentIssue))?;
    kiosk.dispatch(Action::CallStaff)?;

    kiosk.advance(secs(5))?;

    assert_eq!(kiosk.screen(), Screen::Success);
    assert_eq!(
        *kiosk.assistance(),
        Assistance::Waiting {
            reason: AssistanceReason::PaymentIssue
        }
    );

    kiosk.dispatch(Action::CancelStaffCall)?;
    assert_eq!(*kiosk.assistance(), Assistance::Selecting { reason: None });

    kiosk.dispatch(Action::CloseAssistance)?;
    assert!(!kiosk.assistance().is_open());

    Ok(())
}

#[test]
fn calling_staff_without_reason_is_rejected() -> TestResult {
    let mut kiosk = kiosk_with(KioskConfig::default(), &[])?;

    kiosk.dispatch(Action::OpenAssistance)?;

    assert!(matches!(
        kiosk.dispatch(Action::CallStaff),
        Err(KioskError::Assistance(AssistanceError::NoReason))
    ));
    assert_eq!(*kiosk.assistance(), Assistance::Selecting { reason: None });

    Ok(())
}
