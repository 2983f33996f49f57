//! Scanning, weighing and cart edits through the kiosk.

use std::time::Duration;

use kiosk::{fixtures::minor_units_per_major, prelude::*};
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, IDR},
};
use testresult::TestResult;

fn shopping(draws: &[f64]) -> TestResult<Kiosk<ScriptedRandom>> {
    let mut kiosk = Kiosk::with_random(
        KioskConfig::default(),
        Catalog::bundled()?,
        ScriptedRandom::new(draws.iter().copied(), 0.0),
    );

    kiosk.dispatch(Action::Start)?;

    Ok(kiosk)
}

fn key(kiosk: &Kiosk<ScriptedRandom>, sku: &str) -> TestResult<ProductKey> {
    Ok(kiosk.catalog().find_sku(sku).ok_or("unknown sku")?)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn camera_scan_adds_random_product_after_delay() -> TestResult {
    let mut kiosk = shopping(&[0.0])?;

    kiosk.dispatch(Action::RequestScan)?;
    kiosk.dispatch(Action::RequestScan)?;
    assert!(kiosk.scanner().is_scanning());

    kiosk.advance(ms(799))?;
    assert!(kiosk.cart().is_empty());

    kiosk.advance(ms(1))?;

    assert_eq!(kiosk.item_count(), 1);
    assert!(!kiosk.scanner().is_scanning());
    assert_eq!(
        kiosk.scanner().toast().map(|toast| toast.name.as_str()),
        Some("Indomie Goreng")
    );

    kiosk.advance(ms(2_000))?;

    assert_eq!(kiosk.scanner().toast(), None);
    assert_eq!(kiosk.item_count(), 1);

    Ok(())
}

#[test]
fn keyboard_wedge_adds_matching_product() -> TestResult {
    let mut kiosk = shopping(&[])?;

    for key in ["Shift", "4", "Enter"] {
        kiosk.dispatch(Action::KeyPressed {
            key: key.to_string(),
            modifier: false,
        })?;
    }

    let names: Vec<&str> = kiosk.cart().iter().map(|item| item.product().name.as_str()).collect();

    assert_eq!(names, vec!["Kecap Manis Bango"]);
    assert!(kiosk.scanner().toast().is_some());

    kiosk.advance(ms(2_999))?;
    assert!(kiosk.scanner().toast().is_some());

    kiosk.advance(ms(1))?;
    assert!(kiosk.scanner().toast().is_none());

    Ok(())
}

#[test]
fn unknown_barcode_picks_demo_product() -> TestResult {
    let mut kiosk = shopping(&[0.99])?;

    kiosk.dispatch(Action::Barcode("8991234567890".to_string()))?;

    let names: Vec<&str> = kiosk.cart().iter().map(|item| item.product().name.as_str()).collect();

    assert_eq!(names, vec!["Minyak Goreng 2L"]);

    Ok(())
}

#[test]
fn leaving_the_cart_cancels_a_running_scan() -> TestResult {
    let mut kiosk = shopping(&[0.0])?;

    kiosk.dispatch(Action::RequestScan)?;
    kiosk.dispatch(Action::OpenWeighing)?;
    kiosk.advance(ms(1_000))?;

    assert!(kiosk.cart().is_empty());

    kiosk.dispatch(Action::CancelWeighing)?;

    assert_eq!(kiosk.screen(), Screen::Cart);
    assert!(!kiosk.scanner().is_scanning());
    assert!(!kiosk.has_pending_timers());

    Ok(())
}

#[test]
fn weighing_adds_priced_produce_line() -> TestResult {
    let mut kiosk = shopping(&[0.5])?;
    let apples = key(&kiosk, "w1")?;

    kiosk.dispatch(Action::OpenWeighing)?;
    kiosk.dispatch(Action::SelectProduce(apples))?;

    assert!(matches!(
        kiosk.dispatch(Action::ConfirmWeight),
        Err(KioskError::Device(DeviceError::StillWeighing))
    ));

    // 1.10 kg in 0.05 kg steps every 50 ms
    kiosk.advance(ms(1_050))?;
    assert!(kiosk.scale().is_weighing());

    kiosk.advance(ms(50))?;
    assert!(!kiosk.scale().is_weighing());
    assert_eq!(kiosk.scale().reading(), Decimal::new(110, 2));
    assert!(!kiosk.has_pending_timers());

    kiosk.dispatch(Action::ConfirmWeight)?;

    assert_eq!(kiosk.screen(), Screen::Cart);

    let line = kiosk.cart().iter().next().ok_or("no line")?;

    assert_eq!(line.weight().map(Weight::kilograms), Some(Decimal::new(110, 2)));

    // 45000 × 1.10 = 49500, PPN 5445
    assert_eq!(kiosk.totals().subtotal, Money::from_major(49_500, IDR));
    assert_eq!(kiosk.totals().tax, Money::from_major(5_445, IDR));
    assert_eq!(kiosk.totals().total, Money::from_major(54_945, IDR));

    Ok(())
}

#[test]
fn weighing_the_same_produce_twice_adds_two_lines() -> TestResult {
    let mut kiosk = shopping(&[0.0, 0.0])?;
    let bananas = key(&kiosk, "w2")?;

    for _ in 0..2 {
        kiosk.dispatch(Action::OpenWeighing)?;
        kiosk.dispatch(Action::SelectProduce(bananas))?;
        kiosk.advance(ms(500))?;
        kiosk.dispatch(Action::ConfirmWeight)?;
    }

    assert_eq!(kiosk.cart().len(), 2);
    assert_eq!(kiosk.item_count(), 2);

    Ok(())
}

#[test]
fn packaged_goods_cannot_go_on_the_scale() -> TestResult {
    let mut kiosk = shopping(&[])?;
    let milk = key(&kiosk, "2")?;

    kiosk.dispatch(Action::OpenWeighing)?;

    assert!(matches!(
        kiosk.dispatch(Action::SelectProduce(milk)),
        Err(KioskError::NotWeighable(_))
    ));
    assert!(!kiosk.scale().is_weighing());

    Ok(())
}

#[test]
fn reselecting_produce_restarts_the_scale() -> TestResult {
    let mut kiosk = shopping(&[0.5, 0.0])?;
    let apples = key(&kiosk, "w1")?;
    let oranges = key(&kiosk, "w3")?;

    kiosk.dispatch(Action::OpenWeighing)?;
    kiosk.dispatch(Action::SelectProduce(apples))?;
    kiosk.advance(ms(500))?;
    kiosk.dispatch(Action::SelectProduce(oranges))?;

    assert_eq!(kiosk.scale().reading(), Decimal::ZERO);
    assert_eq!(kiosk.scale().product(), Some(oranges));

    // 0.10 kg target settles after two ticks
    kiosk.advance(ms(100))?;

    assert!(!kiosk.scale().is_weighing());
    assert_eq!(kiosk.scale().reading(), Decimal::new(10, 2));

    Ok(())
}

#[test]
fn quantity_changes_reprice_and_remove_at_zero() -> TestResult {
    let mut kiosk = shopping(&[])?;

    kiosk.dispatch(Action::Barcode("1".to_string()))?;
    kiosk.dispatch(Action::Barcode("2".to_string()))?;

    let noodles = kiosk.cart().iter().next().ok_or("no line")?.id();

    kiosk.dispatch(Action::ChangeQuantity {
        line: noodles,
        delta: 2,
    })?;

    // 3 × 3500 + 18900
    assert_eq!(kiosk.totals().subtotal, Money::from_major(29_400, IDR));

    kiosk.dispatch(Action::ChangeQuantity {
        line: noodles,
        delta: -3,
    })?;

    assert_eq!(kiosk.cart().len(), 1);
    assert_eq!(kiosk.totals().subtotal, Money::from_major(18_900, IDR));

    assert!(matches!(
        kiosk.dispatch(Action::RemoveLine(noodles)),
        Err(KioskError::Cart(CartError::LineNotFound(_)))
    ));

    let milk = kiosk.cart().iter().next().ok_or("no line")?.id();
    kiosk.dispatch(Action::RemoveLine(milk))?;

    assert!(kiosk.cart().is_empty());
    assert_eq!(*kiosk.totals(), Totals::zero(IDR));

    Ok(())
}

#[test]
fn exact_rounding_keeps_fractional_tax() -> TestResult {
    let config = KioskConfig {
        tax_rounding: TaxRounding::Exact,
        ..KioskConfig::default()
    };
    let mut kiosk = Kiosk::with_random(config, Catalog::bundled()?, ScriptedRandom::new([0.005], 0.0));
    let oranges = kiosk.catalog().find_sku("w3").ok_or("unknown sku")?;

    kiosk.dispatch(Action::Start)?;
    kiosk.dispatch(Action::OpenWeighing)?;
    kiosk.dispatch(Action::SelectProduce(oranges))?;
    kiosk.advance(ms(2_000))?;
    kiosk.dispatch(Action::ConfirmWeight)?;

    let totals = *kiosk.totals();
    let per_major = minor_units_per_major(IDR);

    // 35000 × 0.11 = 3850, PPN 423.50
    assert_eq!(totals.subtotal, Money::from_major(3_850, IDR));
    assert_eq!(
        Decimal::from(totals.tax.to_minor_units()),
        (Decimal::new(42_350, 2) * per_major).round()
    );
    assert_eq!(
        totals.total.to_minor_units(),
        totals.subtotal.to_minor_units() + totals.tax.to_minor_units()
    );

    Ok(())
}

fn product(sku: &str, price: Money<'static, Currency>, category: ProductCategory) -> Product {
    Product {
        sku: sku.to_string(),
        name: sku.to_uppercase(),
        price,
        image: String::new(),
        category,
    }
}

fn custom(catalog: Catalog) -> TestResult<Kiosk<ScriptedRandom>> {
    let mut kiosk = Kiosk::with_random(KioskConfig::default(), catalog, ScriptedRandom::new([], 0.0));

    kiosk.dispatch(Action::Start)?;

    Ok(kiosk)
}

#[test]
fn failed_camera_scan_frees_the_scanner() -> TestResult {
    let catalog = Catalog::with_products([product(
        "w9",
        Money::from_major(20_000, IDR),
        ProductCategory::Produce,
    )])?;
    let mut kiosk = custom(catalog)?;

    kiosk.dispatch(Action::RequestScan)?;

    assert!(matches!(kiosk.advance(ms(800)), Err(KioskError::NothingToScan)));
    assert!(!kiosk.scanner().is_scanning());
    assert!(kiosk.cart().is_empty());

    kiosk.dispatch(Action::RequestScan)?;

    assert!(kiosk.scanner().is_scanning(), "a new scan starts after a failed one");

    Ok(())
}

#[test]
fn overflowing_scan_leaves_cart_and_totals_untouched() -> TestResult {
    let catalog = Catalog::with_products([product(
        "gold",
        Money::from_minor(5_000_000_000_000_000_000, IDR),
        ProductCategory::Packaged,
    )])?;
    let mut kiosk = custom(catalog)?;

    kiosk.dispatch(Action::Barcode("gold".to_string()))?;

    let before = *kiosk.totals();

    let rejected = kiosk.dispatch(Action::Barcode("gold".to_string()));

    assert!(matches!(rejected, Err(KioskError::Pricing(PricingError::Overflow))));
    assert_eq!(kiosk.item_count(), 1);
    assert_eq!(*kiosk.totals(), before);
    assert_eq!(kiosk.scanner().toast().map(|toast| toast.name.as_str()), Some("GOLD"));

    Ok(())
}
