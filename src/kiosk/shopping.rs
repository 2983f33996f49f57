//! Scanning, weighing and cart edits

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    cart::{Cart, LineId, QuantityChange},
    catalog::Catalog,
    config::FlowLayout,
    devices::scanner::resolve_scan,
    kiosk::{Action, Kiosk, KioskError, Screen, TimerEvent, TimerScope},
    pricing::price_cart,
    products::{Product, ProductKey},
    random::RandomSource,
};

impl<R: RandomSource> Kiosk<R> {
    pub(super) fn dispatch_shopping(&mut self, action: Action) -> Result<(), KioskError> {
        let name = action.name();
        let shopping = self.shopping_screen();

        match action {
            Action::Start => {
                self.expect_screen(name, &[Screen::Welcome])?;
                self.go(shopping);
            }
            Action::RequestScan => {
                self.expect_screen(name, &[shopping])?;
                self.request_scan();
            }
            Action::Barcode(code) => {
                self.expect_screen(name, &[shopping])?;
                self.accept_barcode(&code)?;
            }
            Action::KeyPressed { key, modifier } => {
                self.expect_screen(name, &[shopping])?;

                if let Some(code) = self.wedge.key(&key, modifier) {
                    self.accept_barcode(&code)?;
                }
            }
            Action::OpenWeighing => {
                self.expect_screen(name, &[shopping])?;
                self.go(Screen::Weight);
            }
            Action::SelectProduce(key) => {
                self.expect_screen(name, &[Screen::Weight])?;
                self.select_produce(key)?;
            }
            Action::ConfirmWeight => {
                self.expect_screen(name, &[Screen::Weight])?;
                self.confirm_weight()?;
            }
            Action::CancelWeighing => {
                self.expect_screen(name, &[Screen::Weight])?;
                self.go(shopping);
            }
            Action::ReviewCart => {
                self.expect_screen(name, &[Screen::Scan])?;

                if self.cart.is_empty() {
                    return Err(KioskError::EmptyCart);
                }

                self.go(Screen::Cart);
            }
            Action::BackToScan => {
                if self.config.layout != FlowLayout::SeparateScan {
                    return Err(self.invalid(name));
                }

                self.expect_screen(name, &[Screen::Cart])?;
                self.go(Screen::Scan);
            }
            Action::ChangeQuantity { line, delta } => {
                self.expect_screen(name, &[Screen::Cart])?;
                self.change_quantity(line, delta)?;
            }
            Action::RemoveLine(line) => {
                self.expect_screen(name, &[Screen::Cart])?;
                self.remove_line(line)?;
            }
            Action::BackToWelcome => {
                self.expect_screen(name, &[shopping])?;
                self.go(Screen::Welcome);
            }
            _ => return Err(self.invalid(name)),
        }

        Ok(())
    }

    fn request_scan(&mut self) {
        if !self.scanner.begin() {
            debug!("scan already in progress");

            return;
        }

        self.scheduler.after(
            self.config.scan_delay(),
            TimerScope::Screen(self.screen),
            TimerEvent::ScanCompleted,
        );
    }

    pub(super) fn scan_completed(&mut self) -> Result<(), KioskError> {
        let scanned = match resolve_scan(&self.catalog, &mut self.random, None) {
            Some(key) => self.add_scanned(key).map(|name| (key, name)),
            None => Err(KioskError::NothingToScan),
        };

        match scanned {
            Ok((key, name)) => {
                self.scanner.complete(key, name);
                self.show_toast(self.config.scan_toast());

                Ok(())
            }
            Err(error) => {
                self.scanner.reset();

                Err(error)
            }
        }
    }

    fn accept_barcode(&mut self, code: &str) -> Result<(), KioskError> {
        let key = resolve_scan(&self.catalog, &mut self.random, Some(code))
            .ok_or(KioskError::NothingToScan)?;
        let name = self.add_scanned(key)?;

        info!(code, product = %name, "barcode read");

        self.scanner.show_toast(key, name);
        self.show_toast(self.config.barcode_toast());

        Ok(())
    }

    fn add_scanned(&mut self, key: ProductKey) -> Result<String, KioskError> {
        self.edit_cart(|cart, catalog| {
            let product = catalog.get(key).ok_or(KioskError::NothingToScan)?;

            cart.scan(key, product)?;

            Ok(product.name.clone())
        })
    }

    /// Apply `edit` to a copy of the cart and price it. The cart and totals
    /// only change when both succeed.
    fn edit_cart<T>(
        &mut self,
        edit: impl FnOnce(&mut Cart, &Catalog) -> Result<T, KioskError>,
    ) -> Result<T, KioskError> {
        let mut candidate = self.cart.clone();
        let edited = edit(&mut candidate, &self.catalog)?;
        let totals = price_cart(&candidate, &self.config.tax_policy(), self.catalog.currency())?;

        self.cart = candidate;
        self.totals = totals;

        Ok(edited)
    }

    fn show_toast(&mut self, lifetime: Duration) {
        if let Some(key) = self.toast_timer.take() {
            self.scheduler.cancel(key);
        }

        self.toast_timer = Some(self.scheduler.after(
            lifetime,
            TimerScope::Screen(self.screen),
            TimerEvent::ScanToastExpired,
        ));
    }

    fn select_produce(&mut self, key: ProductKey) -> Result<(), KioskError> {
        if !self.catalog.get(key).is_some_and(Product::is_weighed) {
            return Err(KioskError::NotWeighable(key));
        }

        if let Some(timer) = self.scale_timer.take() {
            self.scheduler.cancel(timer);
        }

        self.scale.select(key, &mut self.random);
        self.scale_timer = Some(self.scheduler.every(
            self.config.scale_tick(),
            TimerScope::Screen(Screen::Weight),
            TimerEvent::ScaleTick,
        ));

        Ok(())
    }

    pub(super) fn scale_tick(&mut self) {
        if self.scale.tick(self.config.scale_step())
            && let Some(timer) = self.scale_timer.take()
        {
            self.scheduler.cancel(timer);

            debug!(reading = %self.scale.reading(), "scale settled");
        }
    }

    fn confirm_weight(&mut self) -> Result<(), KioskError> {
        let (key, weight) = self.scale.settled()?;

        let name = self.edit_cart(|cart, catalog| {
            let product = catalog.get(key).ok_or(KioskError::NotWeighable(key))?;

            cart.add_weighed(key, product, weight)?;

            Ok(product.name.clone())
        })?;

        info!(product = %name, %weight, "weighed item added");

        self.go(self.shopping_screen());

        Ok(())
    }

    fn change_quantity(&mut self, line: LineId, delta: i32) -> Result<(), KioskError> {
        let change = self.edit_cart(|cart, _| Ok(cart.update_quantity(line, delta)?))?;

        if let QuantityChange::Removed = change {
            debug!(%line, "line removed at zero quantity");
        }

        Ok(())
    }

    fn remove_line(&mut self, line: LineId) -> Result<(), KioskError> {
        self.edit_cart(|cart, _| Ok(cart.remove(line)?))?;

        Ok(())
    }
}
