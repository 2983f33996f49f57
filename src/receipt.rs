//! Receipt

use std::{fmt::Write, io};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    order::OrderNumber,
    pricing::{PricingError, Totals, line_total},
    weight::Weight,
};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One printed line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    /// Product name
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Measured weight, for produce
    pub weight: Option<Weight>,

    /// Unit price, per kilogram for produce
    pub unit_price: Money<'static, Currency>,

    /// Line total
    pub total: Money<'static, Currency>,
}

/// Receipt for a paid order.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    order: Option<OrderNumber>,
    lines: Vec<ReceiptLine>,
    totals: Totals,
    tax_rate: Percentage,
}

impl Receipt {
    /// Build a receipt from a cart and its totals.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError::Pricing`] if a line cannot be priced.
    pub fn new(
        cart: &Cart,
        totals: Totals,
        tax_rate: Percentage,
        order: Option<OrderNumber>,
    ) -> Result<Self, ReceiptError> {
        let lines = cart
            .iter()
            .map(|item| {
                Ok(ReceiptLine {
                    name: item.product().name.clone(),
                    quantity: item.quantity(),
                    weight: item.weight(),
                    unit_price: *item.unit_price(),
                    total: line_total(item)?,
                })
            })
            .collect::<Result<Vec<_>, ReceiptError>>()?;

        Ok(Self {
            order,
            lines,
            totals,
            tax_rate,
        })
    }

    /// Order number, once payment succeeded
    pub fn order(&self) -> Option<OrderNumber> {
        self.order
    }

    /// Printed lines, in cart order
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Subtotal, tax and total
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Writes the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            let quantity = match line.weight {
                Some(weight) if line.quantity > 1 => format!("{weight} × {}", line.quantity),
                Some(weight) => weight.to_string(),
                None => line.quantity.to_string(),
            };

            let unit_price = if line.weight.is_some() {
                format!("{}/kg", line.unit_price)
            } else {
                line.unit_price.to_string()
            };

            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                quantity,
                unit_price,
                line.total.to_string(),
            ]);
        }

        write_receipt_table(&mut out, builder)?;
        write_receipt_summary(&mut out, self)
    }
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Columns::new(3..4), color_dark_grey());

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(out: &mut impl io::Write, receipt: &Receipt) -> Result<(), ReceiptError> {
    let tax_points = ((receipt.tax_rate * Decimal::ONE) * Decimal::ONE_HUNDRED)
        .round_dp(2)
        .normalize();

    let mut rows = vec![
        (" Subtotal:".to_string(), format!("{}  ", receipt.totals.subtotal)),
        (format!(" PPN ({tax_points}%):"), format!("{}  ", receipt.totals.tax)),
        (
            " \x1b[1mTotal:\x1b[0m".to_string(),
            format!("\x1b[1m{}  \x1b[0m", receipt.totals.total),
        ),
    ];

    if let Some(order) = receipt.order {
        rows.push((" Order:".to_string(), format!("{order}  ")));
    }

    let label_width = rows
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in dark grey.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Width of a string once ANSI escapes are stripped.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        catalog::Catalog,
        pricing::{TaxPolicy, price_cart},
        random::ScriptedRandom,
    };

    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;

        for ch in s.chars() {
            if in_escape {
                in_escape = !ch.is_ascii_alphabetic();
            } else if ch == '\x1b' {
                in_escape = true;
            } else {
                out.push(ch);
            }
        }

        out
    }

    fn sample_cart(catalog: &Catalog) -> TestResult<Cart> {
        let mut cart = Cart::new();

        let noodles = catalog.find_sku("1").ok_or("missing noodles")?;
        let apples = catalog.find_sku("w1").ok_or("missing apples")?;

        let noodle_product = catalog.get(noodles).ok_or("missing noodles")?;
        cart.scan(noodles, noodle_product)?;
        cart.scan(noodles, noodle_product)?;

        cart.add_weighed(
            apples,
            catalog.get(apples).ok_or("missing apples")?,
            Weight::from_kilograms(Decimal::new(150, 2))?,
        )?;

        Ok(cart)
    }

    #[test]
    fn receipt_lines_follow_cart() -> TestResult {
        let catalog = Catalog::bundled()?;
        let cart = sample_cart(&catalog)?;
        let policy = TaxPolicy::default();
        let totals = price_cart(&cart, &policy, catalog.currency())?;

        let receipt = Receipt::new(&cart, totals, policy.rate, None)?;

        let quantities: Vec<u32> = receipt.lines().iter().map(|line| line.quantity).collect();

        assert_eq!(quantities, vec![2, 1]);
        assert_eq!(
            receipt.lines().iter().map(|line| line.total.to_minor_units()).sum::<i64>(),
            totals.subtotal.to_minor_units()
        );

        Ok(())
    }

    #[test]
    fn renders_table_and_summary() -> TestResult {
        let catalog = Catalog::bundled()?;
        let cart = sample_cart(&catalog)?;
        let policy = TaxPolicy::default();
        let totals = price_cart(&cart, &policy, catalog.currency())?;
        let mut random = ScriptedRandom::new([0.0], 0.0);

        let receipt = Receipt::new(
            &cart,
            totals,
            policy.rate,
            Some(OrderNumber::generate(&mut random)),
        )?;

        let mut out = Vec::new();
        receipt.write_to(&mut out)?;

        let text = strip_ansi(&String::from_utf8(out)?);

        assert!(text.contains("Indomie Goreng"), "{text}");
        assert!(text.contains("1.50 kg"), "{text}");
        assert!(text.contains("Subtotal:"), "{text}");
        assert!(text.contains("PPN (11%):"), "{text}");
        assert!(text.contains("ORD-10000"), "{text}");

        Ok(())
    }

    #[test]
    fn visible_width_ignores_escape_codes() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
        assert_eq!(visible_width("plain"), 5);
    }
}
