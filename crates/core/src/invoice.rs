//! Invoice
//!
//! A pure projection of a submitted [`OrderRecord`] into a printable
//! document. The invoice holds no state of its own; richer export formats
//! (PDF, images) are external collaborators that consume the rendered text.

use std::io;

use rusty_money::{Money, iso};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::order::OrderRecord;

/// Errors that can occur when rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// An amount exceeded the range the money formatter accepts.
    #[error("amount out of range")]
    Amount,

    /// IO error
    #[error("IO error")]
    IO,
}

/// Format an amount in minor units as Taka.
///
/// # Errors
///
/// Returns [`InvoiceError::Amount`] when the amount does not fit the
/// formatter's range.
pub fn format_minor(amount: u64) -> Result<String, InvoiceError> {
    let minor = i64::try_from(amount).map_err(|_err| InvoiceError::Amount)?;

    Ok(format!("{}", Money::from_minor(minor, iso::BDT)))
}

/// Printable view of a submitted order.
#[derive(Debug, Clone, Copy)]
pub struct Invoice<'a> {
    order: &'a OrderRecord,
}

impl<'a> Invoice<'a> {
    /// Create an invoice over the given order.
    #[must_use]
    pub fn new(order: &'a OrderRecord) -> Self {
        Self { order }
    }

    /// Render the invoice to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if an amount cannot be formatted or the
    /// writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), InvoiceError> {
        self.write_header(&mut out)?;
        self.write_items(&mut out)?;
        self.write_summary(&mut out)?;

        Ok(())
    }

    fn write_header(&self, out: &mut impl io::Write) -> Result<(), InvoiceError> {
        let order = self.order;

        writeln!(out, "Order {}", order.order_number).map_err(|_err| InvoiceError::IO)?;
        writeln!(out, "Placed {}", order.order_date).map_err(|_err| InvoiceError::IO)?;
        writeln!(out, "Status {}", order.status).map_err(|_err| InvoiceError::IO)?;
        writeln!(out, "Payment {}", order.payment_method).map_err(|_err| InvoiceError::IO)?;

        writeln!(out).map_err(|_err| InvoiceError::IO)?;

        writeln!(
            out,
            "Deliver to: {}, {}",
            order.customer.name, order.customer.phone
        )
        .map_err(|_err| InvoiceError::IO)?;

        writeln!(
            out,
            "{} ({} delivery)",
            address_line(order),
            order.delivery_location
        )
        .map_err(|_err| InvoiceError::IO)?;

        Ok(())
    }

    fn write_items(&self, out: &mut impl io::Write) -> Result<(), InvoiceError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Color", "Unit Price", "Qty", "Line Total"]);

        let mut item_boundary_rows: SmallVec<[usize; 16]> = smallvec![];

        for (row, line) in self.order.items.iter().enumerate() {
            // Header is row 0.
            item_boundary_rows.push(row + 1);

            builder.push_record([
                line.product.name.clone(),
                line.color.name.clone(),
                format_minor(line.product.price)?,
                line.quantity.to_string(),
                format_minor(line.line_total())?,
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        for &row in &item_boundary_rows {
            if row > 1 {
                theme.insert_horizontal_line(row, separator);
            }
        }

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| InvoiceError::IO)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), InvoiceError> {
        let order = self.order;

        let subtotal = format_minor(order.subtotal)?;
        let delivery = format_minor(order.delivery_charge)?;
        let total = format_minor(order.grand_total)?;

        let width = subtotal.len().max(delivery.len()).max(total.len());

        writeln!(out, "{:>10}  {subtotal:>width$}", "Subtotal:")
            .map_err(|_err| InvoiceError::IO)?;

        writeln!(out, "{:>10}  {delivery:>width$}", "Delivery:")
            .map_err(|_err| InvoiceError::IO)?;

        writeln!(out, "\x1b[1m{:>10}  {total:>width$}\x1b[0m", "Total:")
            .map_err(|_err| InvoiceError::IO)?;

        Ok(())
    }
}

/// The customer's address on one line, street included only when given.
fn address_line(order: &OrderRecord) -> String {
    let customer = &order.customer;

    match &customer.street {
        Some(street) => format!(
            "{}, {street}, {}, {}",
            customer.house_number, customer.sub_district, customer.district
        ),
        None => format!(
            "{}, {}, {}",
            customer.house_number, customer.sub_district, customer.district
        ),
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rand::{SeedableRng, rngs::StdRng};
    use testresult::TestResult;

    use crate::{
        address::DeliveryAddress,
        cart::Cart,
        delivery::DeliveryLocation,
        order::OrderRecord,
        products::{ColorOption, Product, ProductId},
    };

    use super::*;

    fn order() -> TestResult<OrderRecord> {
        let mut cart = Cart::new();

        cart.add_or_merge(
            Product {
                id: ProductId::new("p1"),
                name: "Panjabi".to_string(),
                price: 500_00,
                stock: 10,
                colors: vec![ColorOption::new("navy", "Navy")],
                image_url: None,
                description: None,
                category: None,
            },
            2,
            ColorOption::new("navy", "Navy"),
            Timestamp::UNIX_EPOCH,
        )?;

        cart.add_or_merge(
            Product {
                id: ProductId::new("p2"),
                name: "Saree".to_string(),
                price: 1200_00,
                stock: 3,
                colors: vec![ColorOption::new("maroon", "Maroon")],
                image_url: None,
                description: None,
                category: None,
            },
            1,
            ColorOption::new("maroon", "Maroon"),
            Timestamp::UNIX_EPOCH,
        )?;

        let customer = DeliveryAddress {
            name: "Farhana Akter".to_string(),
            phone: "01712345678".to_string(),
            district: "Dhaka".to_string(),
            sub_district: "Dhanmondi".to_string(),
            house_number: "12/B".to_string(),
            street: Some("Road 27".to_string()),
        };

        let mut rng = StdRng::seed_from_u64(7);

        Ok(OrderRecord::build(
            &cart,
            customer,
            DeliveryLocation::Dhaka,
            Timestamp::UNIX_EPOCH,
            &mut rng,
        )?)
    }

    #[test]
    fn renders_items_customer_and_totals() -> TestResult {
        let order = order()?;

        let mut out = Vec::new();
        Invoice::new(&order).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains(&order.order_number));
        assert!(output.contains("Farhana Akter"));
        assert!(output.contains("Panjabi"));
        assert!(output.contains("Saree"));
        assert!(output.contains("Navy"));
        assert!(output.contains("Subtotal:"));
        assert!(output.contains("Delivery:"));
        assert!(output.contains("Total:"));
        assert!(output.contains("Cash on Delivery"));

        Ok(())
    }

    #[test]
    fn street_is_omitted_when_absent() -> TestResult {
        let mut order = order()?;
        order.customer.street = None;

        let mut out = Vec::new();
        Invoice::new(&order).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(!output.contains("Road 27"));
        assert!(output.contains("Dhanmondi"));

        Ok(())
    }

    #[test]
    fn format_minor_renders_taka() -> TestResult {
        let formatted = format_minor(1100_00)?;

        // 1100 Tk, however the currency chooses to group digits.
        assert!(formatted.contains("1"), "unexpected format: {formatted}");
        assert!(formatted.ends_with(".00"), "unexpected format: {formatted}");

        Ok(())
    }
}
