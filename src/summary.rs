//! Cart summary
//!
//! Plain-text rendering of the cart for terminals and logs: one row per line
//! followed by the item count and formatted total.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::CartEngine,
    items::CartItem,
    pricing::{format_price, money},
    storage::CartStorage,
};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Writing to the output failed
    #[error("failed to write cart summary: {0}")]
    Io(#[from] io::Error),
}

/// Render cart lines as a table.
///
/// `format` turns an amount in whole currency units into display text.
pub fn cart_table(items: &[CartItem], format: impl Fn(u64) -> String) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Producto", "Color", "Talla", "Cant.", "Precio", "Subtotal"]);

    for (idx, item) in items.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            format!("{} {}", item.product_name, item.product_subtitle),
            item.color_name.clone(),
            item.size.to_string(),
            item.quantity.to_string(),
            format(item.price),
            format(item.line_total()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..7), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    table.to_string()
}

/// Write the cart table plus its count and total lines.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_summary<S: CartStorage>(
    mut out: impl io::Write,
    cart: &CartEngine<S>,
) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Tu carrito está vacío")?;
        return Ok(());
    }

    let currency = cart.currency();
    let separator = cart.config().thousands_separator;

    let table = cart_table(cart.items(), |amount| {
        format_price(&money(amount, currency), separator)
    });

    writeln!(out, "{table}")?;
    writeln!(out, " Artículos: {}", cart.item_count())?;
    writeln!(out, " Total: {}", cart.formatted_total())?;

    Ok(())
}
