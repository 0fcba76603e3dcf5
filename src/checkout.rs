//! Checkout hand-off
//!
//! Checkout is a prefilled message sent through a messaging deep link. Nothing
//! comes back: the link is the end of the system.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rusty_money::iso::COP;

use crate::{
    config::StoreConfig,
    items::CartItem,
    pricing::{format_price, money, total_price},
};

/// Characters left unescaped in a query component, as `encodeURIComponent` does.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A deep link into the messaging channel with the order summary attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    message: String,
    url: String,
}

impl CheckoutLink {
    /// Build the link for a message using the configured host and destination.
    pub fn new(config: &StoreConfig, message: String) -> Self {
        let url = format!(
            "https://{}/{}?text={}",
            config.messaging_host,
            config.checkout_destination,
            encode_component(&message)
        );

        Self { message, url }
    }

    /// The plain-text message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The full URL to open.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for CheckoutLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Percent-encode a query component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// One message line: `- {qty}x {name} {subtitle} ({color}, Talla {size})`.
pub fn item_line(item: &CartItem) -> String {
    format!(
        "- {}x {} {} ({}, Talla {})",
        item.quantity, item.product_name, item.product_subtitle, item.color_name, item.size
    )
}

/// Render the order summary sent at checkout.
///
/// Returns `None` for an empty cart. An unknown configured currency falls back
/// to the store default (COP).
pub fn checkout_message(items: &[CartItem], config: &StoreConfig) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let currency = config.currency().unwrap_or(COP);
    let total = format_price(
        &money(total_price(items), currency),
        config.thousands_separator,
    );

    let mut message = format!("{}\n\n", config.greeting);

    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            message.push('\n');
        }
        message.push_str(&item_line(item));
    }

    message.push_str("\n\nTotal: ");
    message.push_str(&total);

    Some(message)
}
