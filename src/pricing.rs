//! Pricing

use rusty_money::{Formatter, Money, Params, Position, iso::Currency};

use crate::{config::SIZE_TIER_THRESHOLD, items::CartItem};

/// Resolve the unit price for a size using the catalog-wide tier threshold.
///
/// Sizes up to and including 8 use `price_small`, sizes from 9 up use `price_large`.
pub fn get_price_for_size(price_small: u64, price_large: u64, size: u8) -> u64 {
    price_for_size_with_threshold(price_small, price_large, size, SIZE_TIER_THRESHOLD)
}

/// Resolve the unit price for a size against an explicit tier threshold.
pub fn price_for_size_with_threshold(
    price_small: u64,
    price_large: u64,
    size: u8,
    threshold: u8,
) -> u64 {
    if size <= threshold {
        price_small
    } else {
        price_large
    }
}

/// Quantity multiplied by unit price.
pub fn line_total(item: &CartItem) -> u64 {
    item.price.saturating_mul(u64::from(item.quantity))
}

/// Sum of `quantity * price` over every item.
pub fn total_price(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(line_total(item)))
}

/// Sum of quantities over every item.
pub fn item_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Convert a whole-unit amount into [`Money`].
pub fn money(amount: u64, currency: &'static Currency) -> Money<'static, Currency> {
    let scale = 10i64.saturating_pow(currency.exponent);
    let major = i64::try_from(amount).unwrap_or(i64::MAX);

    Money::from_minor(major.saturating_mul(scale), currency)
}

/// Format money with no decimal digits and grouped thousands, e.g. `$ 500.000`.
///
/// The symbol is separated from the digits by a no-break space, the way
/// `es-CO` currency formatting renders it.
pub fn format_price(price: &Money<'_, Currency>, thousands_separator: char) -> String {
    let currency = price.currency();

    let digits = Formatter::money(
        price,
        Params {
            digit_separator: thousands_separator,
            rounding: Some(0),
            positions: &[Position::Amount],
            ..Params::default()
        },
    );

    let sign = if price.is_negative() { "-" } else { "" };

    if currency.symbol_first {
        format!("{sign}{}\u{a0}{digits}", currency.symbol)
    } else {
        format!("{sign}{digits}\u{a0}{}", currency.symbol)
    }
}
