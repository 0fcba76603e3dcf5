//! Analytics
//!
//! Cart activity is reported to an injected [`AnalyticsSink`]. Reporting is
//! best-effort: the cart engine logs and drops any sink error so a broken or
//! missing sink never affects the cart itself.

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::info;

use crate::items::CartItem;

/// Event emitted when an item is added to the cart.
pub const ADD_TO_CART: &str = "add_to_cart";

/// Event emitted when checkout starts.
pub const BEGIN_CHECKOUT: &str = "begin_checkout";

/// Errors a sink may report.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The sink could not deliver the event.
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}

/// A parameter value attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValue {
    /// Text value
    Text(String),

    /// Numeric value
    Number(u64),
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventValue::Text(text) => f.write_str(text),
            EventValue::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::Text(value.to_string())
    }
}

impl From<u64> for EventValue {
    fn from(value: u64) -> Self {
        EventValue::Number(value)
    }
}

/// An analytics event: a name plus ordered named parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    name: &'static str,
    params: SmallVec<[(&'static str, EventValue); 6]>,
}

impl AnalyticsEvent {
    /// Create an event with no parameters.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: SmallVec::new(),
        }
    }

    /// Attach a parameter.
    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<EventValue>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// `add_to_cart` for the item as it was submitted.
    pub fn add_to_cart(item: &CartItem) -> Self {
        Self::new(ADD_TO_CART)
            .with("product_id", item.product_id.as_str())
            .with("product_name", item.product_name.as_str())
            .with("color", item.color_name.as_str())
            .with("size", u64::from(item.size))
            .with("quantity", u64::from(item.quantity))
            .with("value", item.line_total())
    }

    /// `begin_checkout` with the cart's aggregate count and value.
    pub fn begin_checkout(items_total: u64, value: u64) -> Self {
        Self::new(BEGIN_CHECKOUT)
            .with("items_total", items_total)
            .with("value", value)
    }

    /// Event name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&'static str, &EventValue)> {
        self.params.iter().map(|(key, value)| (*key, value))
    }

    /// Look up a parameter by name.
    pub fn param(&self, key: &str) -> Option<&EventValue> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// Receives analytics events.
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsSink {
    /// Deliver an event.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyticsError`] if the event could not be delivered.
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Sink used when no analytics is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Sink that records events as `tracing` logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let params = event
            .params()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");

        info!(event = event.name(), %params, "analytics event");

        Ok(())
    }
}
