//! Cart
//!
//! [`CartEngine`] owns the visitor's cart for a session. Every display surface
//! reads from it and every change goes through it. Mutations are persisted to
//! the configured storage slot once the previous session's snapshot has been
//! read (see [`CartEngine::hydrate`]).

use std::fmt;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    analytics::{AnalyticsEvent, AnalyticsSink, NoopSink},
    checkout::{CheckoutLink, checkout_message},
    config::StoreConfig,
    items::{CartItem, ItemError, Selection},
    pricing::{format_price, item_count, money, total_price},
    products::Product,
    storage::{CartStorage, load_snapshot, save_snapshot},
};

/// Result of an add operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended at this index.
    Appended(usize),

    /// The quantity was added to the existing line at this index.
    Merged(usize),

    /// Nothing changed.
    Rejected(ItemError),
}

impl AddOutcome {
    /// Whether the cart changed.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, AddOutcome::Rejected(_))
    }
}

/// Errors raised while wiring up an engine.
#[derive(Debug, Error)]
pub enum CartError {
    /// The configured currency is not supported.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Session cart engine
pub struct CartEngine<S: CartStorage> {
    items: Vec<CartItem>,
    storage: S,
    sink: Box<dyn AnalyticsSink>,
    config: StoreConfig,
    currency: &'static Currency,
    hydrated: bool,
}

impl<S: CartStorage> CartEngine<S> {
    /// Create an empty engine that has not yet read its stored snapshot.
    ///
    /// Nothing is written to `storage` until [`CartEngine::hydrate`] has run.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the configured currency is not supported.
    pub fn new(storage: S, config: StoreConfig) -> Result<Self, CartError> {
        let currency = config.currency()?;

        Ok(Self {
            items: Vec::new(),
            storage,
            sink: Box::new(NoopSink),
            config,
            currency,
            hydrated: false,
        })
    }

    /// Create an engine and restore the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the configured currency is not supported.
    pub fn open(storage: S, config: StoreConfig) -> Result<Self, CartError> {
        let mut engine = Self::new(storage, config)?;
        engine.hydrate();

        Ok(engine)
    }

    /// Report cart activity to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: impl AnalyticsSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Restore the stored snapshot, then start persisting.
    ///
    /// Runs once per engine and returns `false` on later calls. A valid snapshot
    /// replaces the in-memory items; an empty slot or a malformed value keeps
    /// them. The resulting state is written straight away.
    pub fn hydrate(&mut self) -> bool {
        if self.hydrated {
            return false;
        }

        if let Some(items) = load_snapshot(&mut self.storage, &self.config.storage_key) {
            self.items = items;
        }

        self.hydrated = true;

        debug!(items = self.items.len(), "cart hydrated");

        self.persist();

        true
    }

    /// Whether the stored snapshot has been read.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Add a line, merging with an existing line of the same product, color and size.
    ///
    /// When merging only the quantity changes: the existing line keeps the
    /// price, names and image captured when it was first added.
    pub fn add_item(&mut self, item: CartItem) -> AddOutcome {
        if item.quantity == 0 {
            debug!(product_id = %item.product_id, "rejected add with zero quantity");
            return AddOutcome::Rejected(ItemError::ZeroQuantity);
        }

        let event = AnalyticsEvent::add_to_cart(&item);

        let existing = self
            .items
            .iter_mut()
            .enumerate()
            .find(|(_, line)| line.merge_key() == item.merge_key());

        let outcome = if let Some((idx, line)) = existing {
            line.quantity = line.quantity.saturating_add(item.quantity);

            debug!(
                product_id = %line.product_id,
                color_id = %line.color_id,
                size = line.size,
                quantity = line.quantity,
                "merged cart line"
            );

            AddOutcome::Merged(idx)
        } else {
            debug!(
                product_id = %item.product_id,
                color_id = %item.color_id,
                size = item.size,
                quantity = item.quantity,
                "appended cart line"
            );

            self.items.push(item);

            AddOutcome::Appended(self.items.len() - 1)
        };

        self.persist();
        self.track(&event);

        outcome
    }

    /// Configure a product into a line and add it.
    ///
    /// Unavailable products, unknown colors and sizes the product is not
    /// offered in are rejected without touching the cart.
    pub fn add_product(&mut self, product: &Product, selection: &Selection) -> AddOutcome {
        match CartItem::from_selection(product, selection, self.config.size_tier_threshold) {
            Ok(item) => self.add_item(item),
            Err(err) => {
                debug!(product_id = %product.id, reason = %err, "rejected add");
                AddOutcome::Rejected(err)
            }
        }
    }

    /// Starting selection for a product page: the first color in the configured
    /// default size, one unit. `None` for a product without colors.
    pub fn default_selection(&self, product: &Product) -> Option<Selection> {
        Selection::for_product(product, self.config.default_size)
    }

    /// Remove the line at `index`. Out-of-range indexes change nothing.
    pub fn remove_item(&mut self, index: usize) -> Option<CartItem> {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "ignored remove out of range");
            return None;
        }

        let removed = self.items.remove(index);
        self.persist();

        Some(removed)
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Quantities below one and out-of-range indexes are ignored; removing a
    /// line is done with [`CartEngine::remove_item`].
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> bool {
        if quantity < 1 {
            debug!(index, quantity, "ignored quantity update below one");
            return false;
        }

        let Ok(quantity) = u32::try_from(quantity) else {
            debug!(index, quantity, "ignored quantity update above the line limit");
            return false;
        };

        let Some(line) = self.items.get_mut(index) else {
            debug!(index, "ignored quantity update out of range");
            return false;
        };

        line.quantity = quantity;
        self.persist();

        true
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Cart lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        item_count(&self.items)
    }

    /// Sum of quantity times unit price.
    pub fn total(&self) -> u64 {
        total_price(&self.items)
    }

    /// The total as money in the store currency.
    pub fn total_money(&self) -> Money<'static, Currency> {
        money(self.total(), self.currency)
    }

    /// The total formatted for display.
    pub fn formatted_total(&self) -> String {
        format_price(&self.total_money(), self.config.thousands_separator)
    }

    /// Start checkout: build the messaging deep link carrying the order.
    ///
    /// Returns `None` for an empty cart. The cart is left as it is; the visitor
    /// finishes the purchase outside the store.
    pub fn begin_checkout(&self) -> Option<CheckoutLink> {
        let message = checkout_message(&self.items, &self.config)?;

        self.track(&AnalyticsEvent::begin_checkout(
            self.item_count(),
            self.total(),
        ));

        Some(CheckoutLink::new(&self.config, message))
    }

    /// Currency prices are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        if !self.hydrated {
            return;
        }

        if let Err(err) = save_snapshot(&mut self.storage, &self.config.storage_key, &self.items) {
            warn!(error = %err, "failed to persist cart");
        }
    }

    fn track(&self, event: &AnalyticsEvent) {
        if let Err(err) = self.sink.track(event) {
            warn!(event = event.name(), error = %err, "analytics event dropped");
        }
    }
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("items", &self.items)
            .field("storage", &self.storage)
            .field("config", &self.config)
            .field("hydrated", &self.hydrated)
            .finish_non_exhaustive()
    }
}
