//! AO33 prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    analytics::{AnalyticsError, AnalyticsEvent, AnalyticsSink, EventValue, NoopSink, TracingSink},
    cart::{AddOutcome, CartEngine, CartError},
    catalog::{Catalog, CatalogError},
    checkout::CheckoutLink,
    config::{ConfigError, StoreConfig},
    items::{CartItem, ItemError, MergeKey, Selection},
    pricing::{format_price, get_price_for_size},
    products::{Pricing, Product, ProductColor, ProductFeature},
    storage::{CartStorage, FileStorage, MemoryStorage, StorageError},
};
