//! AO33
//!
//! Cart and catalog engine for the AO33 goalkeeping-glove storefront: product
//! lookup, size-tiered pricing, a persisted session cart and the messaging
//! checkout hand-off.

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod summary;
pub mod utils;
