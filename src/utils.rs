//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Directory holding the persisted cart; defaults to in-memory storage
    #[clap(short, long)]
    pub store: Option<PathBuf>,

    /// Catalog YAML file; defaults to the bundled catalog
    #[clap(short, long)]
    pub catalog: Option<PathBuf>,

    /// Store configuration YAML file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Items to add as `product:color:size[:quantity]`, e.g. `mark-1:rojo:9:2`
    #[clap(short, long = "add")]
    pub add: Vec<String>,

    /// Query string used to open a product, e.g. `?product=mark-2`
    #[clap(short, long)]
    pub query: Option<String>,

    /// Empty the cart before adding items
    #[clap(long)]
    pub clear: bool,
}

/// A parsed `--add` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSpec {
    /// Product identifier
    pub product_id: String,

    /// Color identifier
    pub color_id: String,

    /// Size
    pub size: u8,

    /// Quantity, one when omitted
    pub quantity: u32,
}

/// Parse `product:color:size[:quantity]`.
pub fn parse_add_spec(value: &str) -> Option<AddSpec> {
    let mut parts = value.split(':');

    let product_id = parts.next().filter(|part| !part.is_empty())?.to_string();
    let color_id = parts.next().filter(|part| !part.is_empty())?.to_string();
    let size = parts.next()?.parse().ok()?;
    let quantity = match parts.next() {
        Some(quantity) => quantity.parse().ok()?,
        None => 1,
    };

    if parts.next().is_some() {
        return None;
    }

    Some(AddSpec {
        product_id,
        color_id,
        size,
        quantity,
    })
}
