//! Checkout Example
//!
//! This example builds a cart from the catalog and prints the checkout link.
//!
//! Use `-a product:color:size[:quantity]` (repeatable) to add items
//! Use `-s` to persist the cart in a directory between runs
//! Use `-q` to open a product from a query string, e.g. `-q '?product=mark-2'`

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ao33::{
    analytics::TracingSink,
    cart::{AddOutcome, CartEngine},
    catalog::Catalog,
    config::StoreConfig,
    items::Selection,
    pricing::{format_price, money},
    storage::{CartStorage, FileStorage, MemoryStorage},
    summary::write_summary,
    utils::{DemoArgs, parse_add_spec},
};

/// Checkout Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };

    let catalog = match args.catalog.as_deref() {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };

    match args.store.as_deref() {
        Some(dir) => run(&args, &catalog, FileStorage::open(dir)?, config),
        None => run(&args, &catalog, MemoryStorage::new(), config),
    }
}

#[expect(clippy::print_stdout, reason = "Example code")]
fn run<S: CartStorage>(
    args: &DemoArgs,
    catalog: &Catalog,
    storage: S,
    config: StoreConfig,
) -> Result<()> {
    let mut cart = CartEngine::open(storage, config)?.with_sink(TracingSink);

    if args.clear {
        cart.clear_cart();
    }

    if let Some(product) = args.query.as_deref().and_then(|q| catalog.product_from_query(q)) {
        let separator = cart.config().thousands_separator;
        let from = money(product.pricing.starting_price(), cart.currency());

        println!(
            "Opened {} {} ({}), from {}",
            product.name,
            product.subtitle,
            product.sku,
            format_price(&from, separator)
        );

        if let Some(selection) = cart.default_selection(product) {
            let price = money(
                product.price_for_size(selection.size, cart.config().size_tier_threshold),
                cart.currency(),
            );

            println!(
                "Default: {}, Talla {}, {}",
                selection.color_id,
                selection.size,
                format_price(&price, separator)
            );
        }
    }

    for raw in &args.add {
        let Some(wanted) = parse_add_spec(raw) else {
            bail!("invalid --add value {raw:?}, expected product:color:size[:quantity]");
        };

        let Some(product) = catalog.product_by_id(&wanted.product_id) else {
            println!("Unknown product {}, skipped", wanted.product_id);
            continue;
        };

        let selection = Selection::new(wanted.color_id)
            .with_size(wanted.size)
            .with_quantity(wanted.quantity);

        if let AddOutcome::Rejected(reason) = cart.add_product(product, &selection) {
            println!("Not added: {reason}");
        }
    }

    write_summary(io::stdout().lock(), &cart)?;

    match cart.begin_checkout() {
        Some(link) => println!("\n{link}"),
        None => println!("\nNothing to check out"),
    }

    Ok(())
}
