//! Checkout hand-off from a cart built through the catalog.

use testresult::TestResult;

use ao33::{
    cart::CartEngine, catalog::Catalog, checkout::encode_component, config::StoreConfig,
    items::Selection, pricing::get_price_for_size, storage::MemoryStorage,
};

#[test]
fn size_tier_prices() {
    assert_eq!(get_price_for_size(230_000, 250_000, 8), 230_000);
    assert_eq!(get_price_for_size(230_000, 250_000, 9), 250_000);
}

#[test]
fn checkout_message_for_single_line() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mark_1 = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let mut cart = CartEngine::open(MemoryStorage::new(), StoreConfig::default())?;

    cart.add_product(mark_1, &Selection::new("rojo").with_size(9).with_quantity(2));

    assert_eq!(cart.total(), 500_000);

    let link = cart.begin_checkout().ok_or("no checkout link")?;

    assert_eq!(
        link.message(),
        "Hola! Quiero comprar:\n\n- 2x MARK 1 NEGATIVE CUT (Rojo, Talla 9)\n\nTotal: $\u{a0}500.000"
    );
    assert_eq!(
        link.url(),
        format!(
            "https://wa.me/573001234567?text={}",
            encode_component(link.message())
        )
    );

    Ok(())
}

#[test]
fn checkout_lists_lines_in_cart_order() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mark_1 = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let mark_2 = catalog.product_by_id("mark-2").ok_or("mark-2 missing")?;
    let mut cart = CartEngine::open(MemoryStorage::new(), StoreConfig::default())?;

    cart.add_product(mark_2, &Selection::new("negro").with_size(7));
    cart.add_product(mark_1, &Selection::new("blanco").with_size(10));

    let link = cart.begin_checkout().ok_or("no checkout link")?;
    let lines: Vec<&str> = link.message().lines().filter(|l| l.starts_with("- ")).collect();

    assert_eq!(
        lines,
        [
            "- 1x MARK 2 NEGATIVE CUT DOBLE CIERRE (Negro, Talla 7)",
            "- 1x MARK 1 NEGATIVE CUT (Blanco, Talla 10)",
        ]
    );
    assert!(link.message().ends_with("Total: $\u{a0}480.000"));

    Ok(())
}

#[test]
fn empty_cart_has_no_checkout() -> TestResult {
    let cart = CartEngine::open(MemoryStorage::new(), StoreConfig::default())?;

    assert!(cart.begin_checkout().is_none());

    Ok(())
}

#[test]
fn destination_comes_from_config() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mark_1 = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let config = StoreConfig::from_yaml("checkout_destination: \"571234\"\n")?;
    let mut cart = CartEngine::open(MemoryStorage::new(), config)?;

    cart.add_product(mark_1, &Selection::new("rojo"));

    let link = cart.begin_checkout().ok_or("no checkout link")?;

    assert!(link.url().starts_with("https://wa.me/571234?text="));

    Ok(())
}
