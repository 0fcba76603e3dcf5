//! Cart engine behaviour over the bundled catalog.
//!
//! Covers merge semantics and line order, index and quantity guards, and the
//! aggregate invariants under long random operation sequences: after every
//! step `item_count` equals the sum of line quantities and `total` equals the
//! sum of quantity times unit price.

use rand::{Rng, SeedableRng, rngs::StdRng};
use testresult::TestResult;

use ao33::{
    cart::{AddOutcome, CartEngine},
    catalog::Catalog,
    config::StoreConfig,
    items::{CartItem, Selection},
    storage::MemoryStorage,
};

const SEEDS: [u64; 8] = [1, 2, 3, 5, 8, 13, 21, 34];
const STEPS: usize = 200;

fn open() -> TestResult<CartEngine<MemoryStorage>> {
    Ok(CartEngine::open(MemoryStorage::new(), StoreConfig::default())?)
}

fn assert_aggregates(cart: &CartEngine<MemoryStorage>, step: usize) {
    let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
    let total: u64 = cart
        .items()
        .iter()
        .map(|i| u64::from(i.quantity) * i.price)
        .sum();

    assert_eq!(cart.item_count(), count, "item count diverged at step {step}");
    assert_eq!(cart.total(), total, "total diverged at step {step}");
}

fn assert_unique_lines(cart: &CartEngine<MemoryStorage>, step: usize) {
    for (idx, line) in cart.items().iter().enumerate() {
        let duplicates = cart
            .items()
            .iter()
            .skip(idx + 1)
            .filter(|other| other.merge_key() == line.merge_key())
            .count();

        assert_eq!(duplicates, 0, "duplicate merge key at step {step}");
    }
}

#[test]
fn merge_sums_quantities_and_keeps_first_price() -> TestResult {
    let catalog = Catalog::builtin()?;
    let product = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let mut cart = open()?;

    let first = CartItem::from_selection(product, &Selection::new("rojo").with_quantity(2), 8)?;
    let mut second = first.clone();
    second.quantity = 3;
    second.price = 1;
    second.product_name = "MARK 1 (reprint)".to_string();

    cart.add_item(first.clone());
    assert_eq!(cart.add_item(second), AddOutcome::Merged(0));

    let lines = cart.items();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|l| l.quantity), Some(5));
    assert_eq!(lines.first().map(|l| l.price), Some(first.price));
    assert_eq!(
        lines.first().map(|l| l.product_name.as_str()),
        Some("MARK 1")
    );

    Ok(())
}

#[test]
fn re_adding_keeps_original_position() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mark_1 = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let mark_2 = catalog.product_by_id("mark-2").ok_or("mark-2 missing")?;
    let mut cart = open()?;

    cart.add_product(mark_1, &Selection::new("rojo"));
    cart.add_product(mark_2, &Selection::new("blanco"));
    cart.add_product(mark_1, &Selection::new("rojo"));

    let ids: Vec<&str> = cart.items().iter().map(|l| l.product_id.as_str()).collect();

    assert_eq!(ids, ["mark-1", "mark-2"]);

    Ok(())
}

#[test]
fn remove_and_update_guards() -> TestResult {
    let catalog = Catalog::builtin()?;
    let mark_1 = catalog.product_by_id("mark-1").ok_or("mark-1 missing")?;
    let mark_2 = catalog.product_by_id("mark-2").ok_or("mark-2 missing")?;
    let mut cart = open()?;

    cart.add_product(mark_1, &Selection::new("rojo"));
    cart.add_product(mark_2, &Selection::new("negro"));
    let before = cart.items().to_vec();

    assert!(cart.remove_item(99).is_none());
    assert!(!cart.update_quantity(1, 0));
    assert!(!cart.update_quantity(1, -1));
    assert_eq!(cart.items(), before.as_slice());

    cart.remove_item(0);

    assert_eq!(cart.items(), before.get(1..).ok_or("short cart")?);

    Ok(())
}

#[test]
fn unknown_query_product_is_a_no_op() -> TestResult {
    let catalog = Catalog::builtin()?;
    let cart = open()?;

    assert!(catalog.product_from_query("?product=mark-99").is_none());
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn random_operation_sequences_keep_aggregates() -> TestResult {
    let catalog = Catalog::builtin()?;
    let products = catalog.all_products();

    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cart = open()?;

        for step in 0..STEPS {
            match rng.gen_range(0..5) {
                0 | 1 => {
                    let product = products
                        .get(rng.gen_range(0..products.len()))
                        .ok_or("product index out of range")?;
                    let color = product
                        .colors
                        .get(rng.gen_range(0..product.colors.len()))
                        .ok_or("color index out of range")?;
                    let selection = Selection::new(color.id.clone())
                        .with_size(rng.gen_range(6..13))
                        .with_quantity(rng.gen_range(0..4));

                    let len_before = cart.len();
                    let outcome = cart.add_product(product, &selection);

                    if !product.available {
                        assert!(!outcome.is_accepted(), "unavailable product added");
                        assert_eq!(cart.len(), len_before);
                    }
                }
                2 => {
                    let index = rng.gen_range(0..cart.len() + 2);
                    let len_before = cart.len();
                    let removed = cart.remove_item(index);

                    assert_eq!(removed.is_some(), index < len_before);
                }
                3 => {
                    let index = rng.gen_range(0..cart.len() + 2);
                    let quantity = rng.gen_range(-2..6);
                    let before = cart.items().to_vec();

                    let changed = cart.update_quantity(index, quantity);

                    if quantity < 1 || index >= before.len() {
                        assert!(!changed);
                        assert_eq!(cart.items(), before.as_slice());
                    }
                }
                _ => {
                    if rng.gen_bool(0.05) {
                        cart.clear_cart();
                    }
                }
            }

            assert_aggregates(&cart, step);
            assert_unique_lines(&cart, step);
            assert!(cart.items().iter().all(|l| l.quantity >= 1));
        }
    }

    Ok(())
}
