//! Catalog
//!
//! The static, read-only registry of products the storefront sells.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;
use url::form_urlencoded;

use crate::{catalog::fixture::CatalogFixture, products::Product};

pub mod fixture;

/// The catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../fixtures/catalog.yml");

/// Query-string parameter naming the product to open.
pub const PRODUCT_QUERY_PARAM: &str = "product";

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share an identifier
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// Two products share a slug
    #[error("Duplicate product slug: {0}")]
    DuplicateSlug(String),

    /// A product must set either a flat price or both tier prices
    #[error("Product {0} must set either `price` or both `price_small` and `price_large`")]
    InvalidPricing(String),

    /// A product has no colors
    #[error("Product {0} has no colors")]
    NoColors(String),

    /// A product has no sizes
    #[error("Product {0} has no sizes")]
    NoSizes(String),

    /// A product's sizes are not strictly ascending
    #[error("Product {0} sizes must be strictly ascending")]
    UnsortedSizes(String),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Products sorted by display order
    products: Vec<Product>,

    /// Product id -> position in `products`
    by_id: FxHashMap<String, usize>,

    /// Product slug -> position in `products`
    by_slug: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, sorting products by display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if an id or slug is used twice.
    pub fn new(mut products: Vec<Product>) -> Result<Self, CatalogError> {
        products.sort_by_key(|product| product.order);

        let mut by_id = FxHashMap::default();
        let mut by_slug = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }

            if by_slug.insert(product.slug.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }

        Ok(Catalog {
            products,
            by_id,
            by_slug,
        })
    }

    /// Parse a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document is malformed or a product
    /// breaks a catalog invariant.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    /// Load a YAML catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled document is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Every product, ascending by display order.
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// Products that can currently be added to the cart.
    pub fn available_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.available)
    }

    /// Look up a product by id.
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).and_then(|&idx| self.products.get(idx))
    }

    /// Look up a product by slug.
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.by_slug.get(slug).and_then(|&idx| self.products.get(idx))
    }

    /// Resolve the product named by the `product` parameter of a query string.
    ///
    /// Accepts the query with or without its leading `?`. A missing parameter or
    /// an unknown id resolves to `None`.
    pub fn product_from_query(&self, query: &str) -> Option<&Product> {
        let id = query_param(query, PRODUCT_QUERY_PARAM)?;
        let product = self.product_by_id(&id);

        if product.is_none() {
            debug!(product_id = %id, "ignoring unknown product in query");
        }

        product
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// First non-empty value of `name` in a form-encoded query string.
fn query_param(query: &str, name: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _value)| key == name)
        .map(|(_key, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
