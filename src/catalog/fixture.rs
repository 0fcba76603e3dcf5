//! Catalog Fixtures

use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    products::{Pricing, Product, ProductColor, ProductFeature},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Product fixtures in document order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
///
/// Either `price` or both `price_small` and `price_large` must be present.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// URL slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Product subtitle
    pub subtitle: String,

    /// Stock keeping unit
    pub sku: String,

    /// Flat price
    #[serde(default)]
    pub price: Option<u64>,

    /// Price for small sizes
    #[serde(default)]
    pub price_small: Option<u64>,

    /// Price for large sizes
    #[serde(default)]
    pub price_large: Option<u64>,

    /// Marketing claim
    #[serde(default)]
    pub claim: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Cut type
    pub cut_type: String,

    /// Palm material
    #[serde(default)]
    pub palm: Option<String>,

    /// Body material
    #[serde(default)]
    pub body: Option<String>,

    /// Closure type
    pub closure: String,

    /// Reinforced punch zone
    #[serde(default)]
    pub punch_zone: bool,

    /// Feature tags
    #[serde(default)]
    pub features: Vec<ProductFeature>,

    /// Colors
    pub colors: Vec<ProductColor>,

    /// Sizes
    pub sizes: Vec<u8>,

    /// Availability
    pub available: bool,

    /// Upcoming product
    #[serde(default)]
    pub coming_soon: bool,

    /// Display order
    pub order: u32,

    /// Gallery images
    #[serde(default)]
    pub gallery_images: Vec<String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let pricing = match (fixture.price, fixture.price_small, fixture.price_large) {
            (Some(price), None, None) => Pricing::Flat(price),
            (None, Some(small), Some(large)) => Pricing::Tiered { small, large },
            _ => return Err(CatalogError::InvalidPricing(fixture.id)),
        };

        if fixture.colors.is_empty() {
            return Err(CatalogError::NoColors(fixture.id));
        }

        if fixture.sizes.is_empty() {
            return Err(CatalogError::NoSizes(fixture.id));
        }

        if !fixture.sizes.windows(2).all(|pair| pair.first() < pair.get(1)) {
            return Err(CatalogError::UnsortedSizes(fixture.id));
        }

        Ok(Product {
            id: fixture.id,
            slug: fixture.slug,
            name: fixture.name,
            subtitle: fixture.subtitle,
            sku: fixture.sku,
            pricing,
            claim: fixture.claim,
            description: fixture.description,
            cut_type: fixture.cut_type,
            palm: fixture.palm,
            body: fixture.body,
            closure: fixture.closure,
            punch_zone: fixture.punch_zone,
            features: fixture.features,
            colors: fixture.colors,
            sizes: fixture.sizes,
            available: fixture.available,
            coming_soon: fixture.coming_soon,
            order: fixture.order,
            gallery_images: fixture.gallery_images,
        })
    }
}
