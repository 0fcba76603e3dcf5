//! Products

use serde::{Deserialize, Serialize};

use crate::pricing::price_for_size_with_threshold;

/// A color a product is sold in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Color identifier, unique within its product
    pub id: String,

    /// Display name
    pub name: String,

    /// Swatch color (e.g. `#e31937`)
    pub hex: String,

    /// Product image shown for this color
    pub image: String,
}

/// A highlighted product feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeature {
    /// Icon key
    pub icon: String,

    /// Feature text
    pub text: String,
}

/// How a product's unit price is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    /// Same price for every size
    Flat(u64),

    /// Separate prices for small and large sizes
    Tiered {
        /// Price for sizes at or below the tier threshold
        small: u64,

        /// Price for sizes above the tier threshold
        large: u64,
    },
}

impl Pricing {
    /// Unit price for a size.
    pub fn price_for_size(self, size: u8, threshold: u8) -> u64 {
        match self {
            Pricing::Flat(price) => price,
            Pricing::Tiered { small, large } => {
                price_for_size_with_threshold(small, large, size, threshold)
            }
        }
    }

    /// Lowest price any size can have.
    pub fn starting_price(self) -> u64 {
        match self {
            Pricing::Flat(price) => price,
            Pricing::Tiered { small, large } => small.min(large),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// URL slug
    pub slug: String,

    /// Product name
    pub name: String,

    /// Product subtitle
    pub subtitle: String,

    /// Stock keeping unit
    pub sku: String,

    /// Pricing rule
    pub pricing: Pricing,

    /// Marketing claim
    pub claim: String,

    /// Long description
    pub description: String,

    /// Cut type
    pub cut_type: String,

    /// Palm material
    pub palm: Option<String>,

    /// Body material
    pub body: Option<String>,

    /// Closure type
    pub closure: String,

    /// Whether the glove has a reinforced punch zone
    pub punch_zone: bool,

    /// Ordered feature tags
    pub features: Vec<ProductFeature>,

    /// Available colors
    pub colors: Vec<ProductColor>,

    /// Available sizes, ascending
    pub sizes: Vec<u8>,

    /// Whether the product can be added to the cart
    pub available: bool,

    /// Shown as upcoming rather than sold out
    pub coming_soon: bool,

    /// Display order
    pub order: u32,

    /// Extra gallery images
    pub gallery_images: Vec<String>,
}

impl Product {
    /// Unit price for a size under the given tier threshold.
    pub fn price_for_size(&self, size: u8, threshold: u8) -> u64 {
        self.pricing.price_for_size(size, threshold)
    }

    /// Find one of the product's colors.
    pub fn color(&self, color_id: &str) -> Option<&ProductColor> {
        self.colors.iter().find(|color| color.id == color_id)
    }

    /// The color preselected when the product is opened.
    pub fn default_color(&self) -> Option<&ProductColor> {
        self.colors.first()
    }

    /// Whether the product is offered in a size.
    pub fn has_size(&self, size: u8) -> bool {
        self.sizes.contains(&size)
    }

    /// Color images followed by gallery images.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.colors
            .iter()
            .map(|color| color.image.as_str())
            .chain(self.gallery_images.iter().map(String::as_str))
    }
}
