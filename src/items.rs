//! Items

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::DEFAULT_SIZE, products::Product};

/// Reasons an item cannot enter the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The product is not currently sold.
    #[error("product {0} is not available")]
    Unavailable(String),

    /// The selected color does not belong to the product.
    #[error("product {product} has no color {color}")]
    UnknownColor {
        /// Product identifier
        product: String,

        /// Requested color identifier
        color: String,
    },

    /// The selected size is not offered for the product.
    #[error("product {product} is not offered in size {size}")]
    SizeNotOffered {
        /// Product identifier
        product: String,

        /// Requested size
        size: u8,
    },

    /// Quantities must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// A cart line: a value snapshot of the product taken when it was added.
///
/// Field names serialize in camel case so the persisted layout matches the
/// browser storefront's `localStorage` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier
    pub product_id: String,

    /// Product name at add time
    pub product_name: String,

    /// Product subtitle at add time
    pub product_subtitle: String,

    /// Color identifier
    pub color_id: String,

    /// Color display name
    pub color_name: String,

    /// Glove size
    pub size: u8,

    /// Number of units
    pub quantity: u32,

    /// Unit price at add time
    pub price: u64,

    /// Image for the chosen color
    pub image: String,
}

/// Identity of a cart line for merging purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeKey<'a> {
    /// Product identifier
    pub product_id: &'a str,

    /// Color identifier
    pub color_id: &'a str,

    /// Glove size
    pub size: u8,
}

impl CartItem {
    /// The (product, color, size) identity of this line.
    pub fn merge_key(&self) -> MergeKey<'_> {
        MergeKey {
            product_id: &self.product_id,
            color_id: &self.color_id,
            size: self.size,
        }
    }

    /// Quantity multiplied by unit price.
    pub fn line_total(&self) -> u64 {
        crate::pricing::line_total(self)
    }

    /// Build a cart line from a product and the visitor's choices.
    ///
    /// The unit price is resolved for the selected size using `threshold`.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] if the product is unavailable, the color or size
    /// is not offered, or the quantity is zero.
    pub fn from_selection(
        product: &Product,
        selection: &Selection,
        threshold: u8,
    ) -> Result<Self, ItemError> {
        if !product.available {
            return Err(ItemError::Unavailable(product.id.clone()));
        }

        if selection.quantity == 0 {
            return Err(ItemError::ZeroQuantity);
        }

        let color = product
            .color(&selection.color_id)
            .ok_or_else(|| ItemError::UnknownColor {
                product: product.id.clone(),
                color: selection.color_id.clone(),
            })?;

        if !product.has_size(selection.size) {
            return Err(ItemError::SizeNotOffered {
                product: product.id.clone(),
                size: selection.size,
            });
        }

        Ok(CartItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_subtitle: product.subtitle.clone(),
            color_id: color.id.clone(),
            color_name: color.name.clone(),
            size: selection.size,
            quantity: selection.quantity,
            price: product.price_for_size(selection.size, threshold),
            image: color.image.clone(),
        })
    }
}

/// The visitor's configuration of a product before it is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Chosen color
    pub color_id: String,

    /// Chosen size
    pub size: u8,

    /// Number of units
    pub quantity: u32,
}

impl Selection {
    /// One unit of the given color in the default size.
    pub fn new(color_id: impl Into<String>) -> Self {
        Self {
            color_id: color_id.into(),
            size: DEFAULT_SIZE,
            quantity: 1,
        }
    }

    /// Replace the size.
    #[must_use]
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Replace the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Default selection for a product: first color, default size, one unit.
    pub fn for_product(product: &Product, default_size: u8) -> Option<Self> {
        let color = product.default_color()?;

        Some(Self::new(color.id.clone()).with_size(default_size))
    }
}
