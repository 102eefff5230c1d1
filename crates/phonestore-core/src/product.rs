use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::slug::compact;
use crate::CoreError;

/// Prefix under which the backend serves phone images.
pub const IMAGE_ROOT: &str = "/images/phone/";

/// A phone listing normalized from the backend's detail or list payloads.
///
/// Prices are whole VND amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Full listing name as stored by the backend, e.g. `"iPhone 15 128GB"`.
    pub name: String,
    /// Product line shared by all sibling variants, e.g. `"iPhone 15"`.
    pub base_product_name: String,
    /// The backend's own detail slug, used for navigation.
    pub link: String,
    pub trademark: String,
    pub original_price: i64,
    /// Percentage in `0..=100`.
    pub discount: Decimal,
    /// Sale price when supplied directly by the backend.
    pub discount_price: Option<i64>,
    /// Active price per storage label (`"128GB"` → price).
    pub prices: BTreeMap<String, i64>,
    pub memory_options: Vec<String>,
    /// RAM label per storage label, for lines with distinct RAM tiers.
    pub ram_options: Option<BTreeMap<String, String>>,
    pub color_options: Vec<String>,
    pub images: Vec<String>,
    pub specs: ProductSpecs,
    pub variant: VariantSpec,
    pub rating: Rating,
    pub meta: Option<String>,
    pub needs: Vec<String>,
    pub special_features: Vec<String>,
    pub stock: Option<i64>,
    pub shipping_info: Option<String>,
}

/// Flat technical specification record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub os: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub storage: String,
    pub rear_camera: String,
    pub front_camera: String,
    pub screen_tech: String,
    pub screen_size: String,
    pub refresh_rate: String,
    pub brightness: String,
    pub battery: String,
    pub charging: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub ram: String,
    pub storage: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// Check that a discount percentage lies in `0..=100`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDiscount`] when it does not.
pub fn validate_discount(discount: Decimal) -> Result<Decimal, CoreError> {
    if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(CoreError::InvalidDiscount(discount.to_string()));
    }
    Ok(discount)
}

/// `original * (1 - discount / 100)`, rounded to the nearest whole unit.
#[must_use]
pub fn discounted(original_price: i64, discount: Decimal) -> i64 {
    let factor = (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED;
    (Decimal::from(original_price) * factor)
        .round()
        .to_i64()
        .unwrap_or(original_price)
}

impl Product {
    /// Sale price: the backend-supplied value when present, otherwise derived
    /// from `original_price` and `discount`.
    #[must_use]
    pub fn effective_discount_price(&self) -> i64 {
        self.discount_price
            .unwrap_or_else(|| discounted(self.original_price, self.discount))
    }

    /// Image paths rooted at `/images/phone/<TRADEMARK>/<BaseName>/`.
    ///
    /// Paths already under [`IMAGE_ROOT`] are returned unchanged. Without a
    /// trademark or base name the raw paths are returned as-is.
    #[must_use]
    pub fn image_urls(&self) -> Vec<String> {
        if self.trademark.is_empty() || self.base_product_name.is_empty() {
            return self.images.clone();
        }
        let dir = format!(
            "{IMAGE_ROOT}{}/{}",
            self.trademark.to_uppercase(),
            compact(&self.base_product_name)
        );
        self.images
            .iter()
            .map(|image| {
                if image.starts_with(IMAGE_ROOT) {
                    image.clone()
                } else {
                    format!("{dir}/{}", image.trim_start_matches('/'))
                }
            })
            .collect()
    }

    /// RAM label for a storage tier, from `ram_options` first, then from this
    /// listing's own variant when the storage matches.
    #[must_use]
    pub fn ram_for_storage(&self, storage: &str) -> Option<&str> {
        self.ram_options
            .as_ref()
            .and_then(|m| m.get(storage))
            .map(String::as_str)
            .or_else(|| {
                (self.variant.storage == storage && !self.variant.ram.is_empty())
                    .then_some(self.variant.ram.as_str())
            })
    }
}
