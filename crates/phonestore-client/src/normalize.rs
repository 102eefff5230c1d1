//! Normalization from raw storefront payloads to [`phonestore_core`] types.
//!
//! The backend stores technical specs in two layouts. For every spec key the
//! first non-empty value wins, in this order:
//!
//! 1. flat key under `specs` (`rearCamera`, `screenTech`, ...)
//! 2. flat key under `productDetails`
//! 3. nested key under `specs` (`camera.main`, `display.type`, ...)
//! 4. nested key under `productDetails`
//! 5. empty string
//!
//! RAM and storage additionally fall back to the listing's `variant`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use phonestore_core::product::validate_discount;
use phonestore_core::{
    Product, ProductReviews, ProductSpecs, Rating, Review, ReviewStats, VariantSpec,
};

use crate::types::{
    BatteryField, RawProduct, RawProductReviews, RawReview, RawReviewStats, RawSpecs,
};

/// Returns the first candidate that is present and not blank, trimmed.
fn first_filled<'a, I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn battery_capacity(specs: &RawSpecs) -> Option<&str> {
    match specs.battery.as_ref()? {
        BatteryField::Nested(battery) => battery.capacity.as_deref(),
        BatteryField::Flat(_) => None,
    }
}

fn battery_flat(specs: &RawSpecs) -> Option<&str> {
    match specs.battery.as_ref()? {
        BatteryField::Flat(capacity) => Some(capacity.as_str()),
        BatteryField::Nested(_) => None,
    }
}

fn battery_charging(specs: &RawSpecs) -> Option<&str> {
    match specs.battery.as_ref()? {
        BatteryField::Nested(battery) => battery.charging.as_deref(),
        BatteryField::Flat(_) => None,
    }
}

/// Resolves one spec key across both layouts and both spec locations.
fn pick(
    primary: &RawSpecs,
    details: Option<&RawSpecs>,
    flat: fn(&RawSpecs) -> Option<&str>,
    nested: fn(&RawSpecs) -> Option<&str>,
) -> String {
    first_filled([
        flat(primary),
        details.and_then(flat),
        nested(primary),
        details.and_then(nested),
    ])
}

fn none(_: &RawSpecs) -> Option<&str> {
    None
}

/// Maps both spec layouts of `raw` onto the flat [`ProductSpecs`] record.
#[must_use]
pub fn normalize_specs(raw: &RawProduct) -> ProductSpecs {
    let specs = &raw.specs;
    let details = raw.product_details.as_ref();
    let variant_ram = raw.variant.as_ref().and_then(|v| v.ram.as_deref());
    let variant_storage = raw.variant.as_ref().and_then(|v| v.storage.as_deref());

    ProductSpecs {
        os: pick(specs, details, |s| s.os.as_deref(), none),
        cpu: pick(specs, details, |s| s.cpu.as_deref(), none),
        gpu: pick(specs, details, |s| s.gpu.as_deref(), none),
        ram: first_filled([
            specs.ram.as_deref(),
            details.and_then(|d| d.ram.as_deref()),
            variant_ram,
        ]),
        storage: first_filled([
            specs.storage.as_deref(),
            details.and_then(|d| d.storage.as_deref()),
            variant_storage,
        ]),
        rear_camera: pick(
            specs,
            details,
            |s| s.rear_camera.as_deref(),
            |s| s.camera.as_ref()?.main.as_deref(),
        ),
        front_camera: pick(
            specs,
            details,
            |s| s.front_camera.as_deref(),
            |s| s.camera.as_ref()?.front.as_deref(),
        ),
        screen_tech: pick(
            specs,
            details,
            |s| s.screen_tech.as_deref(),
            |s| s.display.as_ref()?.kind.as_deref(),
        ),
        screen_size: pick(
            specs,
            details,
            |s| s.screen_size.as_deref(),
            |s| s.display.as_ref()?.size.as_deref(),
        ),
        refresh_rate: pick(
            specs,
            details,
            |s| s.refresh_rate.as_deref(),
            |s| s.display.as_ref()?.refresh_rate.as_deref(),
        ),
        brightness: pick(
            specs,
            details,
            |s| s.brightness.as_deref(),
            |s| s.display.as_ref()?.brightness.as_deref(),
        ),
        battery: pick(specs, details, battery_flat, battery_capacity),
        charging: pick(
            specs,
            details,
            |s| s.charging.as_deref(),
            battery_charging,
        ),
    }
}

/// Rounds a wire amount to whole VND.
fn to_amount(value: Decimal) -> Option<i64> {
    value.round().to_i64()
}

/// Out-of-range discounts are clamped into `0..=100` rather than rejected.
fn normalize_discount(id: &str, discount: Option<Decimal>) -> Decimal {
    let discount = discount.unwrap_or_default();
    match validate_discount(discount) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(id = %id, error = %e, "clamping discount");
            discount.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        }
    }
}

/// Converts a raw backend product into a [`Product`].
///
/// Never fails: missing fields take empty defaults, spec layouts are merged
/// by [`normalize_specs`], and a bad discount is clamped with a warning.
#[must_use]
pub fn normalize_product(raw: RawProduct) -> Product {
    let specs = normalize_specs(&raw);
    let discount = normalize_discount(&raw.id, raw.discount);

    let variant = VariantSpec {
        ram: first_filled([
            raw.variant.as_ref().and_then(|v| v.ram.as_deref()),
            Some(specs.ram.as_str()),
        ]),
        storage: first_filled([
            raw.variant.as_ref().and_then(|v| v.storage.as_deref()),
            Some(specs.storage.as_str()),
        ]),
    };

    let prices = raw
        .prices
        .into_iter()
        .filter_map(|(storage, price)| to_amount(price).map(|p| (storage, p)))
        .collect();

    let images = if raw.images.is_empty() {
        raw.image.into_iter().collect()
    } else {
        raw.images
    };

    Product {
        id: raw.id,
        name: raw.name,
        base_product_name: raw.base_product_name,
        link: raw.link.unwrap_or_default(),
        trademark: raw.trademark.unwrap_or_default(),
        original_price: raw.original_price.and_then(to_amount).unwrap_or_default(),
        discount,
        discount_price: raw.discount_price.and_then(to_amount),
        prices,
        memory_options: raw.memory_options,
        ram_options: raw.ram_options,
        color_options: raw.color_options,
        images,
        specs,
        variant,
        rating: raw
            .rating
            .map(|r| Rating {
                average: r.average,
                count: r.count,
            })
            .unwrap_or_default(),
        meta: raw.meta,
        needs: raw.needs,
        special_features: raw.special_features,
        stock: raw.stock,
        shipping_info: raw.shipping_info,
    }
}

fn normalize_review(raw: RawReview) -> Review {
    let author = raw
        .user_id
        .map(|u| u.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Anonymous".to_string());
    Review {
        id: raw.id,
        author,
        rating: raw.rating,
        comment: raw.comment,
        created_at: raw.created_at,
    }
}

fn normalize_stats(raw: RawReviewStats) -> ReviewStats {
    ReviewStats {
        counts: [raw.one, raw.two, raw.three, raw.four, raw.five],
        total: raw.total,
        average: raw.average,
    }
}

/// Converts the reviews payload. Server stats are used when they cover at
/// least one review; otherwise they are recomputed from the list.
#[must_use]
pub fn normalize_reviews(raw: RawProductReviews) -> ProductReviews {
    let reviews: Vec<Review> = raw.reviews.into_iter().map(normalize_review).collect();
    let stats = match raw.stats {
        Some(stats) if stats.total > 0 => normalize_stats(stats),
        _ => ReviewStats::from_reviews(&reviews),
    };
    ProductReviews { reviews, stats }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
