//! Variant resolution: display names, slugs, and active prices for sibling
//! listings of one product line.
//!
//! A product line is either *single-tier* (one RAM size per model, named and
//! keyed by storage alone, e.g. `"iPhone 15 128GB"`) or *multi-tier* (named
//! `"<base> <ram>/<storage>"` and keyed by the `(ram, storage)` pair). Which
//! one applies is decided by [`CatalogRules`].

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::CatalogRules;
use crate::product::{Product, ProductSpecs};
use crate::slug::{detail_route, slugify};
use crate::CoreError;

static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(mb|gb|tb)\s*$").expect("valid capacity regex")
});

/// Parses a memory label such as `"128GB"`, `"1 TB"`, or `"512mb"` into
/// megabytes. Returns `None` for anything else.
#[must_use]
pub fn capacity_mb(label: &str) -> Option<u64> {
    let caps = CAPACITY_RE.captures(label)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let scale = match caps.get(2)?.as_str().to_ascii_lowercase().as_str() {
        "mb" => 1.0,
        "gb" => 1024.0,
        _ => 1024.0 * 1024.0,
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((value * scale).round() as u64)
}

/// Orders memory labels by parsed capacity; unparseable labels sort last in
/// lexical order.
fn compare_capacity(a: &str, b: &str) -> Ordering {
    match (capacity_mb(a), capacity_mb(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum VariantKey {
    Storage(String),
    RamStorage { ram: String, storage: String },
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariantKey::Storage(storage) => write!(f, "{storage}"),
            VariantKey::RamStorage { ram, storage } => write!(f, "{ram}/{storage}"),
        }
    }
}

/// Human-readable name for `product` at `storage`.
///
/// Single-tier lines: `"<base> <storage>"`. Otherwise `"<base> <ram>/<storage>"`,
/// falling back to the single-tier form when no RAM label is known.
#[must_use]
pub fn display_name(product: &Product, storage: &str, rules: &CatalogRules) -> String {
    let base = product.base_product_name.trim();
    if rules.is_single_tier(base) {
        return format!("{base} {storage}");
    }
    match product.ram_for_storage(storage) {
        Some(ram) => format!("{base} {ram}/{storage}"),
        None => format!("{base} {storage}"),
    }
}

/// URL slug for `product`'s own variant, built like [`display_name`] but
/// with RAM and storage as separate words.
///
/// `"Product X"` / `"128GB"` on a single-tier line → `"product-x-128gb"`;
/// `"8GB"` / `"256GB"` on a multi-tier line → `"product-x-8gb-256gb"`.
#[must_use]
pub fn variant_slug(product: &Product, rules: &CatalogRules) -> String {
    let base = product.base_product_name.trim();
    let storage = product.variant.storage.as_str();
    let ram = product.variant.ram.as_str();
    if rules.is_single_tier(base) || ram.is_empty() {
        slugify(&format!("{base} {storage}"))
    } else {
        slugify(&format!("{base} {ram} {storage}"))
    }
}

/// Price for `storage` from the product's `prices` map, falling back to the
/// effective discount price when the tier is not listed.
#[must_use]
pub fn active_price(product: &Product, storage: &str) -> i64 {
    product
        .prices
        .get(storage)
        .copied()
        .unwrap_or_else(|| product.effective_discount_price())
}

/// Everything the detail view shows for one selected variant, computed in a
/// single step so name, price, and specs can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub product_id: String,
    pub storage: String,
    pub display_name: String,
    pub price: i64,
    pub original_price: i64,
    pub specs: ProductSpecs,
    pub slug: String,
    /// Client route of the selected variant's own detail page.
    pub navigate_to: String,
}

/// Resolves `product` at `storage` without consulting siblings.
#[must_use]
pub fn resolve(product: &Product, storage: &str, rules: &CatalogRules) -> Resolution {
    let slug = variant_slug(product, rules);
    let target = if product.link.is_empty() {
        slug.as_str()
    } else {
        product.link.as_str()
    };
    Resolution {
        product_id: product.id.clone(),
        storage: storage.to_string(),
        display_name: display_name(product, storage, rules),
        price: active_price(product, storage),
        original_price: product.original_price,
        specs: product.specs.clone(),
        navigate_to: detail_route(target),
        slug,
    }
}

/// Sibling listings sharing a `base_product_name`.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    base_product_name: String,
    single_tier: bool,
    members: Vec<Product>,
}

impl VariantGroup {
    /// Builds the group for `base_product_name` from a sibling list.
    ///
    /// Listings of other product lines are dropped (the backend's name filter
    /// is a substring match). Duplicate keys keep the first listing. Members
    /// are ordered by storage, then RAM, capacity.
    #[must_use]
    pub fn from_siblings(
        base_product_name: &str,
        siblings: Vec<Product>,
        rules: &CatalogRules,
    ) -> Self {
        let single_tier = rules.is_single_tier(base_product_name);
        let wanted = base_product_name.trim().to_lowercase();

        let mut group = Self {
            base_product_name: base_product_name.trim().to_string(),
            single_tier,
            members: Vec::with_capacity(siblings.len()),
        };

        for product in siblings {
            if product.base_product_name.trim().to_lowercase() != wanted {
                tracing::debug!(
                    id = %product.id,
                    base = %product.base_product_name,
                    "dropping sibling from another product line"
                );
                continue;
            }
            let key = group.key_of(&product);
            if group.members.iter().any(|m| group.key_of(m) == key) {
                tracing::debug!(id = %product.id, %key, "dropping duplicate variant");
                continue;
            }
            group.members.push(product);
        }

        group.members.sort_by(|a, b| {
            compare_capacity(&a.variant.storage, &b.variant.storage)
                .then_with(|| compare_capacity(&a.variant.ram, &b.variant.ram))
        });
        group
    }

    #[must_use]
    pub fn base_product_name(&self) -> &str {
        &self.base_product_name
    }

    #[must_use]
    pub fn is_single_tier(&self) -> bool {
        self.single_tier
    }

    #[must_use]
    pub fn members(&self) -> &[Product] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn key_of(&self, product: &Product) -> VariantKey {
        if self.single_tier {
            VariantKey::Storage(product.variant.storage.clone())
        } else {
            VariantKey::RamStorage {
                ram: product.variant.ram.clone(),
                storage: product.variant.storage.clone(),
            }
        }
    }

    /// Distinct storage labels offered by the group, smallest first.
    #[must_use]
    pub fn storage_options(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for m in &self.members {
            if !out.contains(&m.variant.storage.as_str()) {
                out.push(m.variant.storage.as_str());
            }
        }
        out
    }

    #[must_use]
    pub fn find(&self, key: &VariantKey) -> Option<&Product> {
        self.members.iter().find(|m| &self.key_of(m) == key)
    }

    /// First member (smallest RAM) offering `storage`.
    #[must_use]
    pub fn find_by_storage(&self, storage: &str) -> Option<&Product> {
        self.members.iter().find(|m| m.variant.storage == storage)
    }

    /// Resolves the listing for `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownStorageTier`] when no sibling offers
    /// `storage`; callers keep their current state in that case.
    pub fn select(&self, storage: &str, rules: &CatalogRules) -> Result<Resolution, CoreError> {
        let product =
            self.find_by_storage(storage)
                .ok_or_else(|| CoreError::UnknownStorageTier {
                    base_product_name: self.base_product_name.clone(),
                    storage: storage.to_string(),
                })?;
        Ok(resolve(product, storage, rules))
    }
}

#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;
