//! The side-by-side comparison set: at most three distinct products, kept in
//! insertion order and mirrored into a `slug-vs-slug` URL path so the set can
//! be rebuilt after a reload.

use std::str::FromStr;

use serde::Serialize;

use crate::catalog::CatalogRules;
use crate::notice::Notice;
use crate::product::Product;
use crate::variant::variant_slug;
use crate::CoreError;

/// Maximum number of products in a comparison.
pub const MAX_COMPARED: usize = 3;

/// Literal separator between slugs in a comparison path.
pub const PATH_SEPARATOR: &str = "-vs-";

/// Route prefix of the comparison page.
pub const COMPARE_ROUTE: &str = "/products/compare/";

/// A comparable attribute of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareField {
    Price,
    Os,
    Cpu,
    Gpu,
    Ram,
    Storage,
    RearCamera,
    FrontCamera,
    ScreenTech,
    ScreenSize,
    RefreshRate,
    Brightness,
    Battery,
    Charging,
}

impl CompareField {
    /// All fields in display order.
    pub const ALL: [CompareField; 14] = [
        CompareField::Price,
        CompareField::Os,
        CompareField::Cpu,
        CompareField::Gpu,
        CompareField::Ram,
        CompareField::Storage,
        CompareField::RearCamera,
        CompareField::FrontCamera,
        CompareField::ScreenTech,
        CompareField::ScreenSize,
        CompareField::RefreshRate,
        CompareField::Brightness,
        CompareField::Battery,
        CompareField::Charging,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            CompareField::Price => "price",
            CompareField::Os => "os",
            CompareField::Cpu => "cpu",
            CompareField::Gpu => "gpu",
            CompareField::Ram => "ram",
            CompareField::Storage => "storage",
            CompareField::RearCamera => "rearCamera",
            CompareField::FrontCamera => "frontCamera",
            CompareField::ScreenTech => "screenTech",
            CompareField::ScreenSize => "screenSize",
            CompareField::RefreshRate => "refreshRate",
            CompareField::Brightness => "brightness",
            CompareField::Battery => "battery",
            CompareField::Charging => "charging",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompareField::Price => "Price",
            CompareField::Os => "Operating system",
            CompareField::Cpu => "CPU",
            CompareField::Gpu => "GPU",
            CompareField::Ram => "RAM",
            CompareField::Storage => "Storage",
            CompareField::RearCamera => "Rear camera",
            CompareField::FrontCamera => "Front camera",
            CompareField::ScreenTech => "Screen technology",
            CompareField::ScreenSize => "Screen size",
            CompareField::RefreshRate => "Refresh rate",
            CompareField::Brightness => "Brightness",
            CompareField::Battery => "Battery",
            CompareField::Charging => "Charging",
        }
    }

    /// The field's value for `product`, as displayed.
    #[must_use]
    pub fn value(self, product: &Product) -> String {
        let specs = &product.specs;
        match self {
            CompareField::Price => product.effective_discount_price().to_string(),
            CompareField::Os => specs.os.clone(),
            CompareField::Cpu => specs.cpu.clone(),
            CompareField::Gpu => specs.gpu.clone(),
            CompareField::Ram => specs.ram.clone(),
            CompareField::Storage => specs.storage.clone(),
            CompareField::RearCamera => specs.rear_camera.clone(),
            CompareField::FrontCamera => specs.front_camera.clone(),
            CompareField::ScreenTech => specs.screen_tech.clone(),
            CompareField::ScreenSize => specs.screen_size.clone(),
            CompareField::RefreshRate => specs.refresh_rate.clone(),
            CompareField::Brightness => specs.brightness.clone(),
            CompareField::Battery => specs.battery.clone(),
            CompareField::Charging => specs.charging.clone(),
        }
    }
}

impl FromStr for CompareField {
    type Err = String;

    /// Accepts the camelCase key or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('_', "").to_lowercase();
        CompareField::ALL
            .into_iter()
            .find(|f| f.key().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown comparison field \"{s}\""))
    }
}

/// Fill level of a [`ComparisonSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonState {
    Empty,
    Partial(usize),
    Full,
}

#[derive(Debug, Clone)]
pub struct ComparisonSet {
    rules: CatalogRules,
    products: Vec<Product>,
    slugs: Vec<String>,
}

impl ComparisonSet {
    #[must_use]
    pub fn new(rules: CatalogRules) -> Self {
        Self {
            rules,
            products: Vec::with_capacity(MAX_COMPARED),
            slugs: Vec::with_capacity(MAX_COMPARED),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    #[must_use]
    pub fn state(&self) -> ComparisonState {
        match self.products.len() {
            0 => ComparisonState::Empty,
            n if n >= MAX_COMPARED => ComparisonState::Full,
            n => ComparisonState::Partial(n),
        }
    }

    /// Appends `product`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::ComparisonFull`] when the set already holds
    ///   [`MAX_COMPARED`] products.
    /// - [`CoreError::AlreadyInComparison`] when a product with the same id
    ///   is present.
    ///
    /// The set is unchanged on error.
    pub fn add(&mut self, product: Product) -> Result<Notice, CoreError> {
        if self.products.len() >= MAX_COMPARED {
            return Err(CoreError::ComparisonFull { max: MAX_COMPARED });
        }
        if self.contains(&product.id) {
            return Err(CoreError::AlreadyInComparison { id: product.id });
        }
        let notice = Notice::success(
            "Added",
            format!("{} was added to the comparison", product.name),
        );
        self.products.push(product);
        self.refresh_slugs();
        Ok(notice)
    }

    /// Removes the product with `id`, if present.
    ///
    /// Returns an informational notice when exactly one product remains.
    pub fn remove(&mut self, id: &str) -> Option<Notice> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return None;
        }
        self.refresh_slugs();
        (self.products.len() == 1).then(|| {
            Notice::info(
                "Add another product",
                "Add at least one more product to compare",
            )
        })
    }

    /// `true` iff at least two products are present and one of them differs
    /// from the first in `field`.
    #[must_use]
    pub fn differs(&self, field: CompareField) -> bool {
        let Some((first, rest)) = self.products.split_first() else {
            return false;
        };
        let reference = field.value(first);
        rest.iter().any(|p| field.value(p) != reference)
    }

    /// Fields that differ, in display order. Empty for fewer than two products.
    #[must_use]
    pub fn differing_fields(&self) -> Vec<CompareField> {
        CompareField::ALL
            .into_iter()
            .filter(|f| self.differs(*f))
            .collect()
    }

    #[must_use]
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Slugs joined by [`PATH_SEPARATOR`].
    #[must_use]
    pub fn to_path(&self) -> String {
        self.slugs.join(PATH_SEPARATOR)
    }

    /// Full client route, e.g. `/products/compare/a-128gb-vs-b-8gb-256gb`.
    #[must_use]
    pub fn compare_route(&self) -> String {
        format!("{COMPARE_ROUTE}{}", self.to_path())
    }

    fn refresh_slugs(&mut self) {
        self.slugs = self
            .products
            .iter()
            .map(|p| variant_slug(p, &self.rules))
            .collect();
    }
}

/// Splits a comparison path into slugs.
///
/// Accepts the bare path or the full route. Empty segments are dropped.
/// Every slug is returned, even past [`MAX_COMPARED`]; the set rejects the
/// extras when they are added.
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let path = path.trim().trim_matches('/');
    let path = path
        .strip_prefix(COMPARE_ROUTE.trim_start_matches('/'))
        .unwrap_or(path);
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "comparison_test.rs"]
mod tests;
