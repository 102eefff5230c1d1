//! Product detail controller: variant selection and cart actions.

use phonestore_core::variant::resolve;
use phonestore_core::{
    CatalogRules, CoreError, Notice, Product, Resolution, Session, Severity, VariantGroup,
};

use crate::client::StorefrontClient;
use crate::error::ClientError;

/// Route shown after a successful "buy now".
pub const CART_ROUTE: &str = "/cart";

/// A loaded product page with its sibling variants and current selection.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    rules: CatalogRules,
    product: Product,
    group: VariantGroup,
    current: Resolution,
}

impl ProductDetailView {
    /// Fetches the listing for `slug` and its siblings.
    ///
    /// A failed sibling lookup is logged and leaves a single-variant group;
    /// only the detail request itself is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the detail request fails.
    pub async fn load(
        client: &StorefrontClient,
        slug: &str,
        rules: CatalogRules,
    ) -> Result<Self, ClientError> {
        let product = client.get_product_detail(slug).await?;
        let siblings = match client.list_products_by_name(&product.base_product_name).await {
            Ok(siblings) => siblings,
            Err(e) => {
                tracing::warn!(
                    base = %product.base_product_name,
                    error = %e,
                    "failed to fetch other versions"
                );
                Vec::new()
            }
        };
        Ok(Self::from_parts(product, siblings, rules))
    }

    /// Builds the view from already-fetched data.
    ///
    /// The loaded listing always belongs to its own group, whether or not the
    /// sibling list contains it. The initial selection is its own storage
    /// tier, or the first advertised memory option when it has none.
    #[must_use]
    pub fn from_parts(product: Product, siblings: Vec<Product>, rules: CatalogRules) -> Self {
        let mut members = Vec::with_capacity(siblings.len() + 1);
        members.push(product.clone());
        members.extend(siblings.into_iter().filter(|s| s.id != product.id));
        let group = VariantGroup::from_siblings(&product.base_product_name, members, &rules);

        let storage = if product.variant.storage.is_empty() {
            product.memory_options.first().cloned().unwrap_or_default()
        } else {
            product.variant.storage.clone()
        };
        let current = resolve(&product, &storage, &rules);

        Self {
            rules,
            product,
            group,
            current,
        }
    }

    /// The listing the page was opened with.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub fn group(&self) -> &VariantGroup {
        &self.group
    }

    #[must_use]
    pub fn current(&self) -> &Resolution {
        &self.current
    }

    /// Storage tiers offered by the product line, smallest first.
    #[must_use]
    pub fn storage_options(&self) -> Vec<&str> {
        self.group.storage_options()
    }

    /// Switches to the sibling offering `storage`.
    ///
    /// Name, price, specs, and route change together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownStorageTier`] when no sibling offers
    /// `storage`; the current selection is kept.
    pub fn select_storage(&mut self, storage: &str) -> Result<&Resolution, CoreError> {
        match self.group.select(storage, &self.rules) {
            Ok(resolution) => {
                self.current = resolution;
                Ok(&self.current)
            }
            Err(e) => {
                tracing::warn!(
                    base = %self.group.base_product_name(),
                    storage,
                    "storage tier not offered; keeping current selection"
                );
                Err(e)
            }
        }
    }

    /// Adds the selected variant to the cart under its display name.
    pub async fn add_to_cart(&self, client: &StorefrontClient, session: &Session) -> Notice {
        match client
            .add_to_cart(
                session,
                &self.current.product_id,
                1,
                &self.current.display_name,
            )
            .await
        {
            Ok(()) => Notice::success(
                "Added to cart",
                format!("{} was added to your cart", self.current.display_name),
            ),
            Err(e) => {
                tracing::error!(
                    product_id = %self.current.product_id,
                    error = %e,
                    "add to cart failed"
                );
                Notice::from(&e)
            }
        }
    }

    /// Adds to cart, then returns [`CART_ROUTE`] when that succeeded.
    pub async fn buy_now(
        &self,
        client: &StorefrontClient,
        session: &Session,
    ) -> (Notice, Option<&'static str>) {
        let notice = self.add_to_cart(client, session).await;
        let route = (notice.severity == Severity::Success).then_some(CART_ROUTE);
        (notice, route)
    }
}
