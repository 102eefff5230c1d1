//! Rebuilds a comparison set from a `/products/compare/...` route.

use futures::future::join_all;

use phonestore_core::comparison::split_path;
use phonestore_core::{CatalogRules, ComparisonSet, CoreError, Notice, MAX_COMPARED};

use crate::client::StorefrontClient;

/// Result of resolving a comparison route.
#[derive(Debug, Clone)]
pub struct ResolvedComparison {
    pub set: ComparisonSet,
    /// Slugs that could not be fetched, in route order.
    pub dropped: Vec<String>,
    /// Warnings raised while adding, e.g. two slugs naming one product.
    pub notices: Vec<Notice>,
}

/// Fetches the product behind `slug` and adds it to `set`.
///
/// Every outcome is a notice: success, a warning when the set is full or
/// already holds the product, or an error when the fetch fails. The set is
/// unchanged unless the add succeeded.
pub async fn add_to_comparison(
    client: &StorefrontClient,
    set: &mut ComparisonSet,
    slug: &str,
) -> Notice {
    if set.len() >= MAX_COMPARED {
        // Skip the fetch; the set would reject the product anyway.
        return Notice::from(&CoreError::ComparisonFull { max: MAX_COMPARED });
    }
    let product = match client.get_product_detail(slug).await {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(slug, error = %e, "could not load product for comparison");
            return Notice::from(&e);
        }
    };
    match set.add(product) {
        Ok(notice) => notice,
        Err(e) => {
            tracing::warn!(slug, error = %e, "product not added to comparison");
            Notice::from(&e)
        }
    }
}

/// Fetches every slug in `path` concurrently and adds them in route order.
///
/// Unresolvable slugs are logged and dropped; duplicates are rejected by the
/// set itself and reported as notices. Never fails as a whole.
pub async fn resolve_comparison(
    client: &StorefrontClient,
    path: &str,
    rules: CatalogRules,
) -> ResolvedComparison {
    let slugs = split_path(path);
    let fetched = join_all(slugs.iter().map(|slug| client.get_product_detail(slug))).await;

    let mut resolved = ResolvedComparison {
        set: ComparisonSet::new(rules),
        dropped: Vec::new(),
        notices: Vec::new(),
    };

    for (slug, result) in slugs.into_iter().zip(fetched) {
        match result {
            Ok(product) => {
                if let Err(e) = resolved.set.add(product) {
                    tracing::warn!(slug = %slug, error = %e, "skipping comparison entry");
                    resolved.notices.push(Notice::from(&e));
                }
            }
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "dropping unresolvable comparison slug");
                resolved.dropped.push(slug);
            }
        }
    }
    resolved
}
