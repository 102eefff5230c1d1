//! Product catalog endpoints.

use phonestore_core::{Product, ProductReviews};

use super::StorefrontClient;
use crate::error::ClientError;
use crate::normalize::{normalize_product, normalize_reviews};
use crate::types::{RawProduct, RawProductReviews};

impl StorefrontClient {
    /// Fetches one listing by its detail slug (`GET /products/detail/:slug`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if no listing has this slug.
    /// - [`ClientError::Api`] if the envelope reports failure.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the payload does not match.
    pub async fn get_product_detail(&self, slug: &str) -> Result<Product, ClientError> {
        let raw: RawProduct = self
            .get_data(
                &["products", "detail", slug],
                &[],
                &format!("products/detail(slug={slug})"),
            )
            .await?;
        Ok(normalize_product(raw))
    }

    /// Lists sibling variants by base name (`GET /products?name=`).
    ///
    /// The backend matches by substring; callers group the result with
    /// [`phonestore_core::VariantGroup::from_siblings`].
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::get_product_detail`].
    pub async fn list_products_by_name(&self, name: &str) -> Result<Vec<Product>, ClientError> {
        let raw: Vec<RawProduct> = self
            .get_data(&["products"], &[("name", name)], &format!("products(name={name})"))
            .await?;
        Ok(raw.into_iter().map(normalize_product).collect())
    }

    /// Free-text product search (`GET /products/search?query=`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::get_product_detail`].
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let raw: Vec<RawProduct> = self
            .get_data(
                &["products", "search"],
                &[("query", query)],
                &format!("products/search(query={query})"),
            )
            .await?;
        Ok(raw.into_iter().map(normalize_product).collect())
    }

    /// Featured listings offered as comparison candidates (`GET /products/hot`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::get_product_detail`].
    pub async fn hot_products(&self) -> Result<Vec<Product>, ClientError> {
        let raw: Vec<RawProduct> = self.get_data(&["products", "hot"], &[], "products/hot").await?;
        Ok(raw.into_iter().map(normalize_product).collect())
    }

    /// Reviews and star distribution for a product (`GET /reviews/product/:id`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::get_product_detail`].
    pub async fn product_reviews(&self, product_id: &str) -> Result<ProductReviews, ClientError> {
        let raw: RawProductReviews = self
            .get_data(
                &["reviews", "product", product_id],
                &[],
                &format!("reviews/product(id={product_id})"),
            )
            .await?;
        Ok(normalize_reviews(raw))
    }
}
