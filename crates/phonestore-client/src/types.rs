//! Storefront REST API wire types.
//!
//! Every endpoint except the admin news list wraps its payload in a
//! `{"success": bool, "data": ..., "message": ...}` envelope; [`ApiEnvelope`]
//! captures that pattern generically. Product payloads carry technical specs in
//! two layouts (flat keys or nested `camera` / `display` / `battery` groups),
//! both modelled here and reconciled in [`crate::normalize`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use phonestore_core::NewsItem;

/// Top-level envelope for storefront API responses.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A product record as returned by `/products/detail/:slug`, `/products`,
/// `/products/search`, and `/products/hot`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_product_name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub trademark: Option<String>,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub prices: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub memory_options: Vec<String>,
    #[serde(default)]
    pub ram_options: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub color_options: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Single-image listings from the hot-products endpoint.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specs: RawSpecs,
    /// Older listings keep their nested specs here instead of under `specs`.
    #[serde(default)]
    pub product_details: Option<RawSpecs>,
    #[serde(default)]
    pub variant: Option<RawVariant>,
    #[serde(default)]
    pub rating: Option<RawRating>,
    #[serde(default)]
    pub meta: Option<String>,
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default, alias = "special_features")]
    pub special_features: Vec<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub shipping_info: Option<String>,
}

/// Union of the flat and nested spec shapes. Every field is optional; the
/// normalizer picks the first non-empty source per spec key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecs {
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub gpu: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub rear_camera: Option<String>,
    #[serde(default)]
    pub front_camera: Option<String>,
    #[serde(default)]
    pub screen_tech: Option<String>,
    #[serde(default)]
    pub screen_size: Option<String>,
    #[serde(default)]
    pub refresh_rate: Option<String>,
    #[serde(default)]
    pub brightness: Option<String>,
    /// A plain capacity string in the flat shape, an object in the nested one.
    #[serde(default)]
    pub battery: Option<BatteryField>,
    #[serde(default)]
    pub charging: Option<String>,
    #[serde(default)]
    pub camera: Option<RawCamera>,
    #[serde(default)]
    pub display: Option<RawDisplay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatteryField {
    Flat(String),
    Nested(RawBattery),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCamera {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub front: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDisplay {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default, alias = "refreshRate")]
    pub refresh_rate: Option<String>,
    #[serde(default)]
    pub brightness: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBattery {
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub charging: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVariant {
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRating {
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Cart / profile
// ---------------------------------------------------------------------------

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
    pub formatted_name: &'a str,
}

/// Body of `PUT /users/profile/:id/address`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAddressRequest<'a> {
    pub address: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// `data` of `GET /reviews/product/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductReviews {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    #[serde(default)]
    pub stats: Option<RawReviewStats>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Populated author document.
    #[serde(default, rename = "user_id")]
    pub user_id: Option<RawReviewAuthor>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewAuthor {
    #[serde(default)]
    pub name: String,
}

/// Server-side star distribution, keyed `"1"` through `"5"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewStats {
    #[serde(default, rename = "1")]
    pub one: u32,
    #[serde(default, rename = "2")]
    pub two: u32,
    #[serde(default, rename = "3")]
    pub three: u32,
    #[serde(default, rename = "4")]
    pub four: u32,
    #[serde(default, rename = "5")]
    pub five: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub average: f64,
}

// ---------------------------------------------------------------------------
// Admin news
// ---------------------------------------------------------------------------

/// `GET /admin/news` answers with a bare array; newer deployments wrap it in
/// the usual envelope. Both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NewsListBody {
    Bare(Vec<NewsItem>),
    Wrapped(ApiEnvelope<Vec<NewsItem>>),
}

/// Response of `POST /admin/news/upload`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_path: String,
}
