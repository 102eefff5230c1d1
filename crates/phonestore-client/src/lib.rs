//! Async client for the phone storefront REST API, plus the controllers that
//! drive the product detail, comparison, address, and admin news views.

pub mod address;
pub mod client;
pub mod compare;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod news_manager;
pub mod normalize;
pub mod types;

pub use address::AddressCascade;
pub use client::StorefrontClient;
pub use compare::{add_to_comparison, resolve_comparison, ResolvedComparison};
pub use debounce::Debouncer;
pub use detail::{ProductDetailView, CART_ROUTE};
pub use error::ClientError;
pub use news_manager::NewsManager;
pub use normalize::{normalize_product, normalize_specs};
pub use types::UserProfile;
