//! Cart, user profile, and address-lookup endpoints.

use phonestore_core::{LocationOption, Session};

use super::StorefrontClient;
use crate::error::ClientError;
use crate::types::{AddToCartRequest, UpdateAddressRequest, UserProfile};

impl StorefrontClient {
    /// `GET /provinces`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status, envelope, or decode failure.
    pub async fn provinces(&self) -> Result<Vec<LocationOption>, ClientError> {
        self.get_data(&["provinces"], &[], "provinces").await
    }

    /// `GET /districts/:province_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status, envelope, or decode failure.
    pub async fn districts(&self, province_code: &str) -> Result<Vec<LocationOption>, ClientError> {
        self.get_data(
            &["districts", province_code],
            &[],
            &format!("districts(province={province_code})"),
        )
        .await
    }

    /// `GET /wards/:DISTRICT_CODE`. The backend keys wards by upper-case
    /// district code, so the code is upper-cased here.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on network, status, envelope, or decode failure.
    pub async fn wards(&self, district_code: &str) -> Result<Vec<LocationOption>, ClientError> {
        let code = district_code.to_uppercase();
        self.get_data(&["wards", &code], &[], &format!("wards(district={code})"))
            .await
    }

    /// Adds a listing to the signed-in user's cart (`POST /cart/add`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Core`] wrapping `NotLoggedIn` when the session has no
    ///   user token. No request is sent.
    /// - [`ClientError::Api`] with the backend message if it rejects the item.
    /// - Any other [`ClientError`] on network or status failure.
    pub async fn add_to_cart(
        &self,
        session: &Session,
        product_id: &str,
        quantity: u32,
        formatted_name: &str,
    ) -> Result<(), ClientError> {
        let token = session.bearer("add items to the cart")?;
        let url = self.build_url(&["cart", "add"], &[]);
        let request = self
            .client
            .post(url.clone())
            .bearer_auth(token)
            .json(&AddToCartRequest {
                product_id,
                quantity,
                formatted_name,
            });
        let body = self.send_json(request, &url).await?;
        Self::check_success(&body)?;
        tracing::info!(product_id, formatted_name, quantity, "added to cart");
        Ok(())
    }

    /// Fetches the signed-in user's profile (`GET /users/profile/:id`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Core`] wrapping `NotLoggedIn` without token and user id.
    /// - Any other [`ClientError`] on network, status, or decode failure.
    pub async fn get_profile(&self, session: &Session) -> Result<UserProfile, ClientError> {
        let (token, user_id) = session.require_user("view your profile")?;
        let url = self.build_url(&["users", "profile", user_id], &[]);
        let body = self
            .send_json(self.client.get(url.clone()).bearer_auth(token), &url)
            .await?;
        Self::unwrap_envelope(body, &format!("users/profile(id={user_id})"))
    }

    /// Replaces the shipping address (`PUT /users/profile/:id/address`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Core`] wrapping `NotLoggedIn` without token and user id.
    /// - Any other [`ClientError`] on network or status failure.
    pub async fn update_address(&self, session: &Session, address: &str) -> Result<(), ClientError> {
        let (token, user_id) = session.require_user("update your address")?;
        let url = self.build_url(&["users", "profile", user_id, "address"], &[]);
        let request = self
            .client
            .put(url.clone())
            .bearer_auth(token)
            .json(&UpdateAddressRequest { address });
        let body = self.send_json(request, &url).await?;
        Self::check_success(&body)
    }
}
