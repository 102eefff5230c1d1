//! Admin news endpoints. Every call needs the admin bearer token.

use chrono::Utc;
use reqwest::multipart::{Form, Part};

use phonestore_core::{NewsDraft, NewsItem, SaveAction, Session};

use super::StorefrontClient;
use crate::error::ClientError;
use crate::types::{NewsListBody, UploadResponse};

impl StorefrontClient {
    /// Lists all news items (`GET /admin/news`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Core`] wrapping `NotLoggedIn` without an admin token.
    /// - Any other [`ClientError`] on network, status, or decode failure.
    pub async fn list_news(&self, session: &Session) -> Result<Vec<NewsItem>, ClientError> {
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news"], &[]);
        let body = self
            .send_json(self.client.get(url.clone()).bearer_auth(token), &url)
            .await?;
        let list: NewsListBody =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: "admin/news".to_string(),
                source: e,
            })?;
        match list {
            NewsListBody::Bare(items) => Ok(items),
            NewsListBody::Wrapped(envelope) if envelope.success => {
                Ok(envelope.data.unwrap_or_default())
            }
            NewsListBody::Wrapped(envelope) => Err(ClientError::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
            }),
        }
    }

    /// Searches news by free text (`GET /admin/news/search?query=`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::list_news`].
    pub async fn search_news(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<Vec<NewsItem>, ClientError> {
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news", "search"], &[("query", query)]);
        let body = self
            .send_json(self.client.get(url.clone()).bearer_auth(token), &url)
            .await?;
        Self::unwrap_envelope(body, &format!("admin/news/search(query={query})"))
    }

    /// Creates a news item (`POST /admin/news`).
    ///
    /// # Errors
    ///
    /// - [`ClientError::Core`] if the draft is incomplete or no admin token is
    ///   present. No request is sent in either case.
    /// - Any other [`ClientError`] on network or status failure.
    pub async fn create_news(&self, session: &Session, draft: &NewsDraft) -> Result<(), ClientError> {
        draft.validate()?;
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news"], &[]);
        let request = self
            .client
            .post(url.clone())
            .bearer_auth(token)
            .json(&draft.stamped(Utc::now()));
        let body = self.send_json(request, &url).await?;
        Self::check_success(&body)?;
        tracing::info!(title = %draft.title.trim(), "news item created");
        Ok(())
    }

    /// Updates an existing news item (`PUT /admin/news/:id`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::create_news`].
    pub async fn update_news(
        &self,
        session: &Session,
        id: &str,
        draft: &NewsDraft,
    ) -> Result<(), ClientError> {
        draft.validate()?;
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news", id], &[]);
        let request = self
            .client
            .put(url.clone())
            .bearer_auth(token)
            .json(&draft.stamped(Utc::now()));
        let body = self.send_json(request, &url).await?;
        Self::check_success(&body)?;
        tracing::info!(id, "news item updated");
        Ok(())
    }

    /// Creates or updates depending on whether the draft carries an id.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::create_news`].
    pub async fn save_news(&self, session: &Session, draft: &NewsDraft) -> Result<(), ClientError> {
        match draft.save_action() {
            SaveAction::Create => self.create_news(session, draft).await,
            SaveAction::Update(id) => self.update_news(session, &id, draft).await,
        }
    }

    /// Deletes a news item (`DELETE /admin/news/:id`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::list_news`].
    pub async fn delete_news(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news", id], &[]);
        let body = self
            .send_json(self.client.delete(url.clone()).bearer_auth(token), &url)
            .await?;
        Self::check_success(&body)?;
        tracing::info!(id, "news item deleted");
        Ok(())
    }

    /// Uploads a cover image as multipart field `image` and returns the
    /// stored path (`POST /admin/news/upload`).
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::list_news`].
    pub async fn upload_news_image(
        &self,
        session: &Session,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ClientError> {
        let token = session.admin_bearer("manage news")?;
        let url = self.build_url(&["admin", "news", "upload"], &[]);
        let form = Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()));
        let body = self
            .send_json(
                self.client.post(url.clone()).bearer_auth(token).multipart(form),
                &url,
            )
            .await?;
        Self::check_success(&body)?;
        let upload: UploadResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: "admin/news/upload".to_string(),
                source: e,
            })?;
        Ok(upload.image_path)
    }
}
