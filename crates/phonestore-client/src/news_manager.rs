//! Admin news list controller: debounced search, save, and confirmed delete.
//!
//! Every list update carries a ticket from a shared counter. A response is
//! applied only if no newer list update started after it, so a slow search
//! can never overwrite the results of a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use phonestore_core::{NewsDraft, NewsItem, Notice, Session};

use crate::client::StorefrontClient;
use crate::debounce::Debouncer;
use crate::error::ClientError;

#[derive(Debug, Default)]
struct ListState {
    /// Last full list fetched; shown again when the search box is cleared.
    all: Vec<NewsItem>,
    items: Vec<NewsItem>,
    query: String,
    notice: Option<Notice>,
}

/// Shared between the manager and its debounced search tasks.
#[derive(Debug)]
struct Shared {
    client: StorefrontClient,
    session: Session,
    state: Mutex<ListState>,
    latest: AtomicU64,
}

impl Shared {
    fn state(&self) -> std::sync::MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_ticket(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Fetches the full list and applies it if still current.
    async fn load_all(&self, ticket: u64) {
        let result = self.client.list_news(&self.session).await;
        if !self.is_current(ticket) {
            tracing::debug!(ticket, "discarding superseded news list");
            return;
        }
        let mut state = self.state();
        state.query.clear();
        match result {
            Ok(items) => {
                state.all.clone_from(&items);
                state.items = items;
                state.notice = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "loading news list failed");
                state.items.clear();
                state.notice = Some(Notice::from(&e));
            }
        }
    }

    /// Runs a search and applies the outcome if still current.
    ///
    /// Blank input sends nothing: the cached full list is shown instead.
    async fn search(&self, query: String, ticket: u64) {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.show_all(query, ticket);
            return;
        }
        let result = self.client.search_news(&self.session, trimmed).await;

        if !self.is_current(ticket) {
            tracing::debug!(query = %trimmed, ticket, "discarding superseded news response");
            return;
        }

        let mut state = self.state();
        state.query = query.clone();
        match result {
            Ok(items) => {
                state.items = items;
                state.notice = None;
            }
            Err(e) => {
                tracing::error!(query = %trimmed, error = %e, "news search failed");
                state.items.clear();
                state.notice = Some(Notice::from(&e));
            }
        }
    }

    fn show_all(&self, query: String, ticket: u64) {
        if !self.is_current(ticket) {
            return;
        }
        let mut state = self.state();
        state.items = state.all.clone();
        state.query = query;
        state.notice = None;
    }
}

/// State and actions behind the admin news page.
#[derive(Debug)]
pub struct NewsManager {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl NewsManager {
    #[must_use]
    pub fn new(client: StorefrontClient, session: Session, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                client,
                session,
                state: Mutex::new(ListState::default()),
                latest: AtomicU64::new(0),
            }),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Items currently shown.
    #[must_use]
    pub fn items(&self) -> Vec<NewsItem> {
        self.shared.state().items.clone()
    }

    /// The query the current items belong to; empty for the full list.
    #[must_use]
    pub fn query(&self) -> String {
        self.shared.state().query.clone()
    }

    /// Notice left by the last failed list request, if any.
    #[must_use]
    pub fn last_notice(&self) -> Option<Notice> {
        self.shared.state().notice.clone()
    }

    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Loads the full list now, superseding any list request in flight.
    pub async fn refresh(&self) {
        let ticket = self.shared.next_ticket();
        self.shared.load_all(ticket).await;
    }

    /// Runs a search immediately, bypassing the debounce delay.
    ///
    /// Blank text shows the last loaded full list without a request.
    pub async fn search_now(&self, text: &str) {
        let ticket = self.shared.next_ticket();
        self.shared.search(text.to_string(), ticket).await;
    }

    /// Drops a scheduled search that has not produced results yet.
    pub fn cancel_search(&mut self) -> bool {
        self.debouncer.cancel()
    }

    /// Keystroke handler: schedules a search for `text` once typing pauses.
    ///
    /// Clearing the box cancels any scheduled search and shows the cached
    /// full list right away; nothing is sent. Must be called from within a
    /// Tokio runtime.
    pub fn on_search_input(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.cancel_search();
            let ticket = self.shared.next_ticket();
            self.shared.show_all(text.to_string(), ticket);
            return;
        }
        let shared = Arc::clone(&self.shared);
        let text = text.to_string();
        self.debouncer.schedule(async move {
            let ticket = shared.next_ticket();
            shared.search(text, ticket).await;
        });
    }

    /// Validates and saves `draft`, then reloads the list.
    ///
    /// Incomplete drafts are reported without any request being sent.
    pub async fn save(&self, draft: &NewsDraft) -> Notice {
        if let Err(e) = draft.validate() {
            return Notice::from(&e);
        }
        match self.shared.client.save_news(&self.shared.session, draft).await {
            Ok(()) => {
                self.refresh().await;
                Notice::success("Saved", format!("\"{}\" was saved", draft.title.trim()))
            }
            Err(e) => {
                tracing::error!(error = %e, "saving news item failed");
                Notice::from(&e)
            }
        }
    }

    /// Deletes `id` after `confirm` approves it.
    ///
    /// Returns `None` when the confirmation is declined; no request is sent.
    pub async fn delete<F>(&self, id: &str, confirm: F) -> Option<Notice>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(id) {
            tracing::debug!(id, "news deletion declined");
            return None;
        }
        let notice = match self.shared.client.delete_news(&self.shared.session, id).await {
            Ok(()) => {
                self.refresh().await;
                Notice::success("Deleted", "The news item was deleted")
            }
            Err(e) => {
                tracing::error!(id, error = %e, "deleting news item failed");
                Notice::from(&e)
            }
        };
        Some(notice)
    }

    /// Uploads an image for the draft and stores the returned path on it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the upload fails; the draft is unchanged.
    pub async fn attach_image(
        &self,
        draft: &mut NewsDraft,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ClientError> {
        let path = self
            .shared
            .client
            .upload_news_image(&self.shared.session, file_name, bytes)
            .await?;
        draft.image = Some(path);
        Ok(())
    }
}
