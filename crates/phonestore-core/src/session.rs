use crate::app_config::AppConfig;
use crate::CoreError;

/// Credentials for the current user and, separately, the current admin.
///
/// Passed explicitly to every operation that needs auth; nothing reads
/// tokens from ambient storage.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<String>,
    admin_token: Option<String>,
    user_id: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field(
                "admin_token",
                &self.admin_token.as_ref().map(|_| "[redacted]"),
            )
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            token: config.token.clone(),
            admin_token: config.admin_token.clone(),
            user_id: config.user_id.clone(),
        }
    }

    #[must_use]
    pub fn with_user(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_admin(mut self, admin_token: impl Into<String>) -> Self {
        self.admin_token = Some(admin_token.into());
        self
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// User bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoggedIn`] naming `action` when absent.
    pub fn bearer(&self, action: &'static str) -> Result<&str, CoreError> {
        self.token
            .as_deref()
            .ok_or(CoreError::NotLoggedIn { action })
    }

    /// Admin bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoggedIn`] naming `action` when absent.
    pub fn admin_bearer(&self, action: &'static str) -> Result<&str, CoreError> {
        self.admin_token
            .as_deref()
            .ok_or(CoreError::NotLoggedIn { action })
    }

    /// Token and user id together, for profile endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotLoggedIn`] unless both are present.
    pub fn require_user(&self, action: &'static str) -> Result<(&str, &str), CoreError> {
        match (self.token.as_deref(), self.user_id.as_deref()) {
            (Some(token), Some(user_id)) => Ok((token, user_id)),
            _ => Err(CoreError::NotLoggedIn { action }),
        }
    }
}
