//! Main user directory client.

use crate::error::{ClientError, Result};
use crate::service::UserService;
use crate::types::ClientConfig;
use crate::users::UsersClient;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;
use userdir_core::{User, UserDraft, UserId, UserPatch};

/// Client for the user directory REST service.
///
/// # Example
///
/// ```ignore
/// use userdir_client::{ClientConfig, UserDirClient, UserService};
///
/// let client = UserDirClient::new(ClientConfig::new("http://localhost:8080"))?;
/// let users = client.list().await?;
/// println!("Found {} users", users.len());
/// ```
#[derive(Debug, Clone)]
pub struct UserDirClient {
    http: Client,
    base_url: String,
}

impl UserDirClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("userdir/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(base_url = %base_url, "User directory client ready");

        Ok(Self { http, base_url })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the users resource client.
    pub fn users(&self) -> UsersClient<'_> {
        UsersClient::new(&self.http, &self.base_url)
    }

    /// Absolute URL of a server-relative photo path such as `/uploads/1_me.jpg`.
    pub fn photo_url(&self, photo_path: &str) -> String {
        if photo_path.starts_with("http://") || photo_path.starts_with("https://") {
            photo_path.to_string()
        } else {
            format!("{}/{}", self.base_url, photo_path.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl UserService for UserDirClient {
    async fn list(&self) -> Result<Vec<User>> {
        self.users().list().await
    }

    async fn get(&self, id: UserId) -> Result<User> {
        self.users().get(id).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<User> {
        self.users().create(draft).await
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        self.users().update(id, patch).await
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.users().delete(id).await
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Url::parse(trimmed).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    Ok(trimmed.trim_end_matches('/').to_string())
}
