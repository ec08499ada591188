//! User resource operations.

use crate::error::{ClientError, Result};
use crate::types::USERS_PATH;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use userdir_core::{Photo, User, UserDraft, UserId, UserPatch};

/// Client for `/api/users`.
pub struct UsersClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UsersClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, USERS_PATH)
    }

    fn item_url(&self, id: UserId) -> String {
        format!("{}{}/{}", self.base_url, USERS_PATH, id)
    }

    /// Get every user.
    pub async fn list(&self) -> Result<Vec<User>> {
        let url = self.collection_url();
        debug!(url = %url, "Fetching users");

        let response = send(self.http.get(&url)).await?;
        let users: Vec<User> = parse_json(response, "user list").await?;

        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Get a single user by ID.
    pub async fn get(&self, id: UserId) -> Result<User> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = %id, "Fetching user");

        let response = send(self.http.get(&url)).await.map_err(|e| match e {
            ClientError::ServerError { status: 404, .. } => ClientError::ServerError {
                status: 404,
                message: format!("User not found: {}", id),
            },
            other => other,
        })?;

        parse_json(response, "user").await
    }

    /// Create a user.
    ///
    /// Sent as multipart: the draft JSON in the `user` part and the photo,
    /// when present, in the `photo` part.
    pub async fn create(&self, draft: &UserDraft) -> Result<User> {
        let url = self.collection_url();
        let form = user_form(draft.metadata_json()?, draft.photo.as_ref())?;

        debug!(
            url = %url,
            name = %draft.name,
            has_photo = draft.photo.is_some(),
            "Creating user"
        );

        let response = send(self.http.post(&url).multipart(form)).await?;
        let user: User = parse_json(response, "created user").await?;

        info!(
            user_id = ?user.id,
            photo_url = ?user.photo_url,
            "User created"
        );

        Ok(user)
    }

    /// Update a user with partial changes.
    ///
    /// Plain JSON unless the patch carries a new photo, in which case the
    /// same `user`/`photo` multipart layout as create is used.
    pub async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = %id, has_photo = patch.photo.is_some(), "Updating user");

        let request = match &patch.photo {
            Some(photo) => {
                let form = user_form(patch.metadata_json()?, Some(photo))?;
                self.http.put(&url).multipart(form)
            }
            None => self.http.put(&url).json(patch),
        };

        let response = send(request).await?;
        let user: User = parse_json(response, "updated user").await?;

        info!(user_id = %id, "User updated");
        Ok(user)
    }

    /// Delete a user.
    pub async fn delete(&self, id: UserId) -> Result<()> {
        let url = self.item_url(id);
        debug!(url = %url, user_id = %id, "Deleting user");

        send(self.http.delete(&url)).await?;

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn user_form(metadata: String, photo: Option<&Photo>) -> Result<Form> {
    let mut form = Form::new().text("user", metadata);

    if let Some(photo) = photo {
        let part = Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(&photo.content_type)?;
        form = form.part("photo", part);
    }

    Ok(form)
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(transport_error)?;

    check_status(response).await
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

// Non-2xx bodies are kept as plain text, never parsed
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(ClientError::ServerError {
        status: status.as_u16(),
        message: error_text,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
