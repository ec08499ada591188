//! Object-safe boundary between the state store and the remote service.

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use userdir_core::{User, UserDraft, UserId, UserPatch};

/// CRUD operations on the remote user resource.
///
/// Each call issues exactly one request. No retries, no caching.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch every user.
    async fn list(&self) -> Result<Vec<User>>;

    /// Fetch a single user by ID.
    async fn get(&self, id: UserId) -> Result<User>;

    /// Create a user from a draft, uploading its photo if present.
    async fn create(&self, draft: &UserDraft) -> Result<User>;

    /// Apply partial changes and return the full updated record.
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User>;

    /// Delete a user by ID.
    async fn delete(&self, id: UserId) -> Result<()>;
}

#[async_trait]
impl<T: UserService + ?Sized> UserService for Arc<T> {
    async fn list(&self) -> Result<Vec<User>> {
        (**self).list().await
    }

    async fn get(&self, id: UserId) -> Result<User> {
        (**self).get(id).await
    }

    async fn create(&self, draft: &UserDraft) -> Result<User> {
        (**self).create(draft).await
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        (**self).delete(id).await
    }
}
