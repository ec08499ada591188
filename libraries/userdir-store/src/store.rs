//! User state store - the canonical in-memory user list
//!
//! Every mutation of the list happens after the corresponding remote call
//! has succeeded. The lock is never held across a request, so operations on
//! different users may be in flight at the same time; the list reflects
//! responses in the order they arrive.

use crate::error::{Result, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use userdir_client::UserService;
use userdir_core::{User, UserDraft, UserId, UserPatch};

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    last_error: Option<String>,
}

/// Canonical user list plus loading and error state.
pub struct UserStore<S> {
    service: S,
    state: RwLock<StoreState>,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter however the operation ends
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S: UserService> UserStore<S> {
    /// Create an empty store backed by `service`
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(StoreState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// The remote service this store talks to
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Replace the local list with the server's.
    ///
    /// On failure the previous list is kept and the error message stored.
    /// Returns the number of users fetched.
    pub async fn fetch_all(&self) -> Result<usize> {
        let _loading = LoadingGuard::start(&self.in_flight);
        debug!("Refreshing user list");

        match self.service.list().await {
            Ok(users) => {
                let count = users.len();
                if let Some(position) = users.iter().position(|u| u.id.is_none()) {
                    warn!(position, "Server listed a user without an id");
                    return Err(self.fail(StoreError::MissingId).await);
                }

                let mut state = self.state.write().await;
                state.users = users;
                state.last_error = None;

                debug!(count, "User list replaced");
                Ok(count)
            }
            Err(e) => Err(self.fail(e.into()).await),
        }
    }

    /// Create a user and append the server's record.
    pub async fn create(&self, draft: &UserDraft) -> Result<User> {
        let _loading = LoadingGuard::start(&self.in_flight);

        let created = match self.service.create(draft).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e.into()).await),
        };

        if created.id.is_none() {
            return Err(self.fail(StoreError::MissingId).await);
        }

        let mut state = self.state.write().await;
        state.users.push(created.clone());
        state.last_error = None;

        info!(user_id = ?created.id, total = state.users.len(), "User added to store");
        Ok(created)
    }

    /// Send partial changes and swap in the server's full record.
    ///
    /// The returned record must carry `id`. If `id` is not in the local list
    /// the list is left as is.
    pub async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User> {
        let _loading = LoadingGuard::start(&self.in_flight);

        let updated = match self.service.update(id, patch).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e.into()).await),
        };

        if updated.id != Some(id) {
            warn!(user_id = %id, returned = ?updated.id, "Server returned a record for another id");
            return Err(self.fail(StoreError::MissingId).await);
        }

        let mut state = self.state.write().await;
        let mut replaced = 0;
        for user in state.users.iter_mut().filter(|u| u.id == Some(id)) {
            *user = updated.clone();
            replaced += 1;
        }
        state.last_error = None;

        if replaced == 0 {
            debug!(user_id = %id, "Updated user not present locally");
        } else {
            info!(user_id = %id, "User replaced in store");
        }
        Ok(updated)
    }

    /// Delete a user and drop it from the local list.
    pub async fn delete(&self, id: UserId) -> Result<()> {
        let _loading = LoadingGuard::start(&self.in_flight);

        if let Err(e) = self.service.delete(id).await {
            return Err(self.fail(e.into()).await);
        }

        let mut state = self.state.write().await;
        let before = state.users.len();
        state.users.retain(|u| u.id != Some(id));
        state.last_error = None;

        info!(user_id = %id, removed = before - state.users.len(), "User removed from store");
        Ok(())
    }

    /// Snapshot of the current list
    pub async fn users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    /// Look up a user in the local list
    pub async fn find(&self, id: UserId) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == Some(id))
            .cloned()
    }

    /// Number of users held locally
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Whether the local list is empty
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.users.is_empty()
    }

    /// Whether any operation is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message of the most recent failure, cleared by the next success
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Forget the stored error
    pub async fn clear_error(&self) {
        self.state.write().await.last_error = None;
    }

    async fn fail(&self, error: StoreError) -> StoreError {
        warn!(error = %error, "Store operation failed");
        self.state.write().await.last_error = Some(error.to_string());
        error
    }
}
