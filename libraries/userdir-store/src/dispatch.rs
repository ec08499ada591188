//! Command dispatch
//!
//! UI events are expressed as `Command`s and run through a single
//! `Directory::dispatch`, which returns an `Outcome` carrying the effect and
//! the notice to show. Nothing here depends on a rendering environment.

use crate::error::{Result, StoreError};
use crate::notice::Notice;
use crate::store::UserStore;
use chrono::NaiveDate;
use tracing::{debug, warn};
use userdir_client::UserService;
use userdir_core::{
    facets, filter_users, Facets, FilterChange, FilterCriteria, User, UserDraft, UserId,
    UserPatch,
};

/// Something the user asked for
#[derive(Debug, Clone)]
pub enum Command {
    /// Reload the list from the server
    Refresh,
    /// Submit a new-user draft
    Create(UserDraft),
    /// Submit changes to an existing user
    Update {
        /// User to change
        id: UserId,
        /// Changed fields only
        patch: UserPatch,
    },
    /// Delete a user
    Delete(UserId),
    /// Change one filter criterion
    SetFilter(FilterChange),
    /// Reset every filter criterion
    ClearFilters,
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The list was reloaded
    Refreshed {
        /// Users now held
        count: usize,
    },
    /// The server's record for a new user
    Created(User),
    /// The server's record after an update
    Updated(User),
    /// The user that was removed
    Deleted(UserId),
    /// Criteria now in effect
    FiltersChanged(FilterCriteria),
}

/// Result of dispatching one command
#[derive(Debug)]
pub struct Outcome {
    /// What happened, or why it did not
    pub effect: Result<Effect>,
    /// Message to show, if any
    pub notice: Option<Notice>,
}

impl Outcome {
    fn ok(effect: Effect, notice: Option<Notice>) -> Self {
        Self {
            effect: Ok(effect),
            notice,
        }
    }

    fn failed(error: StoreError, message: &str) -> Self {
        let notice = Notice::error(format!("{}: {}", message, error));
        Self {
            effect: Err(error),
            notice: Some(notice),
        }
    }

    /// Whether the command succeeded
    pub fn is_ok(&self) -> bool {
        self.effect.is_ok()
    }
}

/// User store plus filter criteria, driven by commands.
pub struct Directory<S> {
    store: UserStore<S>,
    criteria: FilterCriteria,
    cleared: FilterCriteria,
    reference_date: Option<NaiveDate>,
}

impl<S: UserService> Directory<S> {
    /// Directory with default criteria
    pub fn new(store: UserStore<S>) -> Self {
        Self::with_criteria(store, FilterCriteria::default())
    }

    /// Start with `criteria`, which is also what `ClearFilters` restores
    pub fn with_criteria(store: UserStore<S>, criteria: FilterCriteria) -> Self {
        Self {
            store,
            cleared: criteria.clone(),
            criteria,
            reference_date: None,
        }
    }

    /// Compute ages against a fixed date instead of today
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// The underlying store
    pub fn store(&self) -> &UserStore<S> {
        &self.store
    }

    /// Criteria currently in effect
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Run one command to completion.
    ///
    /// Failures never panic or propagate; they come back as an `Outcome`
    /// with an error notice.
    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        debug!(command = ?command, "Dispatching");

        match command {
            Command::Refresh => match self.store.fetch_all().await {
                Ok(count) => Outcome::ok(Effect::Refreshed { count }, None),
                Err(e) => Outcome::failed(e, "Failed to load users"),
            },
            Command::Create(draft) => self.create(draft).await,
            Command::Update { id, patch } => self.update(id, patch).await,
            Command::Delete(id) => match self.store.delete(id).await {
                Ok(()) => Outcome::ok(
                    Effect::Deleted(id),
                    Some(Notice::success("User deleted successfully")),
                ),
                Err(e) => Outcome::failed(e, "Failed to delete user. Please try again"),
            },
            Command::SetFilter(change) => {
                self.criteria = std::mem::take(&mut self.criteria).apply(change);
                Outcome::ok(Effect::FiltersChanged(self.criteria.clone()), None)
            }
            Command::ClearFilters => {
                self.criteria = self.cleared.clone();
                Outcome::ok(
                    Effect::FiltersChanged(self.criteria.clone()),
                    Some(Notice::success("Filters cleared")),
                )
            }
        }
    }

    async fn create(&mut self, draft: UserDraft) -> Outcome {
        if let Err(e) = draft.validate() {
            return Outcome::failed(
                e.into(),
                "Please fill in all required fields and take a photo",
            );
        }

        match self.store.create(&draft).await {
            Ok(user) => {
                self.refresh_after_write().await;
                Outcome::ok(
                    Effect::Created(user),
                    Some(Notice::success("User created successfully")),
                )
            }
            Err(e) => Outcome::failed(e, "Failed to create user"),
        }
    }

    async fn update(&mut self, id: UserId, patch: UserPatch) -> Outcome {
        if patch.is_empty() {
            return Outcome::failed(StoreError::EmptyPatch, "Nothing to update");
        }
        if let Err(e) = patch.validate() {
            return Outcome::failed(e.into(), "Invalid changes");
        }

        match self.store.update(id, &patch).await {
            Ok(user) => {
                self.refresh_after_write().await;
                Outcome::ok(
                    Effect::Updated(user),
                    Some(Notice::success("User updated successfully")),
                )
            }
            Err(e) => Outcome::failed(e, "Failed to update user"),
        }
    }

    // The write already succeeded; a failed reload only leaves the store error set
    async fn refresh_after_write(&self) {
        if let Err(e) = self.store.fetch_all().await {
            warn!(error = %e, "Reload after write failed");
        }
    }

    /// Users matching the current criteria, recomputed on every call
    pub async fn visible_users(&self) -> Vec<User> {
        let users = self.store.users().await;
        filter_users(&users, &self.criteria, self.today())
    }

    /// Country and province options from the full list
    pub async fn facets(&self) -> Facets {
        facets(&self.store.users().await)
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
