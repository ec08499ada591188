//! User Directory - State Store
//!
//! Holds the canonical in-memory user list and keeps it in step with the
//! remote service.
//!
//! This crate provides:
//! - `UserStore`: fetch/create/update/delete that touch the local list only
//!   after the remote call succeeds, plus loading and error state
//! - `Directory`: a single `dispatch` entry point taking explicit `Command`s
//!   and returning `Outcome`s with user-facing `Notice`s
//!
//! # Example
//!
//! ```ignore
//! use userdir_client::{ClientConfig, UserDirClient};
//! use userdir_store::{Command, Directory, UserStore};
//!
//! let client = UserDirClient::new(ClientConfig::new("http://localhost:8080"))?;
//! let mut directory = Directory::new(UserStore::new(client));
//!
//! let outcome = directory.dispatch(Command::Refresh).await;
//! if let Some(notice) = outcome.notice {
//!     eprintln!("{}", notice);
//! }
//! for user in directory.visible_users().await {
//!     println!("{}", user.name);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dispatch;
mod error;
mod notice;
mod store;

pub use dispatch::{Command, Directory, Effect, Outcome};
pub use error::{Result, StoreError};
pub use notice::{Notice, NoticeLevel};
pub use store::UserStore;
