//! User Directory Core
//!
//! Platform-agnostic domain types, age computation and filtering for the
//! user directory.
//!
//! This crate performs no I/O. The HTTP client lives in `userdir-client` and
//! the state store in `userdir-store`; both build on the types defined here.
//!
//! # Architecture
//!
//! - **Domain Types**: `User`, `UserId`, `UserDraft`, `UserPatch`, `Photo`
//! - **Filter Engine**: `FilterCriteria`, `filter_users`, `facets`
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use userdir_core::{filter_users, FilterCriteria, FilterChange, User, UserId};
//!
//! let mut ana = User::new("Ana", "ana@example.com", "2000-06-15");
//! ana.id = Some(UserId::new(1));
//! ana.country = "Angola".to_string();
//!
//! let criteria = FilterCriteria::default().apply(FilterChange::SearchTerm("ana".into()));
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//!
//! let visible = filter_users(&[ana], &criteria, today);
//! assert_eq!(visible.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod age;
pub mod error;
pub mod filter;
pub mod types;

pub use age::{age_on, parse_birth_date};
pub use error::{CoreError, Result};
pub use filter::{
    facets, filter_users, filter_users_now, matches, Facets, FilterChange, FilterCriteria,
    DEFAULT_MAX_AGE, DEFAULT_MIN_AGE,
};
pub use types::{Photo, User, UserDraft, UserId, UserPatch, MAX_PHOTO_BYTES};
