//! User Directory Client
//!
//! HTTP client library for the user directory REST API.
//!
//! # Features
//!
//! - **Users**: list, fetch, create (multipart with photo), update, delete
//! - **Service seam**: the `UserService` trait lets the state store run
//!   against this client or any test double
//! - **Photo capture**: the `PhotoCapture` adapter produces the image
//!   uploaded with a new user
//!
//! # Example
//!
//! ```ignore
//! use userdir_client::{ClientConfig, UserDirClient, UserService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UserDirClient::new(ClientConfig::new("http://localhost:8080"))?;
//!
//!     let users = client.list().await?;
//!     println!("Found {} users", users.len());
//!
//!     Ok(())
//! }
//! ```

mod capture;
mod client;
mod error;
mod service;
mod types;
mod users;

pub use capture::{mime_type_for_file, FileCapture, PhotoCapture, DEFAULT_CAPTURE_NAME};
pub use client::UserDirClient;
pub use error::{ClientError, Result};
pub use service::UserService;
pub use types::ClientConfig;
pub use users::UsersClient;
