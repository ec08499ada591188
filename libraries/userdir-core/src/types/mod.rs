//! Domain types for the user directory

mod draft;
mod ids;
mod photo;
mod user;

pub use draft::{UserDraft, UserPatch};
pub use ids::UserId;
pub use photo::{Photo, MAX_PHOTO_BYTES};
pub use user::User;
