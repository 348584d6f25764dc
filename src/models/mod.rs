//! Records exchanged with the HBnB API.
//!
//! The client does not validate these beyond what serde needs to read them;
//! uniqueness, rating bounds and ownership rules live in the backend.

pub mod amenity;
pub mod auth;
pub mod common;
pub mod place;
pub mod review;
pub mod stats;
pub mod user;

pub use amenity::*;
pub use auth::*;
pub use common::*;
pub use place::*;
pub use review::*;
pub use stats::*;
pub use user::*;
