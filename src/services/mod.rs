//! Use cases of the administration client, generic over the repository traits.

pub mod auth;
pub mod contacts;
pub mod errors;
pub mod settings;
pub mod users;

pub use errors::{ServiceError, ServiceResult};
