//! Domain entities exchanged with the CRM REST backend.

pub mod auth;
pub mod contact;
pub mod list;
pub mod types;
pub mod user;
