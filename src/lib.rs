//! REST data adapter and command-line client for the CRM administration API.
//!
//! [`repository::HttpRepository`] maps resource-oriented calls (list, get,
//! create, update, delete) onto the backend's REST conventions, attaching the
//! bearer token held by an injected [`session::SessionStore`]. The
//! [`services`] layer holds the use cases and is what front ends call.

#[cfg(feature = "cli")]
pub mod cli;
pub mod domain;
pub mod dto;
pub mod models;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod services;
pub mod session;
