//! Configuration and wire-only models of the CRM backend.

pub mod auth;
pub mod config;
