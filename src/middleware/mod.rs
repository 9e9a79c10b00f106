//! Request middleware.

/// Session authentication and role gating
pub mod auth;
