//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs authorization checks and business logic
//! 3. Returns an HTTP response (JSON, status code)

/// Registration, login, logout, current user
pub mod auth;
/// Public catalog reads (categories, services, portfolio, testimonials, FAQs)
pub mod catalog;
/// Admin CRUD over catalog and marketing content
pub mod content;
/// Expense records (admin)
pub mod expenses;
/// Finance stats (admin)
pub mod finance;
/// Liveness endpoint
pub mod health;
/// Customer notifications
pub mod notifications;
/// Customer and staff order endpoints
pub mod orders;
/// Payment recording and listing (staff)
pub mod payments;
/// Site settings, public and admin
pub mod settings;
/// Employee payouts (admin)
pub mod transfers;
/// User administration
pub mod users;
