//! Business logic services shared by the HTTP handlers.

/// Password hashing, session issuing, referral codes
pub mod auth_service;
/// Finance aggregates (revenue, expenses, transfers, net)
pub mod finance_service;
/// Order creation and lifecycle transitions
pub mod order_service;
/// Payment recording and per-order payment totals
pub mod payment_service;
