//! Data models representing database entities.
//!
//! Each module pairs the database row struct (deriving `sqlx::FromRow`) with
//! the API request/response types for that entity. Row structs may carry
//! internal fields (password hashes, recorder IDs) that the response types
//! strip before serialization.

/// Category rows for grouping services
pub mod category;
/// Business expense records
pub mod expense;
/// Frequently asked questions shown on the public site
pub mod faq;
/// Customer notifications
pub mod notification;
/// Customer orders and their status lifecycle
pub mod order;
/// Payments recorded against orders
pub mod payment;
/// Portfolio entries (published past work)
pub mod portfolio;
/// Academic services offered in the catalog
pub mod service;
/// Login session records
pub mod session;
/// Site-wide settings singleton
pub mod settings;
/// Customer testimonials
pub mod testimonial;
/// Employee payout records
pub mod transfer;
/// User accounts and roles
pub mod user;
