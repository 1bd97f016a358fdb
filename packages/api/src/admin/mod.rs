//! # Admin back-office operations
//!
//! Everything under `/admin/*`. All of these require an `ADMIN` session;
//! the backend enforces that, and the router additionally gates the
//! screens that call them.

pub mod inquiries;
pub mod investments;
pub mod properties;
pub mod updates;
pub mod users;
