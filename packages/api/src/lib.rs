//! # HomeStake API client
//!
//! Typed bindings for the HomeStake backend, shared by every frontend target.
//!
//! | Module       | Description                                              |
//! |--------------|----------------------------------------------------------|
//! | `client`     | Authenticated HTTP wrapper with 401 interception         |
//! | `session`    | Persisted bearer token + cached profile                  |
//! | `storage`    | Platform key-value store (`localStorage` on web)         |
//! | `config`     | Backend and media base URLs                              |
//! | `error`      | [`ApiError`] and backend error-message extraction        |
//! | `decode`     | Tolerant decoding of list/item response envelopes        |
//! | `models`     | Wire types (properties, investments, inquiries, updates) |
//! | `auth`       | Signup, OTP verification, login, password reset          |
//! | `properties` | Public listings and interest submission                  |
//! | `updates`    | Updates feed, likes and comments                         |
//! | `admin`      | Back-office operations (admin role required)             |
//! | `uploads`    | Presigned media uploads, chunked for large files         |

pub mod admin;
pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod properties;
pub mod session;
pub mod storage;
pub mod updates;
pub mod uploads;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use session::SessionStore;
