//! Common utilities and shared types for pedika.
//!
//! This crate provides foundational components used across all pedika crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Authentication**: JWT claims, roles and token helpers
//! - **Passwords**: Argon2 hashing and verification
//! - **Registration numbers**: Case-number formatting for reports
//! - **Storage**: File storage backends (local, S3-compatible)
//!
//! # Example
//!
//! ```no_run
//! use pedika_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on port {}", config.server.port);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod registration;
pub mod storage;

pub use auth::{Claims, Role, create_token, verify_token};
pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use error::{AppError, AppResult};
pub use registration::{AGENCY_CODE, MAX_SEQUENCE, RegistrationPeriod, roman_month};
pub use storage::{
    LocalStorage, StorageBackend, StorageConfig, UploadedFile, generate_storage_key,
};
