//! Core business logic for pedika.

pub mod services;

pub use services::*;
