//! Seekd Common - shared error taxonomy and utilities
//!
//! This crate provides:
//! - `SeekdError`: application-specific error enum with exit-code mapping
//! - Helper utilities shared across the workspace (local address detection)

pub mod error;
pub mod utils;

pub use error::{Result, SeekdError};
pub use utils::local_address;
