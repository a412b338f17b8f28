//! Oculog Core - Shared types library.
//!
//! This crate provides common types used across all Oculog components:
//! - `server` - The usage-log store (HTTP service over `PostgreSQL`)
//! - `client` - Local cache and sync layer
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Wear records, owner tokens, and wire-format types
//! - [`usage`] - Lens-cycle derivation and monthly statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod usage;

pub use types::*;
pub use usage::*;
