//! Core types for Oculog.
//!
//! This module provides type-safe wrappers for the domain's concepts.

pub mod log;
pub mod token;
pub mod wear;

pub use log::{UsageLog, UsageSummary};
pub use token::{PREDEFINED_TOKENS, Token, TokenError, is_valid_token};
pub use wear::{WearEntry, WearType};
