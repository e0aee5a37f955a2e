//! Error taxonomy for Emote Collector
//!
//! [`ServiceError`] is the single error type for failed emote operations.
//! The [`catalog`] assigns every variant a stable code, a localization
//! template, and its classifications.
//!
//! # Error Code Ranges
//!
//! | Range      | Category  | Description                                   |
//! |------------|-----------|-----------------------------------------------|
//! | E001-E099  | General   | Generic service failures                      |
//! | E100-E199  | Emote     | Failures while creating or modifying an emote |
//! | E200-E299  | Argument  | Bad command arguments                         |
//! | E300-E399  | Platform  | Chat platform failures not caused by the user |

pub mod catalog;
pub mod service;

pub use catalog::{ErrorCategory, ErrorCode, Remedy};
pub use service::{
    EmoteRef, ServiceError, ServiceResult, classify_as_invalid_argument, classify_as_timeout,
};
