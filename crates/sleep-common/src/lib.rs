//! # Sleep Common
//!
//! Shared types, utilities, and common functionality for the sleep check-in bot.
//!
//! This crate provides the record types owned by the persistence layer, the
//! workspace-wide error type, logging initialisation and small formatting
//! helpers used by every other crate in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
