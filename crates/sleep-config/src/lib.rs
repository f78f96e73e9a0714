//! # Sleep Config
//!
//! Type-safe configuration management for the sleep check-in bot.
//!
//! This crate provides the option schema (keyed by the plugin's established
//! option names), defaults, file loading with environment overrides,
//! validation and an atomically swappable configuration cache.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
