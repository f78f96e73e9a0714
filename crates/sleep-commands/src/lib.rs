//! # Sleep Commands
//!
//! Command implementations for the sleep check-in bot.
//!
//! This crate provides the inbound session model, the keyword router that
//! turns greetings into commands, and the `morning`, `night` and
//! `早晚安统计` command handlers. It knows nothing about any chat protocol;
//! hosts feed it [`Session`]s and deliver whatever reply comes back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod framework;
mod greeting;
pub mod morning;
pub mod night;
pub mod router;
pub mod session;
pub mod statistics;

pub use framework::*;
pub use router::{handle_message, route};
pub use session::Session;
