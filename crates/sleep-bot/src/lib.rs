//! # Sleep Bot
//!
//! Host process for the morning/night check-in bot.
//!
//! This is the main binary crate that wires configuration, logging,
//! persistence and the rollover scheduler together and drives the command
//! framework from a line-oriented event stream.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod persistence;
pub mod scheduler;

pub use bot::*;
pub use error::*;
pub use persistence::SledStore;
pub use scheduler::{JobId, JobMetadata, SchedulerService};
