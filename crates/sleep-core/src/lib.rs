//! # Sleep Core
//!
//! Check-in logic for the morning/night greeting bot.
//!
//! The crate decides whether a greeting falls inside its (possibly
//! midnight-crossing) window, which response tier a repeat greeting earns,
//! how accepted greetings update user and group counters, and how those
//! counters roll over daily and weekly. Persistence is reached only through
//! the [`SleepStore`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod evaluator;
pub mod minutes;
pub mod prompts;
pub mod replies;
pub mod report;
pub mod rollover;
pub mod service;
pub mod store;
pub mod tier;
pub mod window;

pub use aggregator::{AllStats, AppliedCheckin, GroupSummary};
pub use evaluator::{evaluate, Acceptance, Standing, Verdict};
pub use prompts::PromptPicker;
pub use report::StatisticsReport;
pub use service::{CheckinOutcome, CheckinService};
pub use store::{MemoryStore, SleepStore};
pub use tier::{Tier, TierLadder};
pub use window::{is_in_window, window_bounds, Window};
