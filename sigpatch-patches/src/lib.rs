//! Patches and the pipeline that runs them.
//!
//! A [`Patch`] declares the packages it is compatible with and executes a
//! sequence of edit blocks through a [`PatchContext`]. A block that cannot
//! locate its target is skipped; a structural failure aborts the run.

pub mod builtin;
mod config;
mod context;
mod error;
mod patch;
mod report;
mod run;

pub use config::{ConfigError, PatchConfig};
pub use context::PatchContext;
pub use error::{BlockError, RunError, SkipReason};
pub use patch::Patch;
pub use report::{BlockOutcome, BlockReport, PatchReport, PatchStatus, RunReport};
pub use run::{RunOptions, run, select};
