//! Configuration resolution for scour.
//!
//! Three sources — the built-in defaults file, the command line, and the
//! user `.scourrc` — are parsed independently and merged with CLI-over-
//! file-over-defaults precedence into named [`Section`]s. See
//! [`resolve::Resolver`] for the orchestration.

pub mod cli;
pub mod coerce;
pub mod conf;
pub mod paths;
pub mod resolve;
pub mod types;
pub mod writer;

#[cfg(test)]
mod cli_tests;

pub use resolve::{Resolution, Resolver, SavePlan};
pub use types::{Origin, Section, Setting, Value};
