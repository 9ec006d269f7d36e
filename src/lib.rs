//! Scenefetch - selects remote scene releases for transfer with lftp
//!
//! The pipeline for one site runs: listing entries, match rules, media name
//! parsing and destination templating, deduplication, script rendering.
//! This library crate exposes each stage for the binary and for
//! integration testing.

pub mod config;
pub mod error;
pub mod queue;
pub mod rules;
pub mod site;
pub mod template;

pub use error::{Error, Result};
pub use queue::{Item, Queue};
pub use site::Site;
