//! # scenefetch-lftp
//!
//! Plumbing around the `lftp` transfer tool.
//!
//! This crate provides:
//! - Parsing of the timestamped directory listings produced by `cls`
//! - Rendering of the queue scripts that `lftp` executes
//! - A [`Client`] that lists remote directories and runs scripts
//!
//! ## Example
//!
//! ```
//! use scenefetch_lftp::{parse_line, Script};
//!
//! let entry = parse_line("2024-03-01 12:00:00 +0000 UTC The.Wire.S01E01/")?;
//! assert_eq!(entry.name, "The.Wire.S01E01");
//!
//! let mut script = Script::new("siteA", "mirror");
//! script.push("/tv/The.Wire.S01E01", "/media/tv/The.Wire/S01/The.Wire.S01E01");
//! assert!(script.to_string().starts_with("open siteA\n"));
//! # Ok::<(), scenefetch_lftp::Error>(())
//! ```

mod client;
mod entry;
mod error;
mod script;
pub mod tools;

pub use client::Client;
pub use entry::{parse_line, parse_listing, DirectoryEntry, TIME_FORMAT};
pub use error::{Error, Result};
pub use script::Script;
pub use tools::{check_tool, ToolInfo};
