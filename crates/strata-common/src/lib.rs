//! Common utilities for the Strata style engine.
//!
//! This crate provides shared infrastructure used by the engine and the CLI:
//! - **Warning System** - deduplicated, colored terminal output for recoverable input problems
//! - **Data URLs** - encoding inline SVG markup into `data:` URLs and decoding them back

pub mod data_url;
pub mod warning;
