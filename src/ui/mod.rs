//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing
//! - [`report`] - Human-readable validation reports
//!
//! # Design
//!
//! The library never prints. The binary routes everything a user sees
//! through this module.

pub mod output;
pub mod report;
