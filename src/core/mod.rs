//! core
//!
//! Core domain types and pure algorithms for tokencheck.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TokenPath, TokenType, SchemaProfile
//! - [`tree`] - Token tree classification and traversal
//! - [`graph`] - Alias reference graph and cycle detection
//! - [`color`] - Color parsing, relative luminance, contrast ratio
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Nothing here mutates the document being validated
//! - All computation is deterministic

pub mod color;
pub mod config;
pub mod graph;
pub mod tree;
pub mod types;
