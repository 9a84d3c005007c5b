//! MHTML Language Server
//!
//! A small Language Server Protocol implementation for `.mhtml` documents,
//! a restricted HTML-like markup dialect.
//!
//! This library provides:
//! - Position-aware parsing into an element tree
//! - Structural validation against the containment and cardinality rules
//! - LSP protocol implementation
//! - Configuration management

pub mod config;
pub mod core;
pub mod lsp;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{parse_document, ParsedDocument};
pub use validation::{validate, Diagnostic};
