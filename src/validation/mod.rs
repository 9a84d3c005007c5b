//! Validation Engine
//!
//! Clean separation of validation logic from parsing and LSP concerns.

pub mod content;
pub mod engine;
pub mod nesting;
pub mod rules;
pub mod structure;

pub use engine::{validate, validate_document, Diagnostic, Position, Range, Severity};

// Re-export common types
pub use engine::{ValidationOptions, ValidationResult};
