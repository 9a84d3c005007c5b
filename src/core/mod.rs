//! Core Business Logic
//!
//! Document snapshots, position mapping and diagnostic emission.

pub mod diagnostics;
pub mod document;

pub use diagnostics::{collect_diagnostics, emit, DiagnosticBatch};
pub use document::{DocumentSnapshot, LineIndex};
