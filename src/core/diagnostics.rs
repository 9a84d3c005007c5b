//! Diagnostic Emitter
//!
//! Runs one validation pass and wraps its diagnostics with the document
//! identity they were computed for.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::core::document::DocumentSnapshot;
use crate::validation::engine::{validate_document, Diagnostic, ValidationOptions};

/// Diagnostics of one pass, tagged with the document version they belong to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticBatch {
    pub uri: String,
    pub version: i32,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBatch {
    /// A batch is stale once the document has moved past its version
    pub fn is_stale(&self, current_version: i32) -> bool {
        self.version < current_version
    }
}

/// Validate a snapshot, never failing.
///
/// A panic inside the engine is logged and the pass reports nothing, so a
/// malformed document can never take the caller down.
pub fn emit(snapshot: DocumentSnapshot<'_>, options: &ValidationOptions) -> DiagnosticBatch {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        validate_document(snapshot.text, options)
    }));

    let diagnostics = match outcome {
        Ok(result) => {
            log::debug!(
                "{} (version {}): {} diagnostics",
                snapshot.uri,
                snapshot.version,
                result.diagnostics.len()
            );
            result.diagnostics
        }
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::error!(
                "Validation of {} (version {}) panicked: {}",
                snapshot.uri,
                snapshot.version,
                reason
            );
            Vec::new()
        }
    };

    DiagnosticBatch {
        uri: snapshot.uri.to_string(),
        version: snapshot.version,
        diagnostics,
    }
}

/// Convenience wrapper over [`emit`] for callers holding loose parts
pub fn collect_diagnostics(
    uri: &str,
    version: i32,
    text: &str,
    options: &ValidationOptions,
) -> DiagnosticBatch {
    emit(DocumentSnapshot { uri, version, text }, options)
}
