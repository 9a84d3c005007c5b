//! Validation Engine
//!
//! Core validation logic separated from parsing and LSP concerns.
//! A pass is a pure function of the document text.

use serde::Serialize;

use crate::core::diagnostics::collect_diagnostics;
use crate::core::document::LineIndex;
use crate::parser::parse_document;
use crate::validation::{content, nesting, structure};

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// Zero-based line and UTF-16 character offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// A diagnostic message for a structural violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: Range,
    pub message: String,
}

/// Result of validating a document
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_error(&mut self, range: Range, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            range,
            message: message.into(),
        });
    }

    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Tunables for a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Deepest element nesting the nesting validator descends into
    pub max_nesting_depth: usize,
}

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1024;

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Validate a document and return its diagnostics.
///
/// `uri` and `version` only label the pass in logs. A pass that panics
/// yields no diagnostics.
pub fn validate(uri: &str, version: i32, text: &str) -> Vec<Diagnostic> {
    collect_diagnostics(uri, version, text, &ValidationOptions::default()).diagnostics
}

/// Run every rule over `text`.
///
/// Rule 1 looks at the raw text. Everything after it needs a matched
/// `html` element; when none is found only rule 1 can fire.
pub fn validate_document(text: &str, options: &ValidationOptions) -> ValidationResult {
    let index = LineIndex::new(text);
    let mut result = ValidationResult::new();

    structure::check_root_bounds(&index, &mut result);

    let document = parse_document(text);
    let Some(root) = structure::match_root(&document, &index, &mut result) else {
        log::debug!("No html element found; skipping structure rules");
        return result;
    };

    if let Some(sections) = structure::match_sections(root, &index, &mut result) {
        content::check_content(sections.head, &document, &index, &mut result);
        content::check_content(sections.body, &document, &index, &mut result);
        nesting::check_nesting(sections.head, &index, options, &mut result);
        nesting::check_nesting(sections.body, &index, options, &mut result);
    }

    result
}
