//! Structural matching: document bounds, the `html` root and its
//! `head`/`body` sections.

use crate::core::document::LineIndex;
use crate::parser::{Element, ParsedDocument, Tag};
use crate::validation::engine::{Position, Range, ValidationResult};

pub const MISSING_HTML_START: &str = "Document must start with <html>";
pub const MISSING_HTML_END: &str = "Document must end with </html>";
pub const EXTRA_HTML: &str = "Document may contain only one html element";

const HTML_START: &str = "<html>";
const HTML_END: &str = "</html>";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Width of a cardinality diagnostic, always starting at column 0
const CARDINALITY_WIDTH: u32 = 10;

/// The two sections of a well-formed `html` element
#[derive(Debug, Clone, Copy)]
pub struct Sections<'d> {
    pub head: &'d Element,
    pub body: &'d Element,
}

/// Rule 1: the trimmed text starts with `<html>` and ends with `</html>`.
///
/// Both halves are literal and independent of each other. A leading or
/// trailing byte order mark counts as whitespace.
pub fn check_root_bounds(index: &LineIndex, result: &mut ValidationResult) {
    let trimmed = index
        .text()
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);

    if !trimmed.starts_with(HTML_START) {
        result.add_error(
            Range::new(
                Position::new(0, 0),
                Position::new(0, HTML_START.len() as u32),
            ),
            MISSING_HTML_START,
        );
    }

    if !trimmed.ends_with(HTML_END) {
        let line = index.last_line();
        let length = index.line_length(line);
        result.add_error(
            Range::new(
                Position::new(line, length.saturating_sub(HTML_END.len() as u32)),
                Position::new(line, length),
            ),
            MISSING_HTML_END,
        );
    }
}

/// Find the `html` element the remaining rules run against.
///
/// Only the first top-level pair is validated; each further one is
/// reported on its opening tag.
pub fn match_root<'d>(
    document: &'d ParsedDocument,
    index: &LineIndex,
    result: &mut ValidationResult,
) -> Option<&'d Element> {
    let mut covered = 0;
    let mut roots = document
        .descendants()
        .filter(|element| element.tag == Tag::Html && element.is_paired())
        .filter(|element| {
            if element.open.start < covered {
                return false;
            }
            covered = element.outer().end;
            true
        });

    let root = roots.next();
    for extra in roots {
        result.add_error(index.range(extra.open), EXTRA_HTML);
    }

    root
}

/// Rule 2: exactly one `head` pair and exactly one `body` pair inside `root`.
///
/// Violations point at the line of the first literal `<head` (or `<body`)
/// anywhere in the document, or line 0 when there is none. The lookup is
/// case-sensitive and also hits longer names such as `<header`.
pub fn match_sections<'d>(
    root: &'d Element,
    index: &LineIndex,
    result: &mut ValidationResult,
) -> Option<Sections<'d>> {
    let head = single_pair(root, Tag::Head, index, result);
    let body = single_pair(root, Tag::Body, index, result);

    Some(Sections {
        head: head?,
        body: body?,
    })
}

fn single_pair<'d>(
    root: &'d Element,
    tag: Tag,
    index: &LineIndex,
    result: &mut ValidationResult,
) -> Option<&'d Element> {
    let mut pairs = root
        .descendants()
        .filter(|element| element.tag == tag && element.is_paired());

    match (pairs.next(), pairs.next()) {
        (Some(element), None) => Some(element),
        _ => {
            let line = index
                .text()
                .find(&format!("<{}", tag.name()))
                .map_or(0, |offset| index.position(offset).line);

            result.add_error(
                Range::new(
                    Position::new(line, 0),
                    Position::new(line, CARDINALITY_WIDTH),
                ),
                format!("html must contain exactly one {} element", tag.name()),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    fn bounds(text: &str) -> Vec<(String, Range)> {
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();
        check_root_bounds(&index, &mut result);
        result
            .diagnostics
            .into_iter()
            .map(|d| (d.message, d.range))
            .collect()
    }

    fn range(start: (u32, u32), end: (u32, u32)) -> Range {
        Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    #[test]
    fn test_bounds_accept_surrounding_whitespace() {
        assert!(bounds("\n  <html></html>\n\n").is_empty());
    }

    #[test]
    fn test_bounds_skip_byte_order_mark() {
        assert!(bounds("\u{feff}<html></html>\n").is_empty());
        assert!(bounds("\u{feff}\r\n<html>\r\n</html>\u{feff}").is_empty());
    }

    #[test]
    fn test_bounds_are_case_sensitive_literals() {
        let found = bounds("<HTML></HTML>");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], (MISSING_HTML_START.to_string(), range((0, 0), (0, 6))));
        assert_eq!(found[1], (MISSING_HTML_END.to_string(), range((0, 6), (0, 13))));
    }

    #[test]
    fn test_missing_end_is_clamped_on_short_last_line() {
        let found = bounds("<html>\n<body>\nab");
        assert_eq!(found, vec![(MISSING_HTML_END.to_string(), range((2, 0), (2, 2)))]);
    }

    #[test]
    fn test_trailing_newline_anchors_to_empty_last_line() {
        let found = bounds("<html>\n");
        assert_eq!(found, vec![(MISSING_HTML_END.to_string(), range((1, 0), (1, 0)))]);
    }

    #[test]
    fn test_extra_html_elements_are_reported() {
        let text = "<html></html>\n<html></html>";
        let document = parse_document(text);
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();

        let root = match_root(&document, &index, &mut result).expect("root");
        assert_eq!(root.open.start, 0);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].message, EXTRA_HTML);
        assert_eq!(result.diagnostics[0].range, range((1, 0), (1, 6)));
    }

    #[test]
    fn test_nested_html_is_not_a_second_root() {
        let text = "<html><html></html></html>";
        let document = parse_document(text);
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();

        assert!(match_root(&document, &index, &mut result).is_some());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_cardinality_points_at_first_tag_line() {
        let text = "<html>\n<body></body>\n  <body></body>\n<head></head>\n</html>";
        let document = parse_document(text);
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();
        let root = match_root(&document, &index, &mut result).expect("root");

        assert!(match_sections(root, &index, &mut result).is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].message,
            "html must contain exactly one body element"
        );
        assert_eq!(result.diagnostics[0].range, range((1, 0), (1, 10)));
    }

    #[test]
    fn test_missing_head_reports_line_zero() {
        let text = "<html>\n<body></body>\n</html>";
        let document = parse_document(text);
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();
        let root = match_root(&document, &index, &mut result).expect("root");

        assert!(match_sections(root, &index, &mut result).is_none());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(
            result.diagnostics[0].message,
            "html must contain exactly one head element"
        );
        assert_eq!(result.diagnostics[0].range, range((0, 0), (0, 10)));
    }

    fn section_errors(text: &str) -> Vec<(String, Range)> {
        let document = parse_document(text);
        let index = LineIndex::new(text);
        let mut result = ValidationResult::new();
        let root = match_root(&document, &index, &mut result).expect("root");

        assert!(match_sections(root, &index, &mut result).is_none());
        result
            .diagnostics
            .into_iter()
            .map(|d| (d.message, d.range))
            .collect()
    }

    #[test]
    fn test_cardinality_location_ignores_uppercase_tags() {
        let found = section_errors("<html>\n<HEAD></HEAD>\n<HEAD></HEAD>\n<body></body>\n</html>");
        assert_eq!(
            found,
            vec![(
                "html must contain exactly one head element".to_string(),
                range((0, 0), (0, 10))
            )]
        );
    }

    #[test]
    fn test_cardinality_location_matches_longer_tag_names() {
        let found = section_errors("<html>\n<header></header>\n<body></body>\n</html>");
        assert_eq!(
            found,
            vec![(
                "html must contain exactly one head element".to_string(),
                range((1, 0), (1, 10))
            )]
        );
    }
}
