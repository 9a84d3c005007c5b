//! Content validators for `head` and `body`.

use crate::core::document::LineIndex;
use crate::parser::{Element, ParsedDocument};
use crate::validation::engine::ValidationResult;
use crate::validation::rules::{self, Containment};

/// Flag every tag below `section` whose name the section does not permit,
/// in document order.
///
/// The check covers the whole subtree, not only direct children. An
/// element is reported once, on its opening tag; closing tags that matched
/// no opening tag are reported on their own. Self-closing tags are exempt:
/// `<p/>` inside `body` is not flagged here.
pub fn check_content(
    section: &Element,
    document: &ParsedDocument,
    index: &LineIndex,
    result: &mut ValidationResult,
) {
    let Some(rule) = rules::rule_for(&section.tag) else {
        return;
    };
    let Containment::Only(_) = rule.containment else {
        return;
    };

    let mut offending: Vec<_> = section
        .descendants()
        .filter(|element| !element.self_closing && !rule.containment.permits(element.tag.name()))
        .map(|element| element.open)
        .collect();

    if let Some(inner) = section.inner() {
        offending.extend(
            document
                .stray_within(inner)
                .filter(|token| !rule.containment.permits(&token.name))
                .map(|token| token.span),
        );
    }
    offending.sort_by_key(|span| span.start);

    for span in offending {
        result.add_error(index.range(span), rule.message);
    }
}
