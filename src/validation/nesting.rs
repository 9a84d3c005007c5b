//! Nesting validator
//!
//! Walks a section depth-first, checking the per-element containment
//! rules at every level:
//! - `title` holds text only
//! - `span` holds no `div`, however deep
//! - `div` may hold `div`, `span` and text; `Only` rules are enforced over
//!   the whole `head`/`body` subtree by the content validators, so nothing
//!   is re-checked here
//!
//! Every element is visited exactly once. Children are finished before
//! their parent, so whether a subtree holds an excluded element is known
//! without rescanning it; diagnostics are still reported in document order.

use crate::core::document::LineIndex;
use crate::parser::{Element, Span, Tag};
use crate::validation::engine::{ValidationOptions, ValidationResult};
use crate::validation::rules::{self, Containment, ContainmentRule};

/// Set of excluded element names found in a subtree, one bit per name in
/// [`NestingValidator::excluded`]
type Found = u64;

struct NestingValidator<'a> {
    index: &'a LineIndex<'a>,
    max_depth: usize,
    truncated: bool,
    /// Every name some `Excludes` rule forbids
    excluded: Vec<&'static str>,
    /// Violations keyed by element start; the walk finishes children first
    violations: Vec<(Span, &'static str)>,
}

/// Check nesting rules for everything inside `section`.
pub fn check_nesting(
    section: &Element,
    index: &LineIndex,
    options: &ValidationOptions,
    result: &mut ValidationResult,
) {
    let mut validator = NestingValidator {
        index,
        max_depth: options.max_nesting_depth,
        truncated: false,
        excluded: rules::excluded_names().collect(),
        violations: Vec::new(),
    };
    let mut ancestors = vec![&section.tag];
    validator.visit(section, &mut ancestors);

    validator.violations.sort_by_key(|(span, _)| span.start);
    for (span, message) in validator.violations {
        result.add_error(index.range(span), message);
    }
}

impl<'a> NestingValidator<'a> {
    /// Check every element below `parent` and report which excluded names
    /// occur among its descendants.
    fn visit<'e>(&mut self, parent: &'e Element, ancestors: &mut Vec<&'e Tag>) -> Found {
        let mut found = 0;

        for element in parent.child_elements() {
            let below = if ancestors.len() >= self.max_depth {
                if !self.truncated {
                    log::warn!(
                        "Nesting deeper than {} levels; inner elements are not checked",
                        self.max_depth
                    );
                    self.truncated = true;
                }
                element
                    .descendants()
                    .fold(0, |found, child| found | self.bit(child.tag.name()))
            } else {
                ancestors.push(&element.tag);
                let below = self.visit(element, ancestors);
                ancestors.pop();
                below
            };

            self.check_element(element, below);
            found |= below | self.bit(element.tag.name());
        }

        found
    }

    fn bit(&self, name: &str) -> Found {
        self.excluded
            .iter()
            .position(|excluded| *excluded == name)
            .map_or(0, |position| 1 << position)
    }

    fn check_element(&mut self, element: &Element, below: Found) {
        let Some(rule) = rules::rule_for(&element.tag) else {
            return;
        };

        let violated = match rule.containment {
            Containment::TextOnly => element
                .inner_text(self.index.text())
                .is_some_and(|inner| inner.contains('<')),
            Containment::Excludes(denied) => {
                element.is_paired()
                    && denied.iter().any(|name| below & self.bit(name) != 0)
            }
            Containment::Only(_) => false,
        };

        if violated {
            self.report(element, rule);
        }
    }

    fn report(&mut self, element: &Element, rule: &ContainmentRule) {
        self.violations.push((element.outer(), rule.message));
    }
}
