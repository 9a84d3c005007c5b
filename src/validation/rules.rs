//! Containment rule table
//!
//! Which children each element may hold. Shared by the content
//! validators and the nesting validator; never mutated.

use crate::parser::Tag;

/// What an element may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Only these element names, at any depth below the parent
    Only(&'static [&'static str]),
    /// Plain text, no markup at all
    TextOnly,
    /// Anything except these element names, at any depth
    Excludes(&'static [&'static str]),
}

impl Containment {
    /// Whether an element called `name` may appear inside the parent
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Containment::Only(allowed) => allowed.iter().any(|allowed| *allowed == name),
            Containment::TextOnly => false,
            Containment::Excludes(denied) => !denied.iter().any(|denied| *denied == name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainmentRule {
    pub parent: &'static str,
    pub containment: Containment,
    pub message: &'static str,
}

pub static CONTAINMENT_RULES: &[ContainmentRule] = &[
    ContainmentRule {
        parent: "head",
        containment: Containment::Only(&["title", "meta"]),
        message: "head may contain only title or meta elements",
    },
    ContainmentRule {
        parent: "body",
        containment: Containment::Only(&["div", "span"]),
        message: "body may contain only div or span elements",
    },
    ContainmentRule {
        parent: "title",
        containment: Containment::TextOnly,
        message: "title can contain only text",
    },
    ContainmentRule {
        parent: "span",
        containment: Containment::Excludes(&["div"]),
        message: "span cannot contain div elements",
    },
    ContainmentRule {
        parent: "div",
        containment: Containment::Only(&["div", "span"]),
        message: "div may contain only div or span elements",
    },
];

/// Look up the rule for an element, if it has one
pub fn rule_for(tag: &Tag) -> Option<&'static ContainmentRule> {
    CONTAINMENT_RULES
        .iter()
        .find(|rule| rule.parent == tag.name())
}

/// Names forbidden anywhere below some element
pub fn excluded_names() -> impl Iterator<Item = &'static str> {
    CONTAINMENT_RULES
        .iter()
        .filter_map(|rule| match rule.containment {
            Containment::Excludes(denied) => Some(denied.iter().copied()),
            _ => None,
        })
        .flatten()
}
