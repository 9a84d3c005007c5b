//! MHTML Parser
//!
//! Position-aware parsing of the markup dialect.
//! Tokenization and tree construction only; rules live in `validation`.

pub mod ast;
pub mod lexer;

pub use ast::{Descendants, Element, Node, Tag, Tree};
pub use lexer::{tokenize, Span, TagKind, TagToken};

/// A parsed document: top-level nodes plus closing tags left unmatched
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub nodes: Vec<Node>,
    pub stray: Vec<TagToken>,
}

impl ParsedDocument {
    /// All elements in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.nodes)
    }

    /// Top-level elements
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Unmatched closing tags that sit inside `span`
    pub fn stray_within(&self, span: Span) -> impl Iterator<Item = &TagToken> {
        self.stray
            .iter()
            .filter(move |token| token.span.start >= span.start && token.span.end <= span.end)
    }

    /// Element whose opening or closing tag covers `offset`
    pub fn element_at(&self, offset: usize) -> Option<&Element> {
        self.descendants().find(|element| {
            element.open.contains(offset) || element.close.is_some_and(|c| c.contains(offset))
        })
    }
}

/// Parse a whole document
///
/// This is the main entry point for parsing. It tokenizes the text once
/// and builds the element tree from the tokens.
pub fn parse_document(text: &str) -> ParsedDocument {
    let tree = ast::build_tree(text, lexer::tokenize(text));
    ParsedDocument {
        nodes: tree.nodes,
        stray: tree.stray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let doc = parse_document("<html><head></head><body></body></html>");

        let html = doc.elements().next().expect("html element");
        assert_eq!(html.tag, Tag::Html);
        let tags: Vec<_> = html.child_elements().map(|e| e.tag.clone()).collect();
        assert_eq!(tags, vec![Tag::Head, Tag::Body]);
    }

    #[test]
    fn test_stray_within_span() {
        let doc = parse_document("</p><div></b></div></i>");

        let names: Vec<_> = doc
            .stray_within(Span::new(4, 19))
            .map(|token| token.name.as_str())
            .collect();
        assert_eq!(names, vec!["b"]);
        assert_eq!(doc.stray.len(), 3);
    }

    #[test]
    fn test_element_at_offset() {
        let doc = parse_document("<div><span>x</span></div>");

        assert_eq!(doc.element_at(7).map(|e| e.tag.clone()), Some(Tag::Span));
        assert_eq!(doc.element_at(21).map(|e| e.tag.clone()), Some(Tag::Div));
        assert!(doc.element_at(11).is_none());
    }
}
