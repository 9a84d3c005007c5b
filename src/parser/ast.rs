//! Element Tree for MHTML
//!
//! Small tagged tree built from the tag tokens in a single pass.
//! Nodes keep byte offsets into the source so every later check can
//! report exactly where it found something.

use crate::parser::lexer::{Span, TagKind, TagToken};

/// Element names the grammar knows about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Html,
    Head,
    Body,
    Title,
    Meta,
    Div,
    Span,
    /// Any other element name (lowercase)
    Other(String),
}

impl Tag {
    /// Map a lowercase tag name to its variant
    pub fn from_name(name: &str) -> Self {
        match name {
            "html" => Tag::Html,
            "head" => Tag::Head,
            "body" => Tag::Body,
            "title" => Tag::Title,
            "meta" => Tag::Meta,
            "div" => Tag::Div,
            "span" => Tag::Span,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Body => "body",
            Tag::Title => "title",
            Tag::Meta => "meta",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Other(name) => name.as_str(),
        }
    }
}

/// A node of the element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Raw text between tags
    Text(Span),
    Element(Element),
}

/// An element and where its tags sit in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    /// Span of the opening tag token
    pub open: Span,
    /// Span of the matching closing tag token, if one was found
    pub close: Option<Span>,
    pub self_closing: bool,
    pub children: Vec<Node>,
}

impl Element {
    fn new(tag: Tag, open: Span, self_closing: bool) -> Self {
        Self {
            tag,
            open,
            close: None,
            self_closing,
            children: Vec::new(),
        }
    }

    /// True when an opening and a closing tag were matched
    pub fn is_paired(&self) -> bool {
        self.close.is_some()
    }

    /// Content between the opening and closing tags
    pub fn inner(&self) -> Option<Span> {
        self.close.map(|close| Span::new(self.open.end, close.start))
    }

    /// Whole element including both tags
    pub fn outer(&self) -> Span {
        let end = self.close.map_or(self.open.end, |close| close.end);
        Span::new(self.open.start, end)
    }

    /// Inner source text of a paired element
    pub fn inner_text<'t>(&self, source: &'t str) -> Option<&'t str> {
        self.inner().and_then(|span| source.get(span.start..span.end))
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }
}

// Dropping a deep tree recursively could overflow the stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// Pre-order walk over elements without recursion, so deeply nested
/// documents cannot exhaust the stack.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Descendants<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: vec![nodes.iter()],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(iter) = self.stack.last_mut() {
            match iter.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                Some(Node::Text(_)) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// Element tree plus the closing tags that found no partner
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Node>,
    /// Closing tags with no open element of the same name, in source order
    pub stray: Vec<TagToken>,
}

/// Build the element tree from tag tokens.
///
/// Closing tags match the nearest open element of the same name. Elements
/// left open are kept as unpaired, childless nodes and their would-be
/// children move up to the parent. Closing tags with no open partner stay
/// out of the tree and are returned in [`Tree::stray`].
pub fn build_tree(text: &str, tokens: Vec<TagToken>) -> Tree {
    let mut builder = TreeBuilder::default();
    let mut cursor = 0;

    for token in tokens {
        if token.span.start > cursor {
            builder.push(Node::Text(Span::new(cursor, token.span.start)));
        }
        cursor = token.span.end;
        builder.accept(token);
    }

    if cursor < text.len() {
        builder.push(Node::Text(Span::new(cursor, text.len())));
    }

    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
    stray: Vec<TagToken>,
}

impl TreeBuilder {
    fn children(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(element) => &mut element.children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: Node) {
        self.children().push(node);
    }

    fn accept(&mut self, token: TagToken) {
        let tag = Tag::from_name(&token.name);

        match token.kind {
            TagKind::SelfClosing => {
                self.push(Node::Element(Element::new(tag, token.span, true)));
            }
            TagKind::Open => {
                self.open.push(Element::new(tag, token.span, false));
            }
            TagKind::Close => {
                let Some(index) = self.open.iter().rposition(|element| element.tag == tag) else {
                    log::trace!("Stray closing tag </{}>", token.name);
                    self.stray.push(token);
                    return;
                };

                while self.open.len() > index + 1 {
                    self.abandon_innermost();
                }

                if let Some(mut element) = self.open.pop() {
                    element.close = Some(token.span);
                    self.push(Node::Element(element));
                }
            }
        }
    }

    /// Close the innermost open element as unpaired
    fn abandon_innermost(&mut self) {
        if let Some(mut element) = self.open.pop() {
            let children = std::mem::take(&mut element.children);
            let parent = self.children();
            parent.push(Node::Element(element));
            parent.extend(children);
        }
    }

    fn finish(mut self) -> Tree {
        while !self.open.is_empty() {
            self.abandon_innermost();
        }
        Tree {
            nodes: self.root,
            stray: self.stray,
        }
    }
}
