//! Completion catalogue
//!
//! Static structural snippets offered after `<` and `/`. Nothing here
//! depends on document state or validation results.

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, InsertTextFormat, MarkupContent, MarkupKind,
};

/// A structural snippet for one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub label: &'static str,
    pub description: &'static str,
    /// Insert text using `${n:placeholder}` tab stops
    pub template: &'static str,
}

pub static SNIPPETS: &[Snippet] = &[
    Snippet {
        label: "html",
        description: "Document root holding exactly one head and one body",
        template: "<html>\n\t<head>\n\t\t<title>${1:Title}</title>\n\t</head>\n\t<body>\n\t\t${2:content}\n\t</body>\n</html>",
    },
    Snippet {
        label: "head",
        description: "Document metadata; may contain only title and meta",
        template: "<head>\n\t<title>${1:Title}</title>\n</head>",
    },
    Snippet {
        label: "body",
        description: "Document content; may contain only div and span",
        template: "<body>\n\t${1:content}\n</body>",
    },
    Snippet {
        label: "title",
        description: "Document title; text only",
        template: "<title>${1:Title}</title>",
    },
    Snippet {
        label: "meta",
        description: "Metadata entry",
        template: "<meta ${1:name}=\"${2:value}\">",
    },
    Snippet {
        label: "div",
        description: "Block container; may contain div, span and text",
        template: "<div>${1:content}</div>",
    },
    Snippet {
        label: "span",
        description: "Inline container; must not contain div",
        template: "<span>${1:text}</span>",
    },
];

pub const TRIGGER_CHARACTERS: [&str; 2] = ["<", "/"];

/// Look up the snippet for an element name
pub fn snippet_for(name: &str) -> Option<&'static Snippet> {
    SNIPPETS.iter().find(|snippet| snippet.label == name)
}

/// What precedes the cursor, as far as completion cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionContext {
    /// Cursor right after `</`: offer closing tags
    ClosingTag,
    /// Cursor right after `<`: offer templates without their leading `<`
    OpeningTag,
    Anywhere,
}

impl CompletionContext {
    pub fn from_prefix(prefix: &str) -> Self {
        if prefix.ends_with("</") {
            CompletionContext::ClosingTag
        } else if prefix.ends_with('<') {
            CompletionContext::OpeningTag
        } else {
            CompletionContext::Anywhere
        }
    }
}

/// Build completion items for the given context
pub fn completion_items(context: CompletionContext) -> Vec<CompletionItem> {
    SNIPPETS
        .iter()
        .map(|snippet| {
            let (insert_text, format) = match context {
                CompletionContext::ClosingTag => {
                    (format!("{}>", snippet.label), InsertTextFormat::PLAIN_TEXT)
                }
                CompletionContext::OpeningTag => (
                    snippet.template.trim_start_matches('<').to_string(),
                    InsertTextFormat::SNIPPET,
                ),
                CompletionContext::Anywhere => {
                    (snippet.template.to_string(), InsertTextFormat::SNIPPET)
                }
            };

            CompletionItem {
                label: snippet.label.to_string(),
                kind: Some(CompletionItemKind::SNIPPET),
                detail: Some(snippet.description.to_string()),
                documentation: Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: format!("```mhtml\n{}\n```", snippet.template),
                })),
                insert_text: Some(insert_text),
                insert_text_format: Some(format),
                ..Default::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_covers_grammar_elements() {
        let labels: Vec<_> = SNIPPETS.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec!["html", "head", "body", "title", "meta", "div", "span"]
        );
        for snippet in SNIPPETS {
            assert!(snippet.template.contains("${1:"), "{} has no tab stop", snippet.label);
        }
    }

    #[test]
    fn test_context_from_prefix() {
        assert_eq!(CompletionContext::from_prefix("  </"), CompletionContext::ClosingTag);
        assert_eq!(CompletionContext::from_prefix("<div><"), CompletionContext::OpeningTag);
        assert_eq!(CompletionContext::from_prefix("text"), CompletionContext::Anywhere);
    }

    #[test]
    fn test_opening_tag_drops_bracket() {
        let items = completion_items(CompletionContext::OpeningTag);
        let div = items.iter().find(|i| i.label == "div").expect("div item");
        assert_eq!(div.insert_text.as_deref(), Some("div>${1:content}</div>"));
        assert_eq!(div.insert_text_format, Some(InsertTextFormat::SNIPPET));
    }

    #[test]
    fn test_closing_tag_items() {
        let items = completion_items(CompletionContext::ClosingTag);
        let span = items.iter().find(|i| i.label == "span").expect("span item");
        assert_eq!(span.insert_text.as_deref(), Some("span>"));
    }
}
