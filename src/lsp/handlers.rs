use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::core::diagnostics::emit;
use crate::core::document::{DocumentSnapshot, LineIndex};
use crate::lsp::backend::Backend;
use crate::lsp::completion::{completion_items, snippet_for, CompletionContext};
use crate::parser::{parse_document, Element};
use crate::validation::engine::{self, Severity};

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
    async fn clear_diagnostics(&self, uri: Url);
    fn create_lsp_diagnostic(&self, diagnostic: engine::Diagnostic) -> Diagnostic;
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let index = LineIndex::new(&doc_state.content);
        let Some(offset) = index.offset(to_engine_position(tdpp.position)) else {
            return Ok(None);
        };

        let document = parse_document(&doc_state.content);
        let Some(element) = document.element_at(offset) else {
            return Ok(None);
        };
        let Some(snippet) = snippet_for(element.tag.name()) else {
            return Ok(None);
        };

        let range = index.range(if element.open.contains(offset) {
            element.open
        } else {
            element.close.unwrap_or(element.open)
        });

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: format!("**<{}>**\n\n{}", snippet.label, snippet.description),
            }),
            range: Some(to_lsp_range(range)),
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().await;
        let prefix = docs
            .get(&uri)
            .and_then(|state| {
                let index = LineIndex::new(&state.content);
                let line_start = index.offset(engine::Position::new(pos.line, 0))?;
                let cursor = index.offset(to_engine_position(pos))?;
                state.content.get(line_start..cursor).map(str::to_string)
            })
            .unwrap_or_default();

        let items = completion_items(CompletionContext::from_prefix(&prefix));
        Ok(Some(CompletionResponse::Array(items)))
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Validate the stored text and publish the result tagged with its version
    async fn publish_diagnostics(&self, uri: Url) {
        let (content, version) = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(state) => (state.content.clone(), state.version),
                None => return,
            }
        };

        let snapshot = DocumentSnapshot {
            uri: uri.as_str(),
            version,
            text: &content,
        };
        let batch = emit(snapshot, &self.config.validation_options());

        // A newer edit may have arrived while this pass was running
        let current = self
            .documents
            .lock()
            .await
            .get(&uri)
            .map(|state| state.version);
        if current.is_none_or(|current| batch.is_stale(current)) {
            log::debug!("Dropping stale diagnostics for {} (version {})", uri, version);
            return;
        }

        let diagnostics = batch
            .diagnostics
            .into_iter()
            .map(|diagnostic| self.create_lsp_diagnostic(diagnostic))
            .collect();

        self.client
            .publish_diagnostics(uri, diagnostics, Some(batch.version))
            .await;
    }

    async fn clear_diagnostics(&self, uri: Url) {
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    fn create_lsp_diagnostic(&self, diagnostic: engine::Diagnostic) -> Diagnostic {
        let severity = match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Info => DiagnosticSeverity::INFORMATION,
            Severity::Hint => DiagnosticSeverity::HINT,
        };

        Diagnostic::new(
            to_lsp_range(diagnostic.range),
            Some(severity),
            None,
            Some("mhtml-ls".to_string()),
            diagnostic.message,
            None,
            None,
        )
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let index = LineIndex::new(&doc_state.content);
        let document = parse_document(&doc_state.content);
        let max_depth = self.config.validation_options().max_nesting_depth;

        let symbols = document
            .elements()
            .map(|element| element_symbol(element, &index, max_depth))
            .collect();

        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }
}

/// Outline entry for an element and, up to `depth` levels, its children
fn element_symbol(element: &Element, index: &LineIndex, depth: usize) -> DocumentSymbol {
    let children: Vec<_> = if depth > 1 {
        element
            .child_elements()
            .map(|child| element_symbol(child, index, depth - 1))
            .collect()
    } else {
        Vec::new()
    };

    let detail = match element.inner_text(index.text()) {
        Some(text) if element.child_elements().next().is_none() && !text.trim().is_empty() => {
            Some(text.trim().to_string())
        }
        _ => None,
    };

    DocumentSymbol {
        name: element.tag.name().to_string(),
        detail,
        kind: if element.is_paired() {
            SymbolKind::STRUCT
        } else {
            SymbolKind::FIELD
        },
        tags: None,
        #[allow(deprecated)]
        deprecated: Some(false), // Required by tower-lsp 0.20, use tags instead in future versions
        range: to_lsp_range(index.range(element.outer())),
        selection_range: to_lsp_range(index.range(element.open)),
        children: (!children.is_empty()).then_some(children),
    }
}

fn to_engine_position(position: Position) -> engine::Position {
    engine::Position::new(position.line, position.character)
}

fn to_lsp_range(range: engine::Range) -> Range {
    Range::new(
        Position::new(range.start.line, range.start.character),
        Position::new(range.end.line, range.end.character),
    )
}
