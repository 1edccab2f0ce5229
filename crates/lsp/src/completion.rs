use crate::LspServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use vtscope_core::TypeInference;
use vtscope_core::completion::{CandidateKind, CompletionCandidate, complete};

pub async fn completion(
    server: &LspServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;
    let Some(doc) = server.documents.get(&uri).map(|d| d.value().clone()) else {
        return Ok(None);
    };

    let Some(engine) = server.engine().await else {
        return Ok(None);
    };
    let Some(model) = engine.snapshot().await else {
        tracing::debug!("completion before schema load: {}", uri);
        return Ok(None);
    };
    let language = server.language().await;

    let inference = TypeInference::new(&model, &doc.content);
    let candidates = complete(&inference, doc.position(position), language);
    if candidates.is_empty() {
        return Ok(None);
    }

    let items = candidates
        .into_iter()
        .enumerate()
        .map(|(rank, c)| to_completion_item(c, rank))
        .collect();
    Ok(Some(CompletionResponse::Array(items)))
}

/// `rank` keeps own items ahead of inherited ones in the client's sort.
fn to_completion_item(candidate: CompletionCandidate, rank: usize) -> CompletionItem {
    let kind = match candidate.kind {
        CandidateKind::Member => CompletionItemKind::FIELD,
        CandidateKind::Association => CompletionItemKind::REFERENCE,
        CandidateKind::Class => CompletionItemKind::CLASS,
    };

    let mut detail = candidate.detail;
    if candidate.inherited {
        detail.push_str(&format!(" (from {})", candidate.source_class));
    }

    CompletionItem {
        label: candidate.label.clone(),
        label_details: candidate.alt_label.as_ref().map(|alt| CompletionItemLabelDetails {
            detail: None,
            description: Some(alt.clone()),
        }),
        kind: Some(kind),
        detail: Some(detail),
        documentation: candidate.documentation.map(|value| {
            Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            })
        }),
        sort_text: Some(format!("{:04}", rank)),
        filter_text: candidate
            .alt_label
            .map(|alt| format!("{} {}", candidate.label, alt)),
        insert_text: Some(candidate.label),
        ..Default::default()
    }
}
