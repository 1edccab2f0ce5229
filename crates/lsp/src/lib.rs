pub mod capabilities;
pub mod completion;
pub mod hover;
pub mod loader;
pub mod util;

use crate::capabilities::{CMD_CLEAR_CACHE, CMD_REFRESH_SCHEMA, CMD_TRANSLATE};
use crate::util::{Document, offset_at};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use vtscope_api::DisplayLanguage;
use vtscope_core::{SchemaEngine, Settings};

pub struct LspServer {
    client: Client,
    pub engine: Arc<RwLock<Option<Arc<SchemaEngine>>>>,
    pub settings: RwLock<Settings>,
    pub documents: DashMap<Url, Arc<Document>>,
    cancel_token: CancellationToken,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            engine: Arc::new(RwLock::new(None)),
            settings: RwLock::new(Settings::default()),
            documents: DashMap::new(),
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn engine(&self) -> Option<Arc<SchemaEngine>> {
        self.engine.read().await.clone()
    }

    pub async fn language(&self) -> DisplayLanguage {
        self.settings.read().await.language
    }

    async fn configure(&self, options: Option<&Value>) -> vtscope_core::Result<Arc<SchemaEngine>> {
        let mut settings = Settings::load()?;
        if let Some(options) = options {
            settings.merge_json(options)?;
        }
        let engine = Arc::new(SchemaEngine::from_settings(&settings)?);
        *self.settings.write().await = settings;
        *self.engine.write().await = Some(engine.clone());
        Ok(engine)
    }

    async fn run_command(&self, command: &str, arguments: &[Value]) -> Result<Option<Value>> {
        let engine = self
            .engine()
            .await
            .ok_or_else(|| Error::invalid_params("no schema source configured"))?;

        match command {
            CMD_REFRESH_SCHEMA => {
                let model = engine
                    .fetch_schema(true)
                    .await
                    .map_err(|e| internal_error(e.to_string()))?;
                if let Err(e) = engine.fetch_translations(true).await {
                    tracing::warn!("Translations refresh failed: {}", e);
                }
                Ok(Some(serde_json::json!({ "classes": model.len() })))
            }
            CMD_CLEAR_CACHE => {
                engine
                    .clear_cache()
                    .await
                    .map_err(|e| internal_error(e.to_string()))?;
                Ok(Some(serde_json::json!({ "cleared": true })))
            }
            CMD_TRANSLATE => {
                let word = arguments
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::invalid_params("expected a word to translate"))?;
                let translation = engine.translate(word).await;
                Ok(Some(
                    serde_json::to_value(translation).map_err(|e| internal_error(e.to_string()))?,
                ))
            }
            other => Err(Error::invalid_params(format!("unknown command '{}'", other))),
        }
    }
}

fn internal_error(message: String) -> Error {
    Error {
        code: tower_lsp::jsonrpc::ErrorCode::InternalError,
        message: message.into(),
        data: None,
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        match self.configure(params.initialization_options.as_ref()).await {
            Ok(_) => {
                loader::spawn_loader(
                    self.client.clone(),
                    self.engine.clone(),
                    false,
                    self.cancel_token.clone(),
                );
            }
            Err(e) => {
                tracing::error!("Schema engine unavailable: {}", e);
                self.client
                    .log_message(
                        MessageType::ERROR,
                        format!("Schema engine unavailable: {}", e),
                    )
                    .await;
            }
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "vtscope".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn shutdown(&self) -> Result<()> {
        self.cancel_token.cancel();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.documents
            .insert(doc.uri, Arc::new(Document::new(doc.text, doc.version)));
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        if let Some(mut doc_ref) = self.documents.get_mut(&uri) {
            let doc = doc_ref.value_mut();
            let mut content = doc.content.clone();
            for change in params.content_changes {
                match change.range {
                    Some(range) => {
                        let start = offset_at(&content, range.start);
                        let end = offset_at(&content, range.end).max(start);
                        content.replace_range(start..end, &change.text);
                    }
                    None => content = change.text,
                }
            }
            *doc = Arc::new(Document::new(content, version));
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Event: did_close uri={}", params.text_document.uri),
            )
            .await;
        self.documents.remove(&params.text_document.uri);
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/completion uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = completion::completion(self, params).await;
        match &result {
            Ok(Some(CompletionResponse::Array(items))) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {} completion items", items.len()),
                    )
                    .await
            }
            Ok(_) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no completions")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = params.text_document_position_params.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/hover uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let result = hover::hover(self, params).await;
        match &result {
            Ok(Some(_)) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: found hover content")
                    .await
            }
            Ok(None) => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no hover content")
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Request: workspace/executeCommand {}", params.command),
            )
            .await;
        let result = self.run_command(&params.command, &params.arguments).await;
        match &result {
            Ok(value) => {
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!(
                            "LSP Response: {} -> {}",
                            params.command,
                            value.as_ref().unwrap_or(&Value::Null)
                        ),
                    )
                    .await
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("LSP Error: {}", e))
                    .await
            }
        }
        result
    }
}

pub async fn run_server() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = tower_lsp::LspService::new(LspServer::new);
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
