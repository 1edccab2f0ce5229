use tower_lsp::lsp_types::*;

pub const CMD_REFRESH_SCHEMA: &str = "vtscope.refreshSchema";
pub const CMD_CLEAR_CACHE: &str = "vtscope.clearCache";
pub const CMD_TRANSLATE: &str = "vtscope.translate";

pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::INCREMENTAL,
        )),
        hover_provider: Some(HoverProviderCapability::Simple(true)),
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(vec![".".to_string(), ":".to_string()]),
            resolve_provider: Some(false),
            ..Default::default()
        }),
        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![
                CMD_REFRESH_SCHEMA.to_string(),
                CMD_CLEAR_CACHE.to_string(),
                CMD_TRANSLATE.to_string(),
            ],
            ..Default::default()
        }),
        ..Default::default()
    }
}
