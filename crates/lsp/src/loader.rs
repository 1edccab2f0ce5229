use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;
use vtscope_core::SchemaEngine;

/// Load schema and translations in the background so `initialize` returns
/// immediately. Requests before the first load simply find no snapshot.
pub fn spawn_loader(
    client: Client,
    engine_lock: Arc<RwLock<Option<Arc<SchemaEngine>>>>,
    force_refresh: bool,
    cancel_token: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!("Schema load cancelled");
            }
            _ = load(&client, &engine_lock, force_refresh) => {}
        }
    });
}

async fn load(
    client: &Client,
    engine_lock: &Arc<RwLock<Option<Arc<SchemaEngine>>>>,
    force_refresh: bool,
) {
    let start = std::time::Instant::now();

    let engine = {
        let lock = engine_lock.read().await;
        match lock.as_ref() {
            Some(e) => e.clone(),
            None => {
                client
                    .log_message(MessageType::ERROR, "Schema engine not initialized")
                    .await;
                return;
            }
        }
    };

    client
        .log_message(
            MessageType::INFO,
            format!("Vertec schema loading from {}", engine.origin()),
        )
        .await;

    let model = match engine.fetch_schema(force_refresh).await {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Schema load failed: {}", e);
            client
                .log_message(MessageType::ERROR, format!("Schema load failed: {}", e))
                .await;
            return;
        }
    };

    let translations = match engine.fetch_translations(force_refresh).await {
        Ok(table) => table.len(),
        Err(e) => {
            tracing::warn!("Translations unavailable: {}", e);
            client
                .log_message(
                    MessageType::WARNING,
                    format!("Translations unavailable: {}", e),
                )
                .await;
            0
        }
    };

    let msg = format!(
        "Schema ready in {:?}: {} classes, {} translations",
        start.elapsed(),
        model.len(),
        translations
    );
    tracing::info!("{}", msg);
    client.log_message(MessageType::INFO, msg).await;
}
