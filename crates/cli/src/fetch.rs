use tracing::{info, warn};
use vtscope_core::{SchemaEngine, Settings};

pub async fn run(settings: &Settings, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SchemaEngine::from_settings(settings)?;
    info!("Loading schema from {}...", engine.origin());

    let start = std::time::Instant::now();
    let model = engine.fetch_schema(force).await?;
    let translations = match engine.fetch_translations(force).await {
        Ok(table) => table.len(),
        Err(e) => {
            warn!("Translations unavailable: {}", e);
            0
        }
    };

    println!(
        "Loaded {} classes and {} translations in {:?}",
        model.len(),
        translations,
        start.elapsed()
    );
    println!("Cache: {}", settings.cache_dir().display());
    Ok(())
}

pub async fn translate(settings: &Settings, word: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SchemaEngine::from_settings(settings)?;
    engine.fetch_schema(false).await?;
    if let Err(e) = engine.fetch_translations(false).await {
        warn!("Translations unavailable, using schema names only: {}", e);
    }

    match engine.translate(word).await {
        Some(t) => println!("{} -> {} ({}, {:?})", t.source, t.target, t.target_language, t.kind),
        None => println!("No translation known for '{}'", word),
    }
    Ok(())
}
