use std::path::Path;
use tabled::{Table, Tabled};
use vtscope_api::Position;
use vtscope_core::completion::{CandidateKind, candidates_for};
use vtscope_core::{SchemaEngine, Settings, TypeInference};

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Alt")]
    alt: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Type")]
    detail: String,
    #[tabled(rename = "Declared in")]
    source: String,
}

pub async fn show_class(settings: &Settings, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let engine = SchemaEngine::from_settings(settings)?;
    let model = engine.fetch_schema(false).await?;

    let Some(class) = model.class_by_name(name) else {
        println!("Class not found: {}", name);
        return Ok(());
    };

    println!("Class:      {} ({})", class.name, class.id);
    if let Some(alt) = &class.alt_name {
        println!("English:    {}", alt);
    }
    let ancestors: Vec<&str> = model
        .lineage(class)
        .skip(1)
        .map(|c| c.name.as_str())
        .collect();
    if !ancestors.is_empty() {
        println!("Extends:    {}", ancestors.join(" -> "));
    }
    if let Some(doc) = &class.description {
        println!("\n{}", doc);
    }

    let rows: Vec<CandidateRow> = candidates_for(class, &model, settings.language)
        .into_iter()
        .map(|c| CandidateRow {
            name: c.label,
            alt: c.alt_label.unwrap_or_default(),
            kind: match c.kind {
                CandidateKind::Member => "member",
                CandidateKind::Association => "association",
                CandidateKind::Class => "class",
            },
            detail: c.detail,
            source: c.source_class,
        })
        .collect();

    if rows.is_empty() {
        println!("\nNo members or associations.");
    } else {
        println!("\n{}", Table::new(rows));
    }
    Ok(())
}

pub async fn resolve(
    settings: &Settings,
    file: &Path,
    line: u32,
    chain: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = tokio::fs::read_to_string(file).await?;
    let engine = SchemaEngine::from_settings(settings)?;
    let model = engine.fetch_schema(false).await?;

    let inference = TypeInference::new(&model, &text);
    let result = inference.resolve_chain(Position::line_start(line.saturating_sub(1)), chain);

    match result.type_name {
        Some(type_name) if result.is_collection => println!("{}: {}[]", chain, type_name),
        Some(type_name) => println!("{}: {}", chain, type_name),
        None => println!("{}: unresolved", chain),
    }
    Ok(())
}
