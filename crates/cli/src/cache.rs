use clap::Subcommand;
use tabled::{Table, Tabled};
use vtscope_core::Settings;

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache statistics
    Stats,
    /// Clear the cache
    Clear,
}

#[derive(Tabled)]
struct DatasetRow {
    #[tabled(rename = "Dataset")]
    key: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Expired")]
    expired: bool,
}

pub fn run(settings: &Settings, cmd: CacheCommands) -> Result<(), Box<dyn std::error::Error>> {
    let cache_dir = settings.cache_dir();

    match cmd {
        CacheCommands::Stats => {
            let stats = vtscope_core::cache::stats(&cache_dir, settings.cache_lifetime());
            println!("Cache Directory: {}", stats.cache_dir.display());
            println!("Lifetime:        {} days", stats.lifetime_days);
            println!("Datasets:        {}", stats.datasets.len());

            let rows: Vec<DatasetRow> = stats
                .datasets
                .into_iter()
                .map(|d| DatasetRow {
                    key: d.key,
                    file: d
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    size: format_size(d.size_bytes),
                    age: format_age(d.age_secs),
                    expired: d.expired,
                })
                .collect();

            if !rows.is_empty() {
                println!("\n{}", Table::new(rows));
            }
        }
        CacheCommands::Clear => {
            let removed = vtscope_core::cache::clear_dir(&cache_dir)?;
            println!("Removed {} cached datasets.", removed);
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}

fn format_age(age: u64) -> String {
    if age < 60 {
        format!("{}s ago", age)
    } else if age < 3600 {
        format!("{}m ago", age / 60)
    } else if age < 86400 {
        format!("{}h ago", age / 3600)
    } else {
        format!("{}d ago", age / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_and_ages_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_age(59), "59s ago");
        assert_eq!(format_age(3 * 86400 + 5), "3d ago");
    }
}
