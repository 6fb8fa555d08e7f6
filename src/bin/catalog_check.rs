// Catalog sanity checker - loads a catalog directory and reports what's in it
// Handy after editing album files by hand

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tunestash::{Catalog, Config};

#[derive(Parser)]
#[command(name = "catalog_check")]
#[command(about = "Validate a tunestash catalog directory")]
struct Args {
    /// Catalog directory (defaults to the configured one)
    dir: Option<PathBuf>,

    /// Index file inside the directory
    #[arg(long)]
    index: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let (dir, index) = match (args.dir, args.index) {
        (Some(dir), Some(index)) => (dir, index),
        (dir, index) => {
            let config = Config::load().context("loading config")?;
            (
                dir.unwrap_or(config.catalog_dir),
                index.unwrap_or(config.catalog_index),
            )
        }
    };

    println!("🔍 Checking catalog in {}", dir.display());
    let (catalog, report) = Catalog::load(&dir, &index);

    // genre -> (albums, songs)
    let mut genres: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for album in catalog.albums() {
        let entry = genres.entry(album.genre().to_string()).or_default();
        entry.0 += 1;
        entry.1 += album.len();
    }

    println!(
        "📀 {} albums, {} songs",
        catalog.len(),
        catalog.song_count()
    );
    for (genre, (albums, songs)) in &genres {
        println!("   {:<20} {:>4} albums {:>6} songs", genre, albums, songs);
    }

    if report.skipped.is_empty() {
        println!("✅ No problems found");
    } else {
        println!("⚠️  {} albums skipped:", report.skipped.len());
        for skipped in &report.skipped {
            println!("   {} - {}", skipped.entry, skipped.reason);
        }
        std::process::exit(1);
    }

    Ok(())
}
