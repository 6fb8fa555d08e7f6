// tunestash - personal music library manager
// Loads the catalog and accounts, then hands the terminal to the menu loop

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use tunestash::{AccountDirectory, Catalog, Config};
use tunestash::ui::App;

#[derive(Parser)]
#[command(name = "tunestash")]
#[command(about = "Import songs from a catalog, rate them, play them and build playlists")]
struct Args {
    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog directory (overrides the config)
    #[arg(long)]
    catalog_dir: Option<PathBuf>,

    /// Account file (overrides the config)
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "tunestash.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tunestash=debug"));

    // the menus own stdout, so logs only reach the terminal in dev mode
    let writer = if dev {
        BoxMakeWriter::new(file_writer.and(io::stderr))
    } else {
        BoxMakeWriter::new(file_writer)
    };

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if dev {
        eprintln!("🔧 Dev mode: debug output to stderr + file");
    }
    Ok(guard)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    if let Some(dir) = args.catalog_dir {
        config.catalog_dir = dir;
    }
    if let Some(path) = args.accounts {
        config.accounts_path = path;
    }

    let _guard = init_logging(&config.log_dir, args.dev)?;
    info!("🎵 tunestash starting up");

    let (catalog, report) = Catalog::load(&config.catalog_dir, &config.catalog_index);
    println!(
        "📀 Loaded {} albums from {}",
        report.loaded,
        config.catalog_dir.display()
    );
    if !report.skipped.is_empty() {
        println!("⚠️  Skipped {} albums (see the log for details)", report.skipped.len());
    }

    let mut accounts = AccountDirectory::load(&config.accounts_path);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = App::new(&catalog, &mut accounts, stdin.lock(), stdout.lock())
        .with_suggestions(config.ui.suggestions);
    app.run().context("running the menu loop")?;

    info!("tunestash shut down cleanly");
    Ok(())
}
