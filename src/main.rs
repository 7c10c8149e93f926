use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use tadoku_stats::config::Config;
use tadoku_stats::snapshot::Snapshot;
use tadoku_stats::ConversionTable;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_DATA: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// Tab-separated rows for scripting
    Tsv,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank a saved snapshot (default if no subcommand)
    Rank {
        /// Snapshot file (defaults to the configured snapshot path)
        snapshot: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Fetch contest results and save them as a snapshot
    Fetch {
        /// Where to write the snapshot (defaults to the configured snapshot path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch contest results and rank them without touching the saved snapshot
    Run {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Also save the fetched snapshot here
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the built-in configuration as YAML
    DefaultConfig,
}

#[derive(Parser, Debug)]
#[command(name = "tadoku-stats")]
#[command(about = "Reading contest ranking tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tadoku-stats/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn snapshot_path(explicit: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(path) = explicit.or_else(|| config.snapshot.clone()) {
        return path;
    }
    match tadoku_stats::snapshot::get_snapshot_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn print_rankings(
    snapshot: &Snapshot,
    conversion: &ConversionTable,
    format: OutputFormat,
    verbose: bool,
) {
    if snapshot.conversion_mismatch(&conversion.version) {
        tracing::warn!(
            "snapshot was taken under conversion table {}, ranking with {}",
            snapshot.conversion_version.as_deref().unwrap_or("?"),
            conversion.version
        );
    }

    let set = match tadoku_stats::run(&snapshot.entries, conversion) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Ranking failed: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    match format {
        OutputFormat::Table => {
            let use_colors = tadoku_stats::output::should_use_colors();
            println!("{}", tadoku_stats::output::format_ranking_tables(&set, use_colors));
            if verbose {
                eprintln!();
                eprintln!("{}", tadoku_stats::output::format_summary(&set));
            }
        }
        OutputFormat::Tsv => {
            let tsv = tadoku_stats::output::format_tsv(&set);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => match tadoku_stats::output::format_json(&set) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize rankings: {}", e);
                std::process::exit(EXIT_DATA);
            }
        },
    }
}

async fn fetch_or_exit(config: &Config, conversion: &ConversionTable) -> Snapshot {
    match tadoku_stats::fetch::fetch_snapshot(&config.source, conversion).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Fetch failed: {:#}", e);
            std::process::exit(EXIT_NETWORK);
        }
    }
}

fn save_or_exit(path: &Path, snapshot: &Snapshot) {
    if let Err(e) = tadoku_stats::snapshot::save_snapshot(path, snapshot) {
        eprintln!("Failed to save snapshot: {:#}", e);
        std::process::exit(EXIT_DATA);
    }
}

#[tokio::main]
async fn main() {
    tadoku_stats::fetch::install_crypto_provider();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank {
        snapshot: None,
        format: OutputFormat::default(),
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match tadoku_stats::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = tadoku_stats::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let conversion = config.effective_conversion();
    tracing::debug!("using conversion table {}", conversion.version);

    match command {
        Commands::Rank { snapshot, format } => {
            let path = snapshot_path(snapshot, &config);
            let snapshot = match tadoku_stats::snapshot::load_snapshot(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Snapshot error: {:#}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            print_rankings(&snapshot, &conversion, format, cli.verbose);
        }
        Commands::Fetch { output } => {
            let path = snapshot_path(output, &config);
            let snapshot = fetch_or_exit(&config, &conversion).await;
            save_or_exit(&path, &snapshot);
            println!(
                "Saved {} entries from {} participants to {}",
                snapshot.entries.len(),
                snapshot.participant_count(),
                path.display()
            );
        }
        Commands::Run { format, save } => {
            let snapshot = fetch_or_exit(&config, &conversion).await;
            if let Some(path) = save {
                save_or_exit(&path, &snapshot);
            }
            print_rankings(&snapshot, &conversion, format, cli.verbose);
        }
        Commands::DefaultConfig => {
            let defaults = Config {
                conversion: Some(ConversionTable::default()),
                ..Config::default()
            };
            match serde_saphyr::to_string(&defaults) {
                Ok(yaml) => print!("{}", yaml),
                Err(e) => {
                    eprintln!("Failed to serialize default config: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
    }

    tracing::debug!("finished in {:?}", start_time.elapsed());
    std::process::exit(EXIT_SUCCESS);
}
