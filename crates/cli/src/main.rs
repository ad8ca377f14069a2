use clap::{Parser, Subcommand};
use defi_radar_core::{AppConfig, ConfigLoader, SortMode};
use defi_radar_scanner::{top_picks, Category, Radar};

mod formatter;

use formatter::SnapshotFormatter;

#[derive(Parser)]
#[command(name = "defi-radar")]
#[command(about = "Classify and rank DeFi yield opportunities and meme markets", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config/Config.toml", env = "RADAR_CONFIG")]
    config: String,

    /// Override the sort mode (apy, apr, tvl, ror)
    #[arg(long, global = true, value_parser = parse_sort_mode)]
    sort_mode: Option<SortMode>,

    /// Profile overlay loaded next to the config file (e.g. `prod` for Config.prod.toml)
    #[arg(long, global = true, env = "RADAR_PROFILE")]
    profile: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Optional log file path (logs to file instead of stderr)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full refresh: yield buckets, top picks and meme markets
    Scan,
    /// Classify yield pools only
    Yields {
        /// Show a single bucket (long_term, short_term, focus, layer2)
        #[arg(long, value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Scan meme markets only
    Memes,
}

fn parse_sort_mode(s: &str) -> Result<SortMode, String> {
    s.parse().map_err(|e: defi_radar_core::ConfigError| e.to_string())
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli.config, cli.profile.as_deref(), cli.sort_mode)?;
    let radar = Radar::from_config(&config)?;

    match cli.command {
        Commands::Scan => {
            let snapshot = radar.refresh().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("{}", SnapshotFormatter::format(&snapshot));
            }
        }
        Commands::Yields { category } => {
            let buckets = radar.yields().await;
            match (category, cli.json) {
                (Some(category), true) => {
                    println!("{}", serde_json::to_string_pretty(buckets.get(category))?);
                }
                (Some(category), false) => {
                    let entries = buckets.get(category);
                    println!("{}", SnapshotFormatter::format_bucket(category, entries));
                }
                (None, true) => println!("{}", serde_json::to_string_pretty(&buckets)?),
                (None, false) => {
                    let picks = top_picks(&buckets, radar.config().top_picks_limit);
                    println!("{}", SnapshotFormatter::format_top_picks(&picks));
                    println!("{}", SnapshotFormatter::format_buckets(&buckets));
                }
            }
        }
        Commands::Memes => {
            let memes = radar.memes().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&memes)?);
            } else {
                println!("{}", SnapshotFormatter::format_memes(&memes));
            }
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<&str>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            // Stdout carries the report; logs go to stderr
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn load_config(
    path: &str,
    profile: Option<&str>,
    sort_mode: Option<SortMode>,
) -> anyhow::Result<AppConfig> {
    use anyhow::Context;

    let loaded = match profile {
        Some(profile) => ConfigLoader::load_profile_from(path, profile),
        None => ConfigLoader::load_from(path),
    };
    let mut config = loaded.with_context(|| format!("Failed to load config: {path}"))?;

    if let Some(mode) = sort_mode {
        config.scanner.sort_mode = mode;
    }

    tracing::info!(
        "Loaded config from {} (sort mode: {}, min APY: {}, min TVL: {})",
        path,
        config.scanner.sort_mode,
        config.scanner.min_apy,
        config.scanner.min_tvl
    );

    Ok(config)
}
