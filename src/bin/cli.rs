//! FTV CLI
//!
//! Offline command-line interface: scans the roots in-process and prints
//! the result, no server needed.
//! - Per-day timeline
//! - Files on one day
//! - Full export
//! - Scan statistics

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ftv::config::Config;
use ftv::export::ExportFormat;
use ftv::query::{parse_date, resolve_range, TimelineService};
use ftv::storage::{EventStore, TimestampKind};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ftv-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Forensic file timeline from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory to scan (repeatable, replaces configured roots)
    #[arg(short, long = "root", global = true)]
    pub roots: Vec<PathBuf>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count events per day
    Timeline {
        /// First day (YYYY-MM-DD or now-Nd); default: earliest
        #[arg(short, long)]
        start: Option<String>,
        /// Last day; default: latest
        #[arg(short, long)]
        end: Option<String>,
        /// Timestamp kind (created, modified, accessed)
        #[arg(short, long, default_value = "modified")]
        kind: String,
    },

    /// List the files behind one day
    Detail {
        /// Day to list
        date: String,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        #[arg(short, long, default_value = "modified")]
        kind: String,
    },

    /// Export every record
    Export {
        /// Export format (csv, json, ndjson)
        #[arg(long, default_value = "csv")]
        to: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show scan statistics
    Stats,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ftv=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Timeline { start, end, kind } => {
            let store = load_store(&cli.roots, cli.config.as_deref())?;
            let Ok(kind) = kind.parse::<TimestampKind>() else {
                println!("No data (unknown kind: {})", kind);
                return Ok(());
            };

            let buckets = match resolve_range(&store, start.as_deref(), end.as_deref(), kind)? {
                Some(range) => TimelineService::filter_and_aggregate(&store, range, kind),
                None => Vec::new(),
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&buckets)?),
                "csv" => {
                    println!("date,count");
                    for b in &buckets {
                        println!("{},{}", b.date, b.count);
                    }
                }
                _ => {
                    if buckets.is_empty() {
                        println!("No data for the selected date range");
                        return Ok(());
                    }
                    println!("{} events per day", kind.label());
                    println!("{:<12} | {:>8}", "Date", "Events");
                    println!("{}", "-".repeat(23));
                    for b in &buckets {
                        println!("{:<12} | {:>8}", b.date.to_string(), b.count);
                    }
                    let total: usize = buckets.iter().map(|b| b.count).sum();
                    println!("{}", "-".repeat(23));
                    println!("{:<12} | {:>8}", "Total", total);
                }
            }
        }

        Commands::Detail {
            date,
            start,
            end,
            kind,
        } => {
            let target = parse_date(&date)?;
            let store = load_store(&cli.roots, cli.config.as_deref())?;
            let files = match kind.parse::<TimestampKind>() {
                Ok(kind) => {
                    match resolve_range(&store, start.as_deref(), end.as_deref(), kind)? {
                        Some(range) => TimelineService::detail(&store, range, kind, target),
                        None => Vec::new(),
                    }
                }
                Err(_) => Vec::new(),
            };

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&files)?),
                "csv" => {
                    let mut wtr = csv::Writer::from_writer(std::io::stdout());
                    wtr.write_record(["file_name", "file_path"])?;
                    for f in &files {
                        wtr.write_record([&f.file_name, &f.file_path])?;
                    }
                    wtr.flush()?;
                }
                _ => {
                    println!("Details for {}:", target);
                    for f in &files {
                        println!("File: {} | Path: {}", f.file_name, f.file_path);
                    }
                }
            }
        }

        Commands::Export { to, output } => {
            let format: ExportFormat = to.parse()?;
            let store = load_store(&cli.roots, cli.config.as_deref())?;
            let data = TimelineService::export_all(&store, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("writing export to {:?}", path))?;
                    println!("Exported {} records to {:?}", store.len(), path);
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&data)?;
                }
            }
        }

        Commands::Stats => {
            let store = load_store(&cli.roots, cli.config.as_deref())?;
            let stats = store.stats();
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(stats)?),
                _ => {
                    println!("FTV v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Events:  {}", stats.total_events);
                    println!("Skipped: {}", stats.total_skipped);
                    println!("Scan:    {} ms", stats.build_duration_ms);
                    println!();
                    println!("{:<40} {:>8} {:>8}", "Root", "Files", "Skipped");
                    println!("{}", "-".repeat(58));
                    for root in &stats.roots {
                        println!(
                            "{:<40} {:>8} {:>8}",
                            root.root.display().to_string(),
                            root.files,
                            root.skipped
                        );
                        if let Some(err) = &root.error {
                            println!("  error: {}", err);
                        }
                    }
                    for kind in TimestampKind::all() {
                        if let Some(range) = store.date_bounds(*kind) {
                            println!("{:<9} {}", kind.to_string(), range);
                        }
                    }
                }
            }
        }

        Commands::Config { output } => {
            let config = ftv::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Resolve roots from flags or config and build the store
fn load_store(roots: &[PathBuf], config_path: Option<&Path>) -> anyhow::Result<EventStore> {
    let mut config = match config_path {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if !roots.is_empty() {
        config.scan.roots = roots.to_vec();
    }
    if config.scan.roots.is_empty() {
        bail!("No root directories given. Use --root <DIR> or set FTV_ROOTS");
    }

    let store = EventStore::build_with_policy(&config.scan.roots, config.scan.on_root_error)?;
    if !store.skipped().is_empty() {
        eprintln!("warning: {} files could not be read", store.skipped().len());
    }
    Ok(store)
}
