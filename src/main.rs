use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colormap_core::table::{sample_rows, stop_rows, TableRow};
use colormap_maker::{ConfigStore, EditSession, Rgb, SourceExportOptions};
use log::{debug, error, warn};
use std::path::PathBuf;

/// Colormap Maker - build piecewise-linear colormaps and export them for PlotPy
#[derive(Parser, Debug, Clone)]
#[command(name = "colormap-maker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0", global = true)]
    debug: u8,

    /// Use this config file instead of the per-user one
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create a black-to-white colormap file
    New {
        file: PathBuf,
        /// Colormap name stored in the file
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the color stops
    Show { file: PathBuf },
    /// Add a color stop
    Add {
        file: PathBuf,
        /// Position between 0 and 1 (defaults to the middle of the widest gap)
        position: Option<f64>,
        /// Stop color as #RRGGBB (defaults to the gradient's current color)
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgb>,
    },
    /// Remove a color stop by index
    Remove { file: PathBuf, index: usize },
    /// Move and/or recolor a color stop
    Update {
        file: PathBuf,
        index: usize,
        #[arg(long)]
        position: Option<f64>,
        #[arg(long, value_parser = parse_color)]
        color: Option<Rgb>,
    },
    /// Print evenly spaced samples of the gradient
    Sample {
        file: PathBuf,
        /// Number of samples (defaults to the configured resolution)
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,
    },
    /// Write a Python module that rebuilds the colormap in PlotPy
    Export {
        file: PathBuf,
        output: PathBuf,
        /// Default name of the generated colormap
        #[arg(long)]
        name: Option<String>,
        /// Number of precomputed samples (16 to 4096)
        #[arg(short = 'n', long = "count")]
        count: Option<usize>,
    },
}

fn parse_color(s: &str) -> Result<Rgb, String> {
    s.parse::<Rgb>().map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    debug!("Starting colormap-maker v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut store = ConfigStore::open(cli.config.as_deref());
    let config = &mut store.config;

    match cli.command {
        Command::New { file, name } => {
            let name = name.unwrap_or_else(|| config.default_name.clone());
            let mut session = EditSession::new(name);
            session.save_as(&file)?;
            config.remember_directory(&file);
            println!("Created {}", file.display());
        }
        Command::Show { file } => {
            let session = EditSession::open(&file)?;
            println!("{} ({} stops)", session.name(), session.colormap().len());
            print_rows(&stop_rows(session.colormap()));
        }
        Command::Add {
            file,
            position,
            color,
        } => {
            let mut session = EditSession::open(&file)?;
            let position =
                position.unwrap_or_else(|| session.colormap().suggest_new_stop_position());
            let index = session
                .add_stop(position, color)
                .context("Could not add color stop")?;
            session.save()?;
            println!("Added stop {} at {:.4}", index, position);
        }
        Command::Remove { file, index } => {
            let mut session = EditSession::open(&file)?;
            session
                .remove_stop(index)
                .context("Could not remove color stop")?;
            session.save()?;
            println!("Removed stop {}", index);
        }
        Command::Update {
            file,
            index,
            position,
            color,
        } => {
            let mut session = EditSession::open(&file)?;
            let result = session.update_stop(index, position, color);
            // Keep a color change that came with a rejected boundary move
            if session.is_modified() {
                session.save()?;
            }
            result.context("Could not update color stop")?;
            if let Some(stop) = session.colormap().get(index) {
                println!("Stop {} now at {:.4} {}", index, stop.position, stop.color);
            }
        }
        Command::Sample { file, count } => {
            let session = EditSession::open(&file)?;
            let count = count.unwrap_or_else(|| config.effective_num_colors());
            print_rows(&sample_rows(session.colormap(), count));
        }
        Command::Export {
            file,
            output,
            name,
            count,
        } => {
            let session = EditSession::open(&file)?;
            let options = SourceExportOptions {
                name: name.unwrap_or_else(|| session.name().to_string()),
                num_colors: count.unwrap_or_else(|| config.effective_num_colors()),
            };
            session.export_source(&output, &options)?;
            config.remember_directory(&output);
            println!("Exported {}", output.display());
        }
    }

    if let Err(e) = store.persist() {
        warn!("Failed to save config: {:#}", e);
    }
    Ok(())
}

fn print_rows(rows: &[TableRow]) {
    println!("{:>5}  {:>8}  {:<8}  RGB", "Index", "Position", "Hex");
    for row in rows {
        println!(
            "{:>5}  {:>8}  {:<8}  {}",
            row.index,
            row.position_label(),
            row.hex_label(),
            row.rgb_label()
        );
    }
}
