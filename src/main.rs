//! # yeardots CLI
//!
//! Command-line interface for rendering year progress images.
//!
//! ## Usage
//!
//! ```bash
//! # Serve /generate on port 4173
//! yeardots serve --listen 0.0.0.0:4173 --tz America/Santiago
//!
//! # Save today's story image
//! yeardots render --preset story --format jpg
//!
//! # Regenerate the Open Graph preview
//! yeardots render --preset og -o public/og.png
//!
//! # Print progress as JSON
//! yeardots progress --date 2026-03-01
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use yeardots::{
    YearDotsError, YearProgress,
    calendar::compute_year_progress,
    encode::{DEFAULT_QUALITY, OutputFormat},
    render::{self, Preset, RenderOptions},
    server::{self, DEFAULT_LISTEN_ADDR, ServerConfig},
};

/// yeardots - Year progress image generator
#[derive(Parser, Debug)]
#[command(name = "yeardots")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "YEARDOTS_LISTEN", default_value = DEFAULT_LISTEN_ADDR)]
        listen: String,

        /// Default IANA time zone for requests without `tz`
        #[arg(long, env = "YEARDOTS_TZ")]
        tz: Option<String>,
    },

    /// Render an image to a file
    Render {
        /// Output preset: square, story or og
        #[arg(long, default_value = "square")]
        preset: Preset,

        /// Custom width in pixels (requires --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Custom height in pixels (requires --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Image format: png or jpg
        #[arg(long, default_value = "png")]
        format: OutputFormat,

        /// JPEG quality (1-100)
        #[arg(long, default_value_t = DEFAULT_QUALITY)]
        quality: u8,

        /// IANA time zone used to pick the calendar date
        #[arg(long, env = "YEARDOTS_TZ")]
        tz: Option<String>,

        /// Render for this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output file (defaults to year-dots-{year}-{preset}.{ext})
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print year progress as JSON
    Progress {
        /// IANA time zone used to pick the calendar date
        #[arg(long, env = "YEARDOTS_TZ")]
        tz: Option<String>,

        /// Use this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), YearDotsError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, tz } => {
            let config = ServerConfig {
                listen_addr: listen,
                default_time_zone: tz,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))?;
        }
        Commands::Render {
            preset,
            width,
            height,
            format,
            quality,
            tz,
            date,
            output,
        } => {
            let preset = match (width, height) {
                (Some(width), Some(height)) => Preset::custom(width, height)?,
                _ => preset,
            };
            let progress = resolve_progress(date, tz.as_deref())?;
            let options = RenderOptions { format, quality };

            let bytes = render::render_preset(preset, &progress, &options)?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(render::file_name(progress.year, preset, format)));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &bytes)?;

            println!(
                "Saved {} ({}x{}) for {}: {}/{} ({}%)",
                path.display(),
                preset.dimensions().0,
                preset.dimensions().1,
                progress.year,
                progress.filled,
                progress.total,
                progress.percent
            );
        }
        Commands::Progress { tz, date } => {
            let progress = resolve_progress(date, tz.as_deref())?;
            let json = serde_json::to_string_pretty(&progress)
                .map_err(|e| YearDotsError::Encoding(format!("JSON: {}", e)))?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Progress for an explicit date, or for now in `tz`.
fn resolve_progress(
    date: Option<NaiveDate>,
    tz: Option<&str>,
) -> Result<YearProgress, YearDotsError> {
    match date {
        Some(date) => Ok(YearProgress::for_date(date)),
        None => compute_year_progress(Utc::now(), tz),
    }
}
