#![deny(unsafe_code)]
//! CLI binary for colorsort.
//!
//! Subcommands:
//! - `sort [TEXT]`: parse, optionally dedup, sort and print the colors
//! - `export [TEXT]`: same pipeline, written as a structured JSON export
//! - `layout [TEXT]`: swatch grid for the number of colors found
//! - `list`: print supported formats and sort keys
//!
//! Text comes from the positional argument, `--input FILE`, or stdin.

mod error;

use clap::{Args, Parser, Subcommand};
use colorsort_core::{
    parse, swatch_grid, Export, Format, PipelineOptions, SortKey, SortSpec,
};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "colorsort", about = "Extract, sort and reformat colors found in text")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log discarded tokens and pipeline details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct InputArgs {
    /// Text to scan for colors. Read from stdin when omitted.
    text: Option<String>,

    /// Read the text from a file instead.
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String, CliError> {
        match (&self.text, &self.input) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display()))),
            (None, None) => Ok(std::io::read_to_string(std::io::stdin())?),
        }
    }
}

#[derive(Args)]
struct PipelineArgs {
    /// Sort criterion as `key[:asc|:desc]` (red, green, blue, alpha, hue,
    /// saturation, lightness). Repeat up to three times. Default: red, green,
    /// blue descending.
    #[arg(short = 'b', long = "by", value_name = "KEY[:DIR]")]
    by: Vec<String>,

    /// Remove duplicate colors (alpha-sensitive) before sorting.
    #[arg(long)]
    dedup: bool,

    /// Reverse the sorted order.
    #[arg(long)]
    reverse: bool,

    /// Output notation (hex6, hex8, rgb, rgba, hsl, hsla).
    #[arg(short, long)]
    format: Option<String>,

    /// JSON file with pipeline options. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl PipelineArgs {
    fn options(&self) -> Result<PipelineOptions, CliError> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => PipelineOptions::default(),
        };
        options.dedup |= self.dedup;
        options.reverse |= self.reverse;
        if let Some(tag) = &self.format {
            options.format = tag.parse()?;
        }
        if !self.by.is_empty() {
            options.sort = SortSpec::from_terms(self.by.iter().map(String::as_str));
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Parse, sort and print colors as a comma-separated list.
    Sort {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
    /// Run the sort pipeline and write the structured export as JSON.
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output file path. Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute a swatch grid for the colors found in the text.
    Layout {
        #[command(flatten)]
        input: InputArgs,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: u32,
    },
    /// List supported output formats and sort keys.
    List,
}

fn load_config(path: &Path) -> Result<PipelineOptions, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("reading {}: {e}", path.display())))?;
    let options: PipelineOptions = serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), ?options, "loaded pipeline options");
    Ok(options)
}

fn write_export(export: &Export, path: &Path) -> Result<(), CliError> {
    let json = export.to_json_pretty()?;
    std::fs::write(path, json)
        .map_err(|e| CliError::Io(format!("writing {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let formats: Vec<&str> = Format::ALL.iter().map(|f| f.name()).collect();
            let keys: Vec<&str> = SortKey::ALL.iter().map(|k| k.name()).collect();
            if cli.json {
                let info = serde_json::json!({
                    "formats": formats,
                    "sort_keys": keys,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Formats:");
                println!("  {}", formats.join(", "));
                println!("Sort keys:");
                println!("  {}", keys.join(", "));
            }
        }
        Command::Sort { input, pipeline } => {
            let options = pipeline.options()?;
            let out = options.run(&input.read()?);
            if cli.json {
                let info = serde_json::json!({
                    "output": out.text,
                    "count": out.colors.len(),
                    "discarded": out.discarded,
                    "format": options.format,
                    "sort": options.sort,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", out.text);
            }
        }
        Command::Export {
            input,
            pipeline,
            output,
        } => {
            let export = pipeline.options()?.export(&input.read()?);
            match output {
                Some(path) => {
                    write_export(&export, &path)?;
                    if cli.json {
                        let info = serde_json::json!({
                            "count": export.len(),
                            "output": path.display().to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        eprintln!("exported {} colors -> {}", export.len(), path.display());
                    }
                }
                None => println!("{}", export.to_json_pretty()?),
            }
        }
        Command::Layout {
            input,
            width,
            height,
        } => {
            let count = parse(&input.read()?).colors.len();
            let grid = swatch_grid(count, width, height)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                println!(
                    "{count} colors in {width}x{height}: {} columns x {} rows ({:.2}% x {:.2}%)",
                    grid.columns, grid.rows, grid.column_width_pct, grid.row_height_pct
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "colorsort=debug,colorsort_core=debug"
    } else {
        "colorsort=warn,colorsort_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
