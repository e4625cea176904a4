//! Command-line front end: load the trained parameters once, then normalize
//! and classify a drawn digit read from an image or a text matrix file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ferrite_digit::canvas::render_ascii;
use ferrite_digit::config::ParamArgs;
use ferrite_digit::network::text_format::load_matrix;
use ferrite_digit::{normalize, DigitError, Network, RawMask};

/// Exit status for "nothing was drawn".
const EXIT_EMPTY: i32 = 2;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    params: ParamArgs,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one drawing (PNG/JPEG/BMP/GIF, or a "rows cols" text matrix).
    Classify {
        input: PathBuf,
        /// Print the full result as JSON.
        #[clap(long)]
        json: bool,
        /// Print the normalized 28×28 image before the result.
        #[clap(long)]
        preview: bool,
    },
    /// Load and validate the parameter set, then report the layer widths.
    CheckParams,
    /// Write the loaded parameters as a single JSON bundle.
    ExportJson { out: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let params = args.params.load().context("failed to load network parameters")?;

    match args.command {
        Command::CheckParams => {
            let (h1, h2) = params.hidden_sizes();
            println!("ok: 784 -> {} -> {} -> 10", h1, h2);
        }
        Command::ExportJson { out } => {
            params
                .save_json(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!("wrote parameter bundle to {}", out.display());
        }
        Command::Classify { input, json, preview } => {
            let network = Network::from_parameters(&params)?;
            let mask = read_mask(&input)?;

            let image = match normalize(&mask) {
                Ok(image) => image,
                Err(DigitError::InputEmpty) => {
                    println!("no digit drawn");
                    std::process::exit(EXIT_EMPTY);
                }
                Err(e) => return Err(e).context("normalization failed"),
            };
            if preview {
                print!("{}", render_ascii(image.as_matrix()));
            }

            let result = network.classify(&image)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {:.2}%", result.label, result.confidence_percent());
            }
        }
    }
    Ok(())
}

fn read_mask(path: &Path) -> Result<RawMask> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let mask = match ext.as_str() {
        "png" | "jpg" | "jpeg" | "bmp" | "gif" => RawMask::open_image(path),
        _ => load_matrix(path).map(RawMask::from_matrix),
    };
    mask.with_context(|| format!("failed to read drawing from {}", path.display()))
}
