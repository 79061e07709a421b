use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sepiabmp::{BitmapError, ErrorKind, Limits, Sepia};

#[derive(Parser)]
#[command(name = "sepiabmp")]
#[command(about = "Filters for uncompressed 24-bit BMP images")]
struct Cli {
    /// Log decoder and encoder details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tone a 24-bit BMP in sepia
    Sepia {
        /// Input BMP file
        input: PathBuf,

        /// Opacity of the effect, from 0 (unchanged) to 1 (full sepia)
        #[arg(allow_negative_numbers = true)]
        fraction: String,

        /// Output BMP file
        #[arg(short, long, default_value = "sepia.bmp")]
        output: PathBuf,

        /// Refuse inputs with more pixels than this
        #[arg(long)]
        max_pixels: Option<u64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "sepiabmp=debug"
    } else {
        "sepiabmp=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let result = match cli.command {
        Commands::Sepia {
            input,
            fraction,
            output,
            max_pixels,
        } => run_sepia_command(&input, &fraction, &output, max_pixels),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    }
}

/// Decode, tone and re-encode one file.
fn run_sepia_command(
    input: &Path,
    fraction: &str,
    output: &Path,
    max_pixels: Option<u64>,
) -> anyhow::Result<()> {
    let sepia = parse_fraction(fraction)?;
    let limits = Limits {
        max_pixels,
        ..Default::default()
    };

    let bitmap = sepiabmp::read_bmp_file_with_limits(input, &limits)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let toned = sepiabmp::apply_filter(&bitmap, &sepia)?;
    sepiabmp::write_bmp_file(&toned, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        width = toned.width(),
        height = toned.height(),
        strength = sepia.strength(),
        "wrote {}",
        output.display()
    );
    Ok(())
}

/// FRACTION is parsed here rather than by clap so a malformed value is
/// `InvalidInput` like an out-of-range one.
fn parse_fraction(arg: &str) -> Result<Sepia, BitmapError> {
    let fraction = arg.trim().parse::<f32>().map_err(|_| {
        BitmapError::InvalidInput(format!("sepia fraction {arg:?} is not a number"))
    })?;
    Sepia::from_fraction(fraction)
}

/// Distinct exit code per failure kind; 1 for anything unclassified.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let Some(bitmap_err) = err.downcast_ref::<BitmapError>() else {
        return ExitCode::FAILURE;
    };
    ExitCode::from(match bitmap_err.kind() {
        ErrorKind::Io => 3,
        ErrorKind::Format => 4,
        ErrorKind::Unsupported => 5,
        ErrorKind::InvalidInput => 6,
    })
}
