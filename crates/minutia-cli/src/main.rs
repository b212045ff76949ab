//! Command-line interface for fingerprint minutiae extraction.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use minutia::{
    DebugCollectConfig, DetectConfig, EncodingMethod, MinutiaKind, MinutiaeDetector, MinutiaeSet,
    OrientationMap,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "minutia")]
#[command(about = "Detect fingerprint minutiae in ridge skeletons and encode feature vectors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect terminations and bifurcations in a skeleton image.
    Detect(CliDetectArgs),

    /// Encode a detected minutiae set relative to its core point.
    Extract(CliExtractArgs),
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the skeleton image (single-pixel-wide ridges).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the minutiae set (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Orientation map (JSON with width, height, angles) used to attach ridge angles.
    #[arg(long)]
    orientation: Option<PathBuf>,

    /// Pixel value marking a ridge. Use 255 for skeletons saved as 0/255.
    #[arg(long, default_value_t = 1)]
    ridge_value: u8,

    /// Keep minutiae whose ridge runs off the image edge.
    #[arg(long)]
    keep_border: bool,

    /// Block radius for orientation lookups.
    #[arg(long, default_value_t = 3)]
    orientation_block_radius: u32,

    /// Path to write a versioned debug dump of scanned blocks (JSON).
    #[arg(long)]
    debug_json: Option<PathBuf>,

    /// Maximum number of blocks to record in the debug dump.
    #[arg(long, default_value_t = 2000)]
    debug_max_blocks: usize,

    /// Also record blocks that are not minutiae in the debug dump.
    #[arg(long)]
    debug_store_all: bool,
}

impl CliDetectArgs {
    fn to_config(&self) -> DetectConfig {
        DetectConfig {
            ridge_value: self.ridge_value,
            remove_invalid: !self.keep_border,
            orientation_block_radius: self.orientation_block_radius,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Polar,
    Circular,
}

impl MethodArg {
    fn to_core(self) -> EncodingMethod {
        match self {
            Self::Polar => EncodingMethod::Polar,
            Self::Circular => EncodingMethod::Circular,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct CliExtractArgs {
    /// Minutiae set written by `detect` (JSON).
    #[arg(long)]
    minutiae: PathBuf,

    /// Feature encoding.
    #[arg(long, value_enum)]
    method: MethodArg,

    /// Ring width in pixels (circular encoding).
    #[arg(long)]
    bucket_size: Option<f64>,

    /// Core point as ROW,COL, added to the set before encoding.
    #[arg(long, value_parser = parse_core)]
    core: Option<(u32, u32)>,

    /// Path to write the feature vector (JSON).
    #[arg(long)]
    out: PathBuf,
}

fn parse_core(s: &str) -> Result<(u32, u32), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid core row '{}': {}", row, e))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid core col '{}': {}", col, e))?;
    Ok((row, col))
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::Extract(args) => run_extract(&args),
    }
}

// ── detect ─────────────────────────────────────────────────────────────

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    tracing::info!("Loading skeleton: {}", args.image.display());

    let img = image::open(&args.image).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.image.display(), e).into()
    })?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let orientation = match &args.orientation {
        Some(path) => {
            let map = OrientationMap::from_json_file(path).map_err(|e| -> CliError {
                format!("Failed to load orientation map {}: {}", path.display(), e).into()
            })?;
            if (map.width(), map.height()) != (w, h) {
                tracing::warn!(
                    "Orientation map is {}x{}, skeleton is {}x{}; lookups are clamped",
                    map.width(),
                    map.height(),
                    w,
                    h
                );
            }
            Some(map)
        }
        None => None,
    };
    let orientation_ref = orientation
        .as_ref()
        .map(|m| m as &dyn minutia::OrientationField);

    let detector = MinutiaeDetector::with_config(args.to_config());

    let (minutiae, debug_dump) = if args.debug_json.is_some() {
        let dbg_cfg = DebugCollectConfig {
            image_path: Some(args.image.display().to_string()),
            max_blocks: args.debug_max_blocks,
            store_non_minutiae: args.debug_store_all,
        };
        let (m, d) = detector.detect_with_debug(&gray, orientation_ref, &dbg_cfg);
        (m, Some(d))
    } else {
        let m = match orientation_ref {
            Some(field) => detector.detect_with_orientation(&gray, field),
            None => detector.detect(&gray),
        };
        (m, None)
    };

    tracing::info!(
        "Detected {} minutiae ({} terminations, {} bifurcations)",
        minutiae.len(),
        minutiae.count(MinutiaKind::Termination),
        minutiae.count(MinutiaKind::Bifurcation),
    );

    let json = serde_json::to_string_pretty(&minutiae)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Minutiae written to {}", args.out.display());

    if let (Some(debug_path), Some(dump)) = (&args.debug_json, debug_dump) {
        let debug_json = serde_json::to_string_pretty(&dump)?;
        std::fs::write(debug_path, &debug_json)?;
        tracing::info!("Debug dump written to {}", debug_path.display());
    }

    Ok(())
}

// ── extract ────────────────────────────────────────────────────────────

fn run_extract(args: &CliExtractArgs) -> CliResult<()> {
    let text = std::fs::read_to_string(&args.minutiae).map_err(|e| -> CliError {
        format!("Failed to read {}: {}", args.minutiae.display(), e).into()
    })?;
    let mut minutiae: MinutiaeSet = serde_json::from_str(&text)?;

    if let Some((row, col)) = args.core {
        tracing::info!("Adding core point at ({}, {})", row, col);
        minutiae = minutiae.with_core(row, col);
    }

    let method = args.method.to_core();
    let (features, method) = minutia::extract(&minutiae, method.as_str(), args.bucket_size)?;
    tracing::info!("{} feature vector with {} entries", method, features.len());

    let json = serde_json::to_string_pretty(&features)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Features written to {}", args.out.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_argument_parses_row_then_col() {
        assert_eq!(parse_core("12,40"), Ok((12, 40)));
        assert_eq!(parse_core(" 3 , 7 "), Ok((3, 7)));
        assert!(parse_core("12").is_err());
        assert!(parse_core("a,1").is_err());
        assert!(parse_core("-1,1").is_err());
    }

    #[test]
    fn keep_border_disables_rejection() {
        let cli = Cli::parse_from([
            "minutia",
            "detect",
            "--image",
            "s.png",
            "--out",
            "m.json",
            "--ridge-value",
            "255",
            "--keep-border",
        ]);
        let Commands::Detect(args) = cli.command else {
            panic!("expected detect");
        };
        let cfg = args.to_config();
        assert_eq!(cfg.ridge_value, 255);
        assert!(!cfg.remove_invalid);
    }

    #[test]
    fn extract_arguments() {
        let cli = Cli::parse_from([
            "minutia",
            "extract",
            "--minutiae",
            "m.json",
            "--method",
            "circular",
            "--bucket-size",
            "8",
            "--core",
            "10,20",
            "--out",
            "f.json",
        ]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.method.to_core(), EncodingMethod::Circular);
        assert_eq!(args.bucket_size, Some(8.0));
        assert_eq!(args.core, Some((10, 20)));
    }
}
