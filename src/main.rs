use clap::{Parser, ValueEnum};
use hammertrack::report::Report;
use hammertrack::{Analysis, AnalysisConfig, DetectionConfig, Stride, Trajectory};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Every nonzero x movement counts, no debouncing
    Pure,
    /// Ignore x jitter below 0.015 and debounce reversals by 10 samples
    Strict,
}

#[derive(Parser)]
#[command(name = "hammertrack", about = "Turning points and swing arcs of a tracked hammer throw")]
struct Cli {
    /// Trajectory CSV files (Frame,X,Y rows, normalized coordinates)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Detection preset
    #[arg(long, value_enum, default_value = "pure")]
    preset: Preset,

    /// JSON config file (replaces the preset)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum |dx| between consecutive samples to count as movement
    #[arg(long, allow_hyphen_values = true)]
    min_delta_x: Option<f64>,

    /// Samples required after a turning point before the next reversal
    #[arg(long)]
    min_frame_gap: Option<usize>,

    /// Turning points per segment (2 or 3)
    #[arg(short, long)]
    stride: Option<u8>,

    /// Print the analysis as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<AnalysisConfig, hammertrack::AnalysisError> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => {
            let detection = match cli.preset {
                Preset::Pure => DetectionConfig::PURE,
                Preset::Strict => DetectionConfig::STRICT,
            };
            AnalysisConfig::new(detection, Stride::Pairs)
        }
    };
    if let Some(d) = cli.min_delta_x {
        config.detection.min_delta_x = d;
    }
    if let Some(g) = cli.min_frame_gap {
        config.detection.min_frame_gap = g;
    }
    if let Some(s) = cli.stride {
        config.stride = Stride::try_from(s)?;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli).map_err(|e| e.to_string())?;

    let mut trajectories = Vec::with_capacity(cli.inputs.len());
    for path in &cli.inputs {
        let trajectory =
            Trajectory::load_csv(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        trajectories.push(trajectory);
    }
    let results = hammertrack::analyze_all(&trajectories, &config);

    if cli.json {
        let mut entries = Vec::with_capacity(results.len());
        for (path, result) in cli.inputs.iter().zip(&results) {
            let source = path.display().to_string();
            match result {
                Ok(analysis) => entries.push(JsonEntry {
                    source,
                    analysis: Some(analysis),
                    error: None,
                }),
                Err(e) if e.is_insufficient_data() => entries.push(JsonEntry {
                    source,
                    analysis: None,
                    error: Some(e.to_string()),
                }),
                Err(e) => return Err(e.to_string().into()),
            }
        }
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    // Header
    eprintln!();
    eprintln!(
        "  hammertrack \u{00b7} {} file{}",
        cli.inputs.len(),
        if cli.inputs.len() == 1 { "" } else { "s" }
    );

    for ((path, trajectory), result) in cli.inputs.iter().zip(&trajectories).zip(&results) {
        let source = path.display().to_string();
        match result {
            Ok(analysis) => print!("{}", Report::new(&source, analysis)),
            Err(e) if e.is_insufficient_data() => {
                println!();
                println!("  Analysis of {}", source);
                println!();
                println!(
                    "  Result      no motion detected ({} samples: {})",
                    trajectory.len(),
                    e
                );
            }
            Err(e) => return Err(e.to_string().into()),
        }
    }

    // Footer
    let ok = results.iter().filter(|r| r.is_ok()).count();
    eprintln!();
    eprintln!("  \u{2713} {} of {} analyzed", ok, results.len());
    eprintln!();

    Ok(())
}
