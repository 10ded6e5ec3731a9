use clap::Parser;
use imgrotate::{RotateConfig, RotationEngine, SizeRounding};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const BANNER: &str = concat!(
    "--- IMAGE ROTATION BENCHMARK v",
    env!("CARGO_PKG_VERSION"),
    " ---"
);

#[derive(Parser, Debug)]
#[command(author, version, about = "Rotate a binary color pixmap (P6) by an arbitrary angle")]
struct Cli {
    /// Source pixmap.
    #[arg(value_name = "INFILE", required_unless_present = "print_example")]
    input: Option<PathBuf>,
    /// Destination pixmap.
    #[arg(value_name = "OUTFILE", required_unless_present = "print_example")]
    output: Option<PathBuf>,
    /// Counter-clockwise angle in degrees; non-numeric text reads as 0.
    #[arg(
        value_name = "ANGLE",
        allow_hyphen_values = true,
        required_unless_present = "print_example"
    )]
    angle: Option<String>,
    /// Path to an optional JSON resampling configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SizeRoundingConfig {
    Truncate,
    Round,
    Ceil,
}

impl From<SizeRounding> for SizeRoundingConfig {
    fn from(value: SizeRounding) -> Self {
        match value {
            SizeRounding::Truncate => SizeRoundingConfig::Truncate,
            SizeRounding::Round => SizeRoundingConfig::Round,
            SizeRounding::Ceil => SizeRoundingConfig::Ceil,
        }
    }
}

impl From<SizeRoundingConfig> for SizeRounding {
    fn from(value: SizeRoundingConfig) -> Self {
        match value {
            SizeRoundingConfig::Truncate => SizeRounding::Truncate,
            SizeRoundingConfig::Round => SizeRounding::Round,
            SizeRoundingConfig::Ceil => SizeRounding::Ceil,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    weight_precision: u32,
    size_rounding: SizeRoundingConfig,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = RotateConfig::default();
        Self {
            weight_precision: cfg.weight_precision,
            size_rounding: cfg.size_rounding.into(),
        }
    }
}

impl From<Config> for RotateConfig {
    fn from(value: Config) -> Self {
        Self {
            weight_precision: value.weight_precision,
            size_rounding: value.size_rounding.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    source: String,
    dest: String,
    width: usize,
    height: usize,
    megapixels: f64,
    angle_deg: u32,
    output_width: usize,
    output_height: usize,
    elapsed_secs: f64,
}

/// Parses an angle the way C `atoi` does: optional leading whitespace and
/// sign, then as many digits as follow. Anything unparsable yields 0.
fn parse_angle(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            println!("{BANNER}");
            err.exit();
        }
    };

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("imgrotate=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{}", serde_json::to_string_pretty(&Config::default())?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => serde_json::from_str::<Config>(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let (Some(input), Some(output), Some(angle)) = (cli.input, cli.output, cli.angle) else {
        return Err("INFILE, OUTFILE and ANGLE must all be given".into());
    };
    let angle = parse_angle(&angle);

    if !cli.json {
        println!("{BANNER}");
        println!("Trying to open image file {} ...", input.display());
    }

    let config = RotateConfig::from(config);
    tracing::info!(
        weight_precision = config.weight_precision,
        size_rounding = ?config.size_rounding,
        "resampling config"
    );
    let mut engine = RotationEngine::new().with_config(config);
    if let Err(err) = engine.init(&input, &output, angle) {
        eprintln!("Could not load source image: {err}");
        return Err(err.into());
    }
    let summary = engine
        .describe_state()
        .ok_or("engine did not report its state after init")?;
    if !cli.json {
        println!("{summary}");
    }

    let start = Instant::now();
    {
        let _span = tracing::info_span!("run", angle_deg = summary.angle_deg).entered();
        engine.run()?;
    }
    let elapsed = start.elapsed();
    tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "rotation complete");
    let (output_width, output_height) = engine.target_size().unwrap_or((0, 0));
    let written = engine.finish();

    let elapsed_secs = elapsed.as_millis() as f64 / 1000.0;
    if cli.json {
        let report = Report {
            source: summary.source_path.display().to_string(),
            dest: summary.dest_path.display().to_string(),
            width: summary.width,
            height: summary.height,
            megapixels: summary.megapixels,
            angle_deg: summary.angle_deg,
            output_width,
            output_height,
            elapsed_secs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Result: {elapsed_secs:.3}s");
    }

    if let Err(err) = written {
        eprintln!("Could not write rotation output: {err}");
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_angle, Cli, Config};
    use clap::{CommandFactory, Parser};
    use imgrotate::{RotateConfig, SizeRounding};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_three_positionals() {
        assert!(Cli::try_parse_from(["imgrotate", "in.ppm", "out.ppm"]).is_err());
        assert!(Cli::try_parse_from(["imgrotate", "a", "b", "45", "extra"]).is_err());
        let cli = Cli::try_parse_from(["imgrotate", "in.ppm", "out.ppm", "-90"]).unwrap();
        assert_eq!(cli.angle.as_deref(), Some("-90"));
    }

    #[test]
    fn parse_angle_follows_atoi() {
        assert_eq!(parse_angle("45"), 45);
        assert_eq!(parse_angle("  -90"), -90);
        assert_eq!(parse_angle("+12deg"), 12);
        assert_eq!(parse_angle("abc"), 0);
        assert_eq!(parse_angle(""), 0);
        assert_eq!(parse_angle("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: Config = serde_json::from_str(r#"{"size_rounding": "ceil"}"#).unwrap();
        let cfg = RotateConfig::from(cfg);
        assert_eq!(cfg.weight_precision, 3);
        assert_eq!(cfg.size_rounding, SizeRounding::Ceil);
    }
}
