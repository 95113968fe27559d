//! Kinesis CLI
//!
//! Headless front end for the motion primitives: sample easing curves, preview
//! second-order dynamics step responses, and print the code that rebuilds them.

mod config;
mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kinesis_animation::ticks::{preview_cycle, seconds};
use kinesis_animation::{Easing, StepResponse};

use config::{DynamicsConfig, EaseConfig, KinesisConfig};
use report::{DynamicsReport, EaseReport, PreviewReport, Report};

#[derive(Parser)]
#[command(name = "kinesis")]
#[command(about = "Sample bezier easing curves and second-order dynamics", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (or directory containing kinesis.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a cubic bezier easing curve
    Ease {
        #[command(flatten)]
        curve: CurveArgs,

        /// Number of points to sample across [0, 1]
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Simulate the step response of second-order dynamics
    Dynamics {
        /// Natural frequency in Hz
        #[arg(short = 'f', long, allow_negative_numbers = true)]
        frequency: Option<f64>,

        /// Damping ratio
        #[arg(short = 'z', long, allow_negative_numbers = true)]
        damping: Option<f64>,

        /// Responsiveness
        #[arg(short = 'r', long, allow_negative_numbers = true)]
        response: Option<f64>,

        /// Frames per second
        #[arg(long)]
        fps: Option<f64>,

        /// Ticks the input is held at 0
        #[arg(long)]
        low: Option<usize>,

        /// Ticks the input is held at 1
        #[arg(long)]
        high: Option<usize>,
    },

    /// Print the looping there-and-back preview of an easing curve
    Preview {
        #[command(flatten)]
        curve: CurveArgs,

        /// Frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Number of full cycles to print
        #[arg(long, default_value_t = 1)]
        cycles: usize,
    },

    /// Print the default configuration
    Config,
}

#[derive(Args)]
struct CurveArgs {
    #[arg(long, allow_negative_numbers = true)]
    x1: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    y1: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    x2: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    y2: Option<f64>,
}

impl CurveArgs {
    /// Flags override the configured curve
    fn apply(&self, ease: &mut EaseConfig) {
        ease.x1 = self.x1.unwrap_or(ease.x1);
        ease.y1 = self.y1.unwrap_or(ease.y1);
        ease.x2 = self.x2.unwrap_or(ease.x2);
        ease.y2 = self.y2.unwrap_or(ease.y2);
    }
}

/// Seconds held at each end of the preview
const PREVIEW_PAUSE_SECS: f64 = 0.5;
/// Seconds spent travelling each way in the preview
const PREVIEW_TRAVEL_SECS: f64 = 1.0;
/// Highest frame rate the preview accepts
const MAX_PREVIEW_FPS: f64 = 1000.0;
/// Most positions a single preview prints
const MAX_PREVIEW_TICKS: usize = 1_000_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KinesisConfig::load(path)?,
        None => KinesisConfig::default(),
    };

    let output = match cli.command {
        Commands::Ease { curve, samples } => {
            curve.apply(&mut config.ease);
            if let Some(samples) = samples {
                config.ease.samples = samples;
            }
            cmd_ease(&config.ease)?.render(cli.json)?
        }
        Commands::Dynamics {
            frequency,
            damping,
            response,
            fps,
            low,
            high,
        } => {
            let d = &mut config.dynamics;
            d.frequency = frequency.unwrap_or(d.frequency);
            d.damping = damping.unwrap_or(d.damping);
            d.response = response.unwrap_or(d.response);
            d.fps = fps.unwrap_or(d.fps);
            d.low = low.unwrap_or(d.low);
            d.high = high.unwrap_or(d.high);
            cmd_dynamics(&config.dynamics)?.render(cli.json)?
        }
        Commands::Preview { curve, fps, cycles } => {
            curve.apply(&mut config.ease);
            cmd_preview(&config.ease, fps, cycles)?.render(cli.json)?
        }
        Commands::Config => KinesisConfig::default().to_toml()?,
    };

    print!("{output}");
    Ok(())
}

fn cmd_ease(ease: &EaseConfig) -> Result<EaseReport> {
    let curve = ease.curve()?;
    tracing::info!(snippet = %curve.snippet(), samples = ease.samples, "sampling curve");
    Ok(EaseReport::sample(&curve, ease.samples))
}

fn cmd_dynamics(dynamics: &DynamicsConfig) -> Result<DynamicsReport> {
    let requested = dynamics.params();
    let params = requested.clamped();
    if params != requested {
        tracing::warn!(
            frequency = params.frequency,
            damping = params.damping,
            "dynamics parameters clamped"
        );
    }
    params.validate().context("Invalid dynamics parameters")?;

    if !(dynamics.fps.is_finite() && dynamics.fps > 0.0) {
        anyhow::bail!("fps must be a positive number, got {}", dynamics.fps);
    }

    let response = StepResponse::simulate(params, dynamics.fps, dynamics.low, dynamics.high);
    Ok(DynamicsReport::new(params, &response))
}

fn cmd_preview(ease: &EaseConfig, fps: f64, cycles: usize) -> Result<PreviewReport> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("fps must be a positive number, got {fps}");
    }
    if fps > MAX_PREVIEW_FPS {
        anyhow::bail!("fps must be at most {MAX_PREVIEW_FPS}, got {fps}");
    }
    let curve = ease.curve()?;
    let pause = seconds(PREVIEW_PAUSE_SECS, fps);
    let travel = seconds(PREVIEW_TRAVEL_SECS, fps);

    let len = pause
        .checked_add(travel)
        .and_then(|period| period.checked_mul(2))
        .and_then(|period| period.checked_mul(cycles))
        .filter(|&len| len <= MAX_PREVIEW_TICKS);
    let Some(len) = len else {
        anyhow::bail!(
            "{cycles} cycles at {fps} fps exceeds the {MAX_PREVIEW_TICKS} tick preview limit"
        );
    };

    let positions = preview_cycle(pause, travel, Easing::CubicBezier(curve))
        .take(len)
        .collect();

    Ok(PreviewReport {
        snippet: curve.snippet(),
        positions,
    })
}
