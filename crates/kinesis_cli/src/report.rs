//! Report building and formatting
//!
//! Every subcommand produces a serializable report that prints either as a
//! plain text table or as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

use kinesis_animation::{BezierEase, DynamicsParams, StepResponse};

/// A subcommand result that can be printed
pub trait Report: Serialize {
    fn to_text(&self) -> Result<String>;

    fn render(&self, json: bool) -> Result<String> {
        if json {
            serde_json::to_string_pretty(self).context("Failed to serialize report")
        } else {
            self.to_text().context("Failed to format report")
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Uniform samples of an easing curve
#[derive(Debug, Serialize)]
pub struct EaseReport {
    pub snippet: String,
    pub points: Vec<CurvePoint>,
}

impl EaseReport {
    pub fn sample(ease: &BezierEase, samples: usize) -> Self {
        let points = match samples {
            0 => Vec::new(),
            1 => vec![CurvePoint {
                x: 1.0,
                y: ease.evaluate(1.0),
            }],
            n => {
                let last = (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = i as f64 / last;
                        CurvePoint {
                            x,
                            y: ease.evaluate(x),
                        }
                    })
                    .collect()
            }
        };

        Self {
            snippet: ease.snippet(),
            points,
        }
    }
}

impl Report for EaseReport {
    fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{:>8}  {:>12}", "x", "y")?;
        for p in &self.points {
            writeln!(out, "{:>8.4}  {:>12.6}", p.x, p.y)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.snippet)?;
        Ok(out)
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseSample {
    pub tick: usize,
    pub input: f64,
    pub output: f64,
}

#[derive(Debug, Serialize)]
pub struct Peak {
    pub tick: usize,
    pub value: f64,
}

/// Step response of a set of dynamics parameters
#[derive(Debug, Serialize)]
pub struct DynamicsReport {
    pub snippet: String,
    pub frequency: f64,
    pub damping: f64,
    pub response: f64,
    pub fps: f64,
    pub peak: Option<Peak>,
    /// First tick after which the output stays within 1% of the target
    pub settling_tick: Option<usize>,
    pub samples: Vec<ResponseSample>,
}

/// Band around the final input that counts as settled
const SETTLE_TOLERANCE: f64 = 0.01;

impl DynamicsReport {
    pub fn new(params: DynamicsParams, response: &StepResponse) -> Self {
        let target = response.input().last().copied().unwrap_or(0.0);
        let samples = response
            .input()
            .iter()
            .zip(response.output())
            .enumerate()
            .map(|(tick, (&input, &output))| ResponseSample {
                tick,
                input,
                output,
            })
            .collect();

        Self {
            snippet: params.snippet(),
            frequency: params.frequency,
            damping: params.damping,
            response: params.response,
            fps: response.frame_rate(),
            peak: response.peak().map(|(tick, value)| Peak { tick, value }),
            settling_tick: response.settling_index(target, SETTLE_TOLERANCE),
            samples,
        }
    }
}

impl Report for DynamicsReport {
    fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "{:>6}  {:>8}  {:>12}", "tick", "input", "output")?;
        for s in &self.samples {
            writeln!(out, "{:>6}  {:>8.3}  {:>12.6}", s.tick, s.input, s.output)?;
        }
        writeln!(out)?;
        match &self.peak {
            Some(peak) => writeln!(out, "peak: {:.6} at tick {}", peak.value, peak.tick)?,
            None => writeln!(out, "peak: n/a")?,
        }
        match self.settling_tick {
            Some(tick) => {
                writeln!(out, "settled: tick {} ({:.3}s)", tick, tick as f64 / self.fps)?
            }
            None => writeln!(out, "settled: not within {} ticks", self.samples.len())?,
        }
        writeln!(out, "{}", self.snippet)?;
        Ok(out)
    }
}

/// Positions of the looping easing preview
#[derive(Debug, Serialize)]
pub struct PreviewReport {
    pub snippet: String,
    pub positions: Vec<f64>,
}

impl Report for PreviewReport {
    fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        for (tick, pos) in self.positions.iter().enumerate() {
            writeln!(out, "{:>6}  {:>10.6}", tick, pos)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.snippet)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_sampling() {
        let report = EaseReport::sample(&BezierEase::default(), 11);
        assert_eq!(report.points.len(), 11);
        assert_eq!(report.points[0].y, 0.0);
        assert_eq!(report.points[10].x, 1.0);
        assert_eq!(report.points[10].y, 1.0);
        assert!(report.to_text().unwrap().ends_with("BezierEase::new(0.21, -0.52, 0.59, 1.48)\n"));

        assert!(EaseReport::sample(&BezierEase::default(), 0).points.is_empty());
        assert_eq!(EaseReport::sample(&BezierEase::default(), 1).points[0].y, 1.0);
    }

    #[test]
    fn test_dynamics_report() {
        let params = DynamicsParams::default();
        let response = StepResponse::simulate(params, 60.0, 60, 120);
        let report = DynamicsReport::new(params, &response);

        assert_eq!(report.samples.len(), 180);
        let peak = report.peak.as_ref().unwrap();
        assert!(peak.tick > 60 && peak.value > 1.2);
        assert!(report.settling_tick.is_some());
        assert!(report.to_text().unwrap().contains("peak: "));
    }

    #[test]
    fn test_json_render() {
        let report = EaseReport::sample(&BezierEase::new(0.2, 0.2, 0.8, 0.8), 3);
        let json = report.render(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["points"][1]["y"], 0.5);
        assert_eq!(value["snippet"], "BezierEase::new(0.20, 0.20, 0.80, 0.80)");
    }

    #[test]
    fn test_text_render() {
        let report = PreviewReport {
            snippet: "BezierEase::new(0.20, 0.20, 0.80, 0.80)".to_string(),
            positions: vec![0.0, 0.5],
        };
        let text = report.render(false).unwrap();
        assert_eq!(
            text,
            "     0    0.000000\n     1    0.500000\n\nBezierEase::new(0.20, 0.20, 0.80, 0.80)\n"
        );
    }
}
