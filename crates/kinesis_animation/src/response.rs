//! Step responses
//!
//! Runs a fresh [`SecondOrderDynamics`] against a step input (held low, then
//! high) at a fixed frame rate and records what comes out. This is the static
//! preview graph used to judge a set of parameters at a glance.

use crate::dynamics::{DynamicsParams, SecondOrderDynamics};

/// Sampled input and output of a step response
#[derive(Clone, Debug, PartialEq)]
pub struct StepResponse {
    frame_rate: f64,
    input: Vec<f64>,
    output: Vec<f64>,
}

impl StepResponse {
    /// Feed `low_ticks` samples of 0 then `high_ticks` samples of 1 through
    /// a stepper starting at rest at 0.
    pub fn simulate(
        params: DynamicsParams,
        frame_rate: f64,
        low_ticks: usize,
        high_ticks: usize,
    ) -> Self {
        let input: Vec<f64> = std::iter::repeat(0.0)
            .take(low_ticks)
            .chain(std::iter::repeat(1.0).take(high_ticks))
            .collect();

        let mut dynamics = SecondOrderDynamics::from_params(params, 0.0);
        let output = input
            .iter()
            .map(|&i| dynamics.update(frame_rate, i, None))
            .collect();

        tracing::debug!(?params, frame_rate, low_ticks, high_ticks, "simulated step response");

        Self {
            frame_rate,
            input,
            output,
        }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Index and value of the highest output sample
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.output
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })
    }

    /// Local turning points of the output, in order
    ///
    /// A sample counts when the output changes direction there. Flat runs
    /// are skipped.
    pub fn extrema(&self) -> Vec<(usize, f64)> {
        let mut extrema = Vec::new();
        let mut rising: Option<bool> = None;
        for i in 1..self.output.len() {
            let delta = self.output[i] - self.output[i - 1];
            if delta == 0.0 {
                continue;
            }
            let now_rising = delta > 0.0;
            if let Some(was_rising) = rising {
                if was_rising != now_rising {
                    extrema.push((i - 1, self.output[i - 1]));
                }
            }
            rising = Some(now_rising);
        }
        extrema
    }

    /// First index from which the output stays within `tolerance` of `target`
    pub fn settling_index(&self, target: f64, tolerance: f64) -> Option<usize> {
        let last_outside = self
            .output
            .iter()
            .rposition(|v| (v - target).abs() > tolerance);
        match last_outside {
            None if self.output.is_empty() => None,
            None => Some(0),
            Some(i) if i + 1 < self.output.len() => Some(i + 1),
            Some(_) => None,
        }
    }
}
