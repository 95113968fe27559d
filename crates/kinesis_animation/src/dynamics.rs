//! Second-order dynamics
//!
//! Gives any tracked value spring-like motion toward a moving target. The
//! system solved each step is
//!
//! ```text
//! y + k1·y' + k2·y'' = x + k3·x'
//! ```
//!
//! where `x` is the input (target) and `y` the output. The coefficients are
//! derived from three intuitive parameters:
//!
//! - **frequency** `f` (Hz): how quickly the output responds to change
//! - **damping** `zeta`: 0 vibrates forever, below 1 overshoots and settles,
//!   1 and above approaches without vibration
//! - **response** `r`: below 0 winds up before moving, 0 starts slowly,
//!   above 0 reacts immediately, above 1 overshoots the target
//!
//! Steps are semi-implicit Euler. `k2` is clamped per step from the current
//! frame rate so low frame rates cannot make the integration diverge.

use std::f64::consts::PI;

use crate::error::{ensure_finite, ParamError};
use crate::vector::Motion;

/// Frequency, damping and response for a [`SecondOrderDynamics`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DynamicsParams {
    /// Natural frequency in Hz
    pub frequency: f64,
    /// Damping ratio
    pub damping: f64,
    /// Responsiveness
    pub response: f64,
}

impl DynamicsParams {
    /// Smallest frequency [`DynamicsParams::clamped`] lets through
    pub const MIN_FREQUENCY: f64 = 0.01;

    pub const fn new(frequency: f64, damping: f64, response: f64) -> Self {
        Self {
            frequency,
            damping,
            response,
        }
    }

    /// Raise frequency to [`Self::MIN_FREQUENCY`] and damping to zero where
    /// they fall short
    pub fn clamped(self) -> Self {
        let mut params = self;
        if params.frequency <= Self::MIN_FREQUENCY {
            params.frequency = Self::MIN_FREQUENCY;
        }
        if params.damping < 0.0 {
            params.damping = 0.0;
        }
        if params != self {
            tracing::debug!(original = ?self, clamped = ?params, "clamped dynamics params");
        }
        params
    }

    /// Check the parameters are usable without clamping
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite("frequency", self.frequency)?;
        ensure_finite("damping", self.damping)?;
        ensure_finite("response", self.response)?;
        if self.frequency <= 0.0 {
            return Err(ParamError::NonPositiveFrequency(self.frequency));
        }
        if self.damping < 0.0 {
            return Err(ParamError::NegativeDamping(self.damping));
        }
        Ok(())
    }

    /// Source text that rebuilds a stepper with these parameters
    pub fn snippet(&self) -> String {
        format!(
            "SecondOrderDynamics::new({:.2}, {:.2}, {:.2}, start)",
            self.frequency, self.damping, self.response
        )
    }

    /// `(k1, k2, k3)` of the underlying differential equation
    fn coefficients(&self) -> (f64, f64, f64) {
        let Self {
            frequency: f,
            damping: zeta,
            response: r,
        } = *self;
        debug_assert!(f > 0.0, "frequency must be positive, got {f}");

        let k1 = zeta / (PI * f);
        let k2 = 1.0 / (4.0 * PI * PI * f * f);
        let k3 = r * zeta / (2.0 * PI * f);
        (k1, k2, k3)
    }
}

impl Default for DynamicsParams {
    fn default() -> Self {
        Self::new(1.0, 0.5, 2.0)
    }
}

/// A stepper that follows an input with second-order physical motion
///
/// Call [`SecondOrderDynamics::update`] once per frame with the current
/// frame rate and input.
#[derive(Clone, Debug)]
pub struct SecondOrderDynamics<V: Motion> {
    params: DynamicsParams,
    k1: f64,
    k2: f64,
    k3: f64,
    /// Previous (unwrapped) input, for estimating input velocity
    input_prev: V,
    /// Unwrapped output position
    output: V,
    output_velocity: V,
    /// Per-axis wrap width, zero for none
    wrap: V,
    /// What the last update returned
    value: V,
}

impl<V: Motion> SecondOrderDynamics<V> {
    /// Create a stepper resting at `initial`.
    ///
    /// `frequency` must be greater than zero; clamp it first with
    /// [`DynamicsParams::clamped`] when it comes from user input.
    pub fn new(frequency: f64, damping: f64, response: f64, initial: V) -> Self {
        Self::from_params(DynamicsParams::new(frequency, damping, response), initial)
    }

    pub fn from_params(params: DynamicsParams, initial: V) -> Self {
        let (k1, k2, k3) = params.coefficients();
        tracing::trace!(?params, k1, k2, k3, "created second-order dynamics");

        Self {
            params,
            k1,
            k2,
            k3,
            input_prev: initial,
            output: initial,
            output_velocity: V::ZERO,
            wrap: V::ZERO,
            value: initial,
        }
    }

    /// Treat the value as periodic with the given per-axis width.
    ///
    /// Inputs are reconciled to the representative nearest the previous
    /// input, and outputs are reported modulo the width. A zero width
    /// leaves that axis unwrapped.
    pub fn with_wrap(mut self, wrap: V) -> Self {
        self.wrap = wrap;
        if wrap.is_wrapping() {
            self.value = self.output.wrap_into(wrap);
        }
        self
    }

    pub fn params(&self) -> DynamicsParams {
        self.params
    }

    /// Change the parameters, keeping position and velocity
    pub fn set_params(&mut self, frequency: f64, damping: f64, response: f64) {
        self.params = DynamicsParams::new(frequency, damping, response);
        let (k1, k2, k3) = self.params.coefficients();
        self.k1 = k1;
        self.k2 = k2;
        self.k3 = k3;
        tracing::trace!(params = ?self.params, "updated second-order dynamics");
    }

    /// Jump to `position` with zero velocity
    pub fn reset(&mut self, position: V) {
        self.input_prev = position;
        self.output = position;
        self.output_velocity = V::ZERO;
        self.value = if self.wrap.is_wrapping() {
            position.wrap_into(self.wrap)
        } else {
            position
        };
    }

    /// Advance one step and return the new output.
    ///
    /// `frame_rate` is in frames per second and may change between calls.
    /// When `input_velocity` is `None` it is estimated from the previous
    /// input.
    pub fn update(&mut self, frame_rate: f64, input: V, input_velocity: Option<V>) -> V {
        debug_assert!(frame_rate > 0.0, "frame rate must be positive, got {frame_rate}");

        let wrapping = self.wrap.is_wrapping();
        let input = if wrapping {
            input.unwrap_near(self.input_prev, self.wrap)
        } else {
            input
        };

        let input_velocity =
            input_velocity.unwrap_or_else(|| (input - self.input_prev) * frame_rate);
        self.input_prev = input;

        self.output = self.output + self.output_velocity / frame_rate;

        // Clamp k2 to keep the step from jittering or blowing up
        let k2_stable = self
            .k2
            .max((1.0 + frame_rate * self.k1) / (2.0 * frame_rate * frame_rate))
            .max(self.k1 / frame_rate);

        self.output_velocity = self.output_velocity
            + (input + input_velocity * self.k3 - self.output - self.output_velocity * self.k1)
                / (frame_rate * k2_stable);

        self.value = if wrapping {
            self.output.wrap_into(self.wrap)
        } else {
            self.output
        };
        self.value
    }

    /// What the last update returned (wrapped when wrapping is on)
    pub fn value(&self) -> V {
        self.value
    }

    /// Output position without wrapping applied
    pub fn raw_value(&self) -> V {
        self.output
    }

    pub fn velocity(&self) -> V {
        self.output_velocity
    }

    /// True when the output is within `epsilon` of `target` and nearly still
    pub fn is_settled(&self, target: V, epsilon: f64) -> bool {
        let target = if self.wrap.is_wrapping() {
            target.unwrap_near(self.output, self.wrap)
        } else {
            target
        };
        (target - self.output).magnitude() <= epsilon
            && self.output_velocity.magnitude() <= epsilon
    }
}
