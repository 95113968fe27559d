//! Cubic bezier easing curves
//!
//! A [`BezierEase`] maps normalized progress through a cubic bezier whose
//! endpoints are pinned at (0, 0) and (1, 1). The two interior control
//! points are authored by hand, so the output may leave [0, 1] to produce
//! anticipation or overshoot.
//!
//! The solver follows the usual browser approach: a precomputed sample
//! table brackets the curve parameter, then Newton-Raphson refines it, with
//! binary subdivision when the curve is too flat for Newton to be safe.

use crate::error::{ensure_finite, ParamError};

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.0000001;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP_SIZE: f64 = 1.0 / (SPLINE_TABLE_SIZE as f64 - 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shape {
    /// Control points sit on the diagonal; the curve is `t ↦ t`
    Identity,
    /// x(t) sampled at uniform steps of t
    Sampled([f64; SPLINE_TABLE_SIZE]),
}

/// An easing curve built from two bezier control points
///
/// Immutable once built. When the control points change, build a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierEase {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    shape: Shape,
}

impl BezierEase {
    /// Build a curve from the control points `(x1, y1)` and `(x2, y2)`.
    ///
    /// `x1` and `x2` are clamped to [0, 1] so that x stays monotonic in t.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let x1 = x1.clamp(0.0, 1.0);
        let x2 = x2.clamp(0.0, 1.0);

        let shape = if x1 == y1 && x2 == y2 {
            Shape::Identity
        } else {
            let mut samples = [0.0; SPLINE_TABLE_SIZE];
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = calc_bezier(i as f64 * SAMPLE_STEP_SIZE, x1, x2);
            }
            Shape::Sampled(samples)
        };

        tracing::trace!(
            x1,
            y1,
            x2,
            y2,
            identity = (shape == Shape::Identity),
            "built bezier ease"
        );

        Self {
            x1,
            y1,
            x2,
            y2,
            shape,
        }
    }

    /// Like [`BezierEase::new`], but rejects NaN and infinite coordinates
    pub fn try_new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ParamError> {
        Ok(Self::new(
            ensure_finite("x1", x1)?,
            ensure_finite("y1", y1)?,
            ensure_finite("x2", x2)?,
            ensure_finite("y2", y2)?,
        ))
    }

    /// Build a curve and hand back its evaluation function
    pub fn make(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> impl Fn(f64) -> f64 + Clone + Send + Sync {
        let ease = Self::new(x1, y1, x2, y2);
        move |x| ease.evaluate(x)
    }

    /// Control points after clamping, as `(x1, y1, x2, y2)`
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// True when the control points lie on the diagonal
    pub fn is_identity(&self) -> bool {
        self.shape == Shape::Identity
    }

    /// Evaluate the curve at progress `x`.
    ///
    /// `x` is expected in [0, 1]. The identity curve also extrapolates
    /// linearly outside that range.
    pub fn evaluate(&self, x: f64) -> f64 {
        let samples = match &self.shape {
            Shape::Identity => return x,
            Shape::Sampled(samples) => samples,
        };

        // Floats are imprecise; keep the extremes exact
        if x == 0.0 || x == 1.0 {
            return x;
        }

        calc_bezier(self.t_for_x(samples, x), self.y1, self.y2)
    }

    /// Source text that rebuilds this curve
    pub fn snippet(&self) -> String {
        format!(
            "BezierEase::new({:.2}, {:.2}, {:.2}, {:.2})",
            self.x1, self.y1, self.x2, self.y2
        )
    }

    fn t_for_x(&self, samples: &[f64; SPLINE_TABLE_SIZE], x: f64) -> f64 {
        let mut interval_start = 0.0;
        let mut current_sample = 1;
        let last_sample = SPLINE_TABLE_SIZE - 1;

        while current_sample != last_sample && samples[current_sample] <= x {
            interval_start += SAMPLE_STEP_SIZE;
            current_sample += 1;
        }
        current_sample -= 1;

        // Secant between the bracketing samples
        let dist = (x - samples[current_sample])
            / (samples[current_sample + 1] - samples[current_sample]);
        let guess_for_t = interval_start + dist * SAMPLE_STEP_SIZE;

        let initial_slope = slope(guess_for_t, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            newton_raphson_iterate(x, guess_for_t, self.x1, self.x2)
        } else if initial_slope == 0.0 {
            guess_for_t
        } else {
            binary_subdivide(
                x,
                interval_start,
                interval_start + SAMPLE_STEP_SIZE,
                self.x1,
                self.x2,
            )
        }
    }
}

impl Default for BezierEase {
    /// The demo's starting curve: a wind-up followed by an overshoot
    fn default() -> Self {
        Self::new(0.21, -0.52, 0.59, 1.48)
    }
}

#[inline]
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

#[inline]
fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

/// x(t) given x1 and x2, or y(t) given y1 and y2
#[inline]
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

/// dx/dt given x1 and x2, or dy/dt given y1 and y2
#[inline]
fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}

fn binary_subdivide(x: f64, mut lower: f64, mut upper: f64, x1: f64, x2: f64) -> f64 {
    let mut current_t;
    let mut i = 0;
    loop {
        current_t = lower + (upper - lower) / 2.0;
        let current_x = calc_bezier(current_t, x1, x2) - x;
        if current_x > 0.0 {
            upper = current_t;
        } else {
            lower = current_t;
        }
        if current_x.abs() <= SUBDIVISION_PRECISION {
            break;
        }
        i += 1;
        if i >= SUBDIVISION_MAX_ITERATIONS {
            break;
        }
    }
    current_t
}

fn newton_raphson_iterate(x: f64, mut guess_t: f64, x1: f64, x2: f64) -> f64 {
    for _ in 0..NEWTON_ITERATIONS {
        let current_slope = slope(guess_t, x1, x2);
        if current_slope == 0.0 {
            return guess_t;
        }
        let current_x = calc_bezier(guess_t, x1, x2) - x;
        guess_t -= current_x / current_slope;
    }
    guess_t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let curves = [
            BezierEase::new(0.21, -0.52, 0.59, 1.48),
            BezierEase::new(0.0, 0.0, 1.0, 1.0),
            BezierEase::new(0.42, 0.0, 0.58, 1.0),
            BezierEase::new(1.0, -2.0, 0.0, 3.0),
            BezierEase::new(0.0, 1.0, 0.0, 1.0),
        ];
        for ease in curves {
            assert_eq!(ease.evaluate(0.0), 0.0);
            assert_eq!(ease.evaluate(1.0), 1.0);
        }
    }

    #[test]
    fn test_diagonal_is_identity() {
        for a in 0..=10 {
            for b in 0..=10 {
                let (p1, p2) = (a as f64 / 10.0, b as f64 / 10.0);
                let ease = BezierEase::new(p1, p1, p2, p2);
                assert!(ease.is_identity(), "({p1}, {p2})");
                for i in -10..=20 {
                    let t = i as f64 / 10.0;
                    assert_eq!(ease.evaluate(t), t, "({p1}, {p2}) at {t}");
                }
            }
        }
    }

    #[test]
    fn test_identity_check_uses_clamped_x() {
        // x1 = -0.5 clamps to 0, which no longer equals y1
        let ease = BezierEase::new(-0.5, -0.5, 0.8, 0.8);
        assert!(!ease.is_identity());
        assert_eq!(ease.control_points(), (0.0, -0.5, 0.8, 0.8));

        // x2 = 1.5 clamps to 1, which matches y2
        let ease = BezierEase::new(0.3, 0.3, 1.5, 1.0);
        assert!(ease.is_identity());
    }

    #[test]
    fn test_sample_table_is_uniform() {
        let ease = BezierEase::new(0.25, 0.1, 0.25, 1.0);
        let Shape::Sampled(samples) = ease.shape else {
            panic!("expected a sampled curve");
        };
        assert_eq!(samples.len(), 11);
        assert_eq!(samples[0], 0.0);
        assert!((samples[10] - 1.0).abs() < 1e-12);
        for pair in samples.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_x_round_trips_through_solver() {
        let ease = BezierEase::new(0.42, 0.0, 0.58, 1.0);
        let Shape::Sampled(samples) = ease.shape else {
            panic!("expected a sampled curve");
        };
        for i in 1..100 {
            let x = i as f64 / 100.0;
            let t = ease.t_for_x(&samples, x);
            assert!((calc_bezier(t, 0.42, 0.58) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn test_shallow_slope_uses_subdivision() {
        // x1 = 0 flattens x(t) near t = 0; the secant guess for a tiny x has
        // slope below the Newton minimum
        let ease = BezierEase::new(0.0, 0.5, 1.0, 0.5);
        let Shape::Sampled(samples) = ease.shape else {
            panic!("expected a sampled curve");
        };
        let x = 0.00001;
        assert!(slope(x / samples[1] * SAMPLE_STEP_SIZE, 0.0, 1.0) < NEWTON_MIN_SLOPE);

        let t = ease.t_for_x(&samples, x);
        assert!(t > 0.0 && t < SAMPLE_STEP_SIZE);
        assert!((calc_bezier(t, 0.0, 1.0) - x).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let ease = BezierEase::new(0.42, 0.0, 0.58, 1.0);
        for i in 1..10 {
            let x = i as f64 / 10.0;
            let sum = ease.evaluate(x) + ease.evaluate(1.0 - x);
            assert!((sum - 1.0).abs() < 1e-6, "x = {x}, sum = {sum}");
        }
    }

    #[test]
    fn test_make_matches_evaluate() {
        let ease = BezierEase::new(0.31, 0.52, 0.70, 0.95);
        let f = BezierEase::make(0.31, 0.52, 0.70, 0.95);
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert_eq!(f(x), ease.evaluate(x));
        }
    }

    #[test]
    fn test_try_new_rejects_nan() {
        assert!(matches!(
            BezierEase::try_new(0.2, f64::NAN, 0.5, 0.5),
            Err(ParamError::NonFinite { name: "y1", .. })
        ));
        assert!(BezierEase::try_new(0.2, 0.1, 0.5, 0.5).is_ok());
    }

    #[test]
    fn test_snippet() {
        assert_eq!(
            BezierEase::default().snippet(),
            "BezierEase::new(0.21, -0.52, 0.59, 1.48)"
        );
    }
}
