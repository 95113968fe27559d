//! Easing functions for animations

use crate::bezier::BezierEase;

/// Easing function type
///
/// Presets keep progress inside [0, 1]. [`Easing::CubicBezier`] may leave
/// that range to wind up or overshoot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Runs progress backwards: `1 - t`
    Flip,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    CubicBezier(BezierEase),
    /// Each easing feeds the next, left to right
    Chain(Vec<Easing>),
}

impl Easing {
    /// Shorthand for a [`BezierEase`] curve
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::CubicBezier(BezierEase::new(x1, y1, x2, y2))
    }

    /// Compose with `next`, which sees this easing's output
    pub fn then(self, next: Easing) -> Self {
        match self {
            Easing::Chain(mut steps) => {
                steps.push(next);
                Easing::Chain(steps)
            }
            first => Easing::Chain(vec![first, next]),
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::Flip => 1.0 - t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::CubicBezier(ease) => ease.evaluate(t),
            Easing::Chain(steps) => steps.iter().fold(t, |t, step| step.apply(t)),
        }
    }
}

impl From<BezierEase> for Easing {
    fn from(ease: BezierEase) -> Self {
        Easing::CubicBezier(ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESETS: [Easing; 11] = [
        Easing::Linear,
        Easing::Flip,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
    ];

    #[test]
    fn test_presets_stay_in_unit_range() {
        for easing in &PRESETS {
            for i in 0..=100 {
                let v = easing.apply(i as f64 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{easing:?} gave {v}");
            }
        }
    }

    #[test]
    fn test_presets_hit_endpoints() {
        for easing in PRESETS.iter().filter(|e| **e != Easing::Flip) {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_in_out_midpoint() {
        assert_eq!(Easing::EaseInOutQuad.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInOutQuart.apply(0.5), 0.5);
    }

    #[test]
    fn test_double_flip_is_identity() {
        let easing = Easing::Flip.then(Easing::Flip);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-15);
        }
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        let chain = Easing::EaseInQuad.then(Easing::Flip);
        assert_eq!(chain.apply(0.5), 0.75);

        let reversed = Easing::Flip.then(Easing::EaseInQuad);
        assert_eq!(reversed.apply(0.5), 0.25);

        assert_eq!(Easing::Chain(Vec::new()).apply(0.3), 0.3);
    }

    #[test]
    fn test_then_extends_existing_chain() {
        let chain = Easing::Linear.then(Easing::Flip).then(Easing::EaseInQuad);
        assert_eq!(
            chain,
            Easing::Chain(vec![Easing::Linear, Easing::Flip, Easing::EaseInQuad])
        );
    }

    #[test]
    fn test_cubic_bezier_can_overshoot() {
        let easing = Easing::cubic_bezier(0.21, -0.52, 0.59, 1.48);
        assert!(easing.apply(0.1) < 0.0);
        assert!(easing.apply(0.9) > 1.0);
        assert_eq!(easing.apply(1.0), 1.0);
    }
}
