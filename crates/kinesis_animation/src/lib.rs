//! Kinesis Motion Primitives
//!
//! Two independent numeric building blocks for animation and UI code.
//!
//! # Features
//!
//! - **Bezier Easing**: CSS-style cubic bezier curves solved with Newton-Raphson
//!   and binary subdivision
//! - **Second-Order Dynamics**: spring-like following of a moving target, with
//!   tunable frequency, damping and response, stable under variable frame rates
//! - **Wrapping**: periodic domains such as angles take the short way round
//! - **Tick Sequences**: frame-counted eased progress for per-frame loops
//!
//! # Example
//!
//! ```rust
//! use kinesis_animation::{BezierEase, SecondOrderDynamics, Vec2};
//!
//! let ease = BezierEase::make(0.42, 0.0, 0.58, 1.0);
//! assert_eq!(ease(1.0), 1.0);
//!
//! let mut follow = SecondOrderDynamics::new(2.0, 0.5, 1.0, Vec2::ZERO);
//! let target = Vec2::new(100.0, 50.0);
//! for _ in 0..600 {
//!     follow.update(60.0, target, None);
//! }
//! assert!((follow.value() - target).length() < 1e-3);
//! ```

pub mod bezier;
pub mod dynamics;
pub mod easing;
pub mod error;
pub mod response;
pub mod scheduler;
pub mod ticks;
pub mod vector;

pub use bezier::BezierEase;
pub use dynamics::{DynamicsParams, SecondOrderDynamics};
pub use easing::Easing;
pub use error::ParamError;
pub use response::StepResponse;
pub use scheduler::{AnimationScheduler, DynamicsId};
pub use vector::{Motion, Vec2};
