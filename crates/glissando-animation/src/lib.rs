//! Animation system for Glissando
//!
//! Animates `f64` cells on the runtime's frame clock with either an eased
//! fixed-duration curve or a damped spring.

mod animation;
mod easing;

pub use animation::{AnimatedValue, SpringSpec, TimingSpec, Transition};
pub use easing::Easing;
