use std::fmt;

use glissando_animation::{SpringSpec, TimingSpec};

use crate::color::Color;

/// Valid value range of a slider: `min < max`, `step > 0`, all finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
    step: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigurationError> {
        for (field, value) in [("min", min), ("max", max), ("step", step)] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field, value });
            }
        }
        if step <= 0.0 {
            return Err(ConfigurationError::NonPositiveStep { step });
        }
        if min >= max {
            return Err(ConfigurationError::EmptyRange { min, max });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Rejected slider configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    NonPositiveStep { step: f64 },
    EmptyRange { min: f64, max: f64 },
    NonFinite { field: &'static str, value: f64 },
    NegativeDimension { field: &'static str, value: f64 },
    InvalidTouchScale { value: f64 },
    /// A spring parameter that would never settle or would produce NaN.
    InvalidSpring { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositiveStep { step } => {
                write!(f, "step must be greater than zero, got {step}")
            }
            ConfigurationError::EmptyRange { min, max } => {
                write!(f, "min ({min}) must be less than max ({max})")
            }
            ConfigurationError::NonFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigurationError::NegativeDimension { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigurationError::InvalidTouchScale { value } => {
                write!(f, "touch scale must be a positive finite factor, got {value}")
            }
            ConfigurationError::InvalidSpring { field, value } => {
                write!(f, "spring {field} must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Immutable slider configuration.
///
/// Equality is structural; [`Slider::set_config`](crate::Slider::set_config)
/// relies on it to skip redundant updates.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Track width in pixels. `None` waits for a layout measurement.
    pub width: Option<f64>,
    pub thumb_radius: f64,
    pub track_size: f64,
    pub thumb_tint_color: Color,
    pub lower_track_color: Color,
    pub upper_track_color: Color,
    pub disabled: bool,
    /// Thumb scale while it is being dragged.
    pub touch_scale: f64,
    /// Extra touch area around the thumb, in pixels.
    pub hit_slop: f64,
    pub haptic_feedback: bool,
    /// Used for layout placement and controlled-value changes.
    pub timing: TimingSpec,
    /// Used for the release settle and the touch-scale pulse.
    pub spring: SpringSpec,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            width: None,
            thumb_radius: 4.0,
            track_size: 2.0,
            thumb_tint_color: Color::WHITE,
            lower_track_color: Color::from_rgb_u8(0x44, 0x8a, 0xff),
            upper_track_color: Color::from_rgb_u8(0x61, 0x61, 0x61),
            disabled: false,
            touch_scale: 1.6,
            hit_slop: 16.0,
            haptic_feedback: false,
            timing: TimingSpec::default(),
            spring: SpringSpec::default(),
        }
    }
}

impl SliderConfig {
    /// Checks every field and returns the validated domain.
    pub fn validate(&self) -> Result<Domain, ConfigurationError> {
        let domain = Domain::new(self.min, self.max, self.step)?;

        let dimensions = [
            ("width", self.width.unwrap_or(0.0)),
            ("thumb_radius", self.thumb_radius),
            ("track_size", self.track_size),
            ("hit_slop", self.hit_slop),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigurationError::NegativeDimension { field, value });
            }
        }

        if !self.touch_scale.is_finite() || self.touch_scale <= 0.0 {
            return Err(ConfigurationError::InvalidTouchScale {
                value: self.touch_scale,
            });
        }

        // Zero damping oscillates forever; zero thresholds never count as rest.
        let spring = [
            ("stiffness", self.spring.stiffness),
            ("damping", self.spring.damping),
            ("mass", self.spring.mass),
            ("rest_speed_threshold", self.spring.rest_speed_threshold),
            ("rest_displacement_threshold", self.spring.rest_displacement_threshold),
        ];
        for (field, value) in spring {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::InvalidSpring { field, value });
            }
        }
        Ok(domain)
    }

    /// Validated domain of this configuration. Fails if any field is invalid,
    /// not only `min`, `max` and `step`.
    pub fn domain(&self) -> Result<Domain, ConfigurationError> {
        self.validate()
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_thumb_radius(mut self, radius: f64) -> Self {
        self.thumb_radius = radius;
        self
    }

    pub fn with_track_size(mut self, size: f64) -> Self {
        self.track_size = size;
        self
    }

    pub fn with_colors(mut self, thumb: Color, lower_track: Color, upper_track: Color) -> Self {
        self.thumb_tint_color = thumb;
        self.lower_track_color = lower_track;
        self.upper_track_color = upper_track;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_touch_scale(mut self, scale: f64) -> Self {
        self.touch_scale = scale;
        self
    }

    pub fn with_hit_slop(mut self, hit_slop: f64) -> Self {
        self.hit_slop = hit_slop;
        self
    }

    pub fn with_haptic_feedback(mut self, enabled: bool) -> Self {
        self.haptic_feedback = enabled;
        self
    }

    pub fn with_timing(mut self, timing: TimingSpec) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
