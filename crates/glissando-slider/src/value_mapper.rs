//! Conversions between thumb position (pixels) and slider value.
//!
//! Both directions clamp instead of extrapolating. A track that has not been
//! measured yet (`width <= 0`) maps every position to `min` and every value
//! to `0`.
//!
//! Quantization rounds half away from zero on the step grid anchored at
//! `min`: ties move toward `max`, so `quantize(2.5)` with `min = 0, step = 1`
//! is `3`. The result does not depend on platform rounding defaults.

use crate::config::Domain;

/// Maps `position` on a track `width` pixels wide to a quantized value.
pub fn position_to_value(position: f64, width: f64, domain: &Domain) -> f64 {
    if !is_measured(width) || !position.is_finite() {
        return domain.min();
    }
    let raw = interpolate_clamped(position, (0.0, width), (domain.min(), domain.max()));
    quantize(raw, domain)
}

/// Maps `value` to its pixel position on a track `width` pixels wide.
///
/// Values outside the domain land on the nearest end of the track.
pub fn value_to_position(value: f64, width: f64, domain: &Domain) -> f64 {
    if !is_measured(width) || !value.is_finite() {
        return 0.0;
    }
    interpolate_clamped(value, (domain.min(), domain.max()), (0.0, width))
}

/// Snaps `value` to the nearest `min + k * step` inside the domain.
///
/// When the span is not a whole number of steps the top of the range is the
/// last grid point below `max`.
pub fn quantize(value: f64, domain: &Domain) -> f64 {
    let (min, max, step) = (domain.min(), domain.max(), domain.step());
    if !value.is_finite() {
        return min;
    }
    let steps = ((value - min) / step).round();
    let snapped = min + steps * step;
    if snapped > max {
        // Tolerate float noise in span / step, e.g. 0.3 / 0.1.
        let last = ((max - min) / step + 1e-9).floor();
        return (min + last * step).min(max);
    }
    snapped.max(min)
}

fn is_measured(width: f64) -> bool {
    width.is_finite() && width > 0.0
}

fn interpolate_clamped(x: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in_lo, in_hi) = input;
    let (out_lo, out_hi) = output;
    let t = ((x - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + t * (out_hi - out_lo)
}

#[cfg(test)]
#[path = "tests/value_mapper_tests.rs"]
mod tests;
