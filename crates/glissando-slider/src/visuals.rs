use crate::color::Color;
use crate::config::SliderConfig;

/// Opacity of the track while the slider is disabled.
const DISABLED_TRACK_OPACITY: f32 = 0.6;

/// Everything a renderer needs to draw the slider for one frame.
///
/// Offsets are relative to the left end of the track's centre line. The
/// thumb's touch target is a circle of `touch_target_diameter` whose
/// top-left corner sits at (`thumb_offset_x`, `thumb_offset_y`); the visible
/// thumb is centred inside it and scaled by `thumb_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderVisuals {
    pub thumb_offset_x: f64,
    pub thumb_offset_y: f64,
    pub thumb_scale: f64,
    pub thumb_diameter: f64,
    pub touch_target_diameter: f64,
    pub thumb_color: Color,
    pub track_width: f64,
    pub track_size: f64,
    pub track_opacity: f32,
    /// Width of the filled part of the track, left of the thumb.
    pub lower_track_width: f64,
    pub lower_track_color: Color,
    pub upper_track_color: Color,
}

impl SliderVisuals {
    pub(crate) fn compute(config: &SliderConfig, position: f64, scale: f64, width: f64) -> Self {
        let touch_radius = config.thumb_radius + config.hit_slop;
        Self {
            thumb_offset_x: position - touch_radius,
            thumb_offset_y: -touch_radius + config.track_size / 2.0,
            thumb_scale: scale,
            thumb_diameter: config.thumb_radius * 2.0,
            touch_target_diameter: touch_radius * 2.0,
            thumb_color: if config.disabled {
                Color::GREY
            } else {
                config.thumb_tint_color
            },
            track_width: width,
            track_size: config.track_size,
            track_opacity: if config.disabled {
                DISABLED_TRACK_OPACITY
            } else {
                1.0
            },
            lower_track_width: position,
            lower_track_color: config.lower_track_color,
            upper_track_color: config.upper_track_color,
        }
    }
}
