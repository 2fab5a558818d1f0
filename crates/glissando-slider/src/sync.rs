use glissando_animation::{TimingSpec, Transition};
use glissando_core::{MutableState, Reaction};

use crate::config::Domain;
use crate::slider::SliderCells;
use crate::value_mapper::value_to_position;

/// Where the slider's controlled value comes from.
#[derive(Debug, Clone)]
pub enum ControlledValue {
    /// A live cell owned by the host and read every frame.
    Shared(MutableState<f64>),
    /// A plain number; later updates go through [`Slider::set_value`](crate::Slider::set_value).
    Discrete(f64),
}

impl Default for ControlledValue {
    fn default() -> Self {
        ControlledValue::Discrete(0.0)
    }
}

impl ControlledValue {
    pub(crate) fn into_cell(self) -> MutableState<f64> {
        match self {
            ControlledValue::Shared(cell) => cell,
            ControlledValue::Discrete(value) => MutableState::new(value),
        }
    }
}

/// Moves the thumb when the track is measured or the controlled value
/// changes, but only while no drag owns the thumb.
///
/// Updates that arrive during a drag are consumed and dropped; they are not
/// replayed when the drag ends.
#[derive(Debug)]
pub struct ControlledValueSync {
    source: MutableState<f64>,
    external: Reaction<f64>,
    measured_width: f64,
}

impl ControlledValueSync {
    pub(crate) fn new(source: MutableState<f64>) -> Self {
        let initial = source.get();
        Self {
            source,
            external: Reaction::new(initial),
            measured_width: 0.0,
        }
    }

    /// Latest controlled value.
    pub fn current(&self) -> f64 {
        self.source.get()
    }

    pub fn measured_width(&self) -> f64 {
        self.measured_width
    }

    pub(crate) fn source(&self) -> &MutableState<f64> {
        &self.source
    }

    /// Controlled value as the thumb follows it: NaN and infinities read as `min`.
    fn target_value(&self, domain: &Domain) -> f64 {
        let value = self.current();
        if value.is_finite() {
            value
        } else {
            domain.min()
        }
    }

    /// Records a layout measurement and places the thumb for it.
    ///
    /// The first measurement places the thumb directly; later width changes
    /// animate it with `timing`. A width of 0 means unmeasured; NaN and
    /// negative widths are dropped and the previous measurement stays.
    pub(crate) fn on_layout(
        &mut self,
        width: f64,
        gesture_active: bool,
        cells: &SliderCells,
        domain: &Domain,
        timing: TimingSpec,
    ) {
        if !width.is_finite() || width < 0.0 {
            log::warn!(
                "ignoring invalid track width {width}; keeping {}",
                self.measured_width
            );
            return;
        }
        cells.width.set(width);
        cells.position.set_bounds(Some((0.0, width)));

        let previous = self.measured_width;
        if previous == width {
            return;
        }
        self.measured_width = width;
        if gesture_active {
            log::warn!("track resized to {width} during a drag; thumb stays with the drag");
            return;
        }

        let target = value_to_position(self.target_value(domain), width, domain);
        if previous == 0.0 {
            cells.position.snap_to(target);
        } else {
            cells.position.animate_to(target, Transition::Timing(timing));
        }
    }

    /// Samples the controlled value and retargets the thumb if it changed.
    ///
    /// Returns true when the thumb was retargeted.
    pub(crate) fn observe_external(
        &mut self,
        gesture_active: bool,
        cells: &SliderCells,
        domain: &Domain,
        timing: TimingSpec,
    ) -> bool {
        let value = self.target_value(domain);
        if self.external.observe(value).is_none() {
            return false;
        }
        let raw = self.current();
        if !raw.is_finite() {
            log::warn!("controlled value {raw} is not finite; using {value}");
        }
        if gesture_active {
            log::debug!("controlled value {value} arrived during a drag; dropped");
            return false;
        }
        self.retarget(cells, domain, timing);
        true
    }

    /// Animates the thumb to the controlled value's position.
    pub(crate) fn retarget(&mut self, cells: &SliderCells, domain: &Domain, timing: TimingSpec) {
        let value = self.target_value(domain);
        self.external.reset(value);
        let target = value_to_position(value, self.measured_width, domain);
        cells.position.animate_to(target, Transition::Timing(timing));
    }
}
