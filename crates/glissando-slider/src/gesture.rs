//! Drag gesture handling.
//!
//! `Idle -> Active -> Idle`. While a session is active the gesture owns the
//! thumb: position follows the finger directly and controlled-value updates
//! are ignored. Releasing springs the thumb onto the pixel of the quantized
//! value.

use glissando_animation::Transition;

use crate::callbacks::CallbackEmitter;
use crate::config::{Domain, SliderConfig};
use crate::haptics::Haptics;
use crate::slider::SliderCells;
use crate::value_mapper::{position_to_value, value_to_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Start,
    Update,
    End,
    /// The platform took the gesture away; handled like `End`.
    Cancel,
}

/// One sample of a single-pointer horizontal drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    /// Horizontal distance travelled since the drag started, in pixels.
    pub translation_x: f64,
}

impl DragEvent {
    pub fn start() -> Self {
        Self {
            phase: DragPhase::Start,
            translation_x: 0.0,
        }
    }

    pub fn update(translation_x: f64) -> Self {
        Self {
            phase: DragPhase::Update,
            translation_x,
        }
    }

    pub fn end(translation_x: f64) -> Self {
        Self {
            phase: DragPhase::End,
            translation_x,
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: DragPhase::Cancel,
            translation_x: 0.0,
        }
    }
}

/// State of an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Thumb position when the drag started.
    pub origin_position: f64,
}

pub(crate) struct GestureContext<'a> {
    pub(crate) cells: &'a SliderCells,
    pub(crate) config: &'a SliderConfig,
    pub(crate) domain: &'a Domain,
    pub(crate) emitter: &'a CallbackEmitter,
    pub(crate) haptics: &'a Haptics,
}

#[derive(Debug, Default)]
pub struct GestureStateMachine {
    session: Option<GestureSession>,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<GestureSession> {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn handle(&mut self, event: DragEvent, cx: &GestureContext<'_>) {
        match event.phase {
            DragPhase::Start => self.start(cx),
            DragPhase::Update => self.update(event.translation_x, cx),
            DragPhase::End | DragPhase::Cancel => self.finish(cx),
        }
    }

    fn start(&mut self, cx: &GestureContext<'_>) {
        if self.session.is_some() {
            log::trace!("drag start while already dragging; ignored");
            return;
        }
        // Halting first cancels a pending settle and leaves the thumb where
        // it is on screen right now.
        cx.cells.position.stop();
        let origin_position = cx.cells.position.value();
        self.session = Some(GestureSession { origin_position });
        cx.cells
            .scale
            .animate_to(cx.config.touch_scale, Transition::Spring(cx.config.spring));
        log::debug!("drag started at {origin_position}");
        cx.emitter.start();
    }

    fn update(&mut self, translation_x: f64, cx: &GestureContext<'_>) {
        let Some(session) = self.session else {
            log::trace!("drag update without an active session; ignored");
            return;
        };
        if !translation_x.is_finite() {
            log::trace!("non-finite drag translation {translation_x}; ignored");
            return;
        }
        let width = cx.cells.width.get();
        let position = (session.origin_position + translation_x).clamp(0.0, width);
        cx.cells.position.snap_to(position);
        cx.cells
            .value
            .set(position_to_value(position, width, cx.domain));
    }

    fn finish(&mut self, cx: &GestureContext<'_>) {
        if self.session.is_none() {
            log::trace!("drag end without an active session; ignored");
            return;
        }
        cx.cells
            .scale
            .animate_to(1.0, Transition::Spring(cx.config.spring));

        let width = cx.cells.width.get();
        let value = position_to_value(cx.cells.position.value(), width, cx.domain);
        cx.cells.value.set(value);
        let settle = value_to_position(value, width, cx.domain);
        cx.cells
            .position
            .animate_to(settle, Transition::Spring(cx.config.spring));

        log::debug!("drag confirmed at {value}, settling to {settle}");
        cx.emitter.confirm(value);
        if cx.config.haptic_feedback {
            cx.haptics.fire(cx.emitter.dispatcher());
        }
        self.session = None;
    }
}
