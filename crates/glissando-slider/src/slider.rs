use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use glissando_animation::AnimatedValue;
use glissando_core::{FrameObserverRegistration, MutableState, RuntimeHandle, State};

use crate::callbacks::{CallbackEmitter, SliderCallbacks};
use crate::config::{ConfigurationError, Domain, SliderConfig};
use crate::gesture::{DragEvent, GestureContext, GestureSession, GestureStateMachine};
use crate::haptics::{HapticFeedback, Haptics};
use crate::notifier::ChangeNotifier;
use crate::sync::{ControlledValue, ControlledValueSync};
use crate::value_mapper::position_to_value;
use crate::visuals::SliderVisuals;

/// Reactive cells owned by one slider.
pub(crate) struct SliderCells {
    pub(crate) position: AnimatedValue,
    pub(crate) scale: AnimatedValue,
    pub(crate) value: MutableState<f64>,
    pub(crate) width: MutableState<f64>,
}

struct SliderInner {
    config: SliderConfig,
    domain: Domain,
    cells: SliderCells,
    gesture: GestureStateMachine,
    notifier: ChangeNotifier,
    sync: ControlledValueSync,
    emitter: CallbackEmitter,
    haptics: Haptics,
    haptic_engine: Option<Arc<dyn HapticFeedback>>,
}

impl SliderInner {
    fn handle_drag(&mut self, event: DragEvent) {
        let SliderInner {
            config,
            domain,
            cells,
            gesture,
            emitter,
            haptics,
            ..
        } = self;
        let cx = GestureContext {
            cells,
            config,
            domain,
            emitter,
            haptics,
        };
        gesture.handle(event, &cx);
    }

    fn layout(&mut self, width: f64) {
        let active = self.gesture.is_active();
        self.sync
            .on_layout(width, active, &self.cells, &self.domain, self.config.timing);
    }

    /// Re-derives the value from the thumb and runs both watchers.
    ///
    /// Runs after every input and on every frame; repeated runs without a
    /// change are no-ops.
    fn run_reactions(&mut self) {
        let active = self.gesture.is_active();
        let value = position_to_value(
            self.cells.position.value(),
            self.cells.width.get(),
            &self.domain,
        );
        self.cells.value.set(value);
        self.notifier.observe(value, active, &self.emitter);
        self.sync
            .observe_external(active, &self.cells, &self.domain, self.config.timing);
    }
}

/// Builder for [`Slider`].
pub struct SliderBuilder {
    config: SliderConfig,
    controlled: ControlledValue,
    callbacks: SliderCallbacks,
    haptic_engine: Option<Arc<dyn HapticFeedback>>,
}

impl SliderBuilder {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            controlled: ControlledValue::default(),
            callbacks: SliderCallbacks::default(),
            haptic_engine: None,
        }
    }

    pub fn controlled(mut self, controlled: ControlledValue) -> Self {
        self.controlled = controlled;
        self
    }

    /// Shorthand for a discrete controlled value.
    pub fn value(self, value: f64) -> Self {
        self.controlled(ControlledValue::Discrete(value))
    }

    /// Shorthand for a host-owned live value cell.
    pub fn shared_value(self, cell: MutableState<f64>) -> Self {
        self.controlled(ControlledValue::Shared(cell))
    }

    pub fn callbacks(mut self, callbacks: SliderCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn haptics(mut self, engine: Arc<dyn HapticFeedback>) -> Self {
        self.haptic_engine = Some(engine);
        self
    }

    pub fn build(self, runtime: &RuntimeHandle) -> Result<Slider, ConfigurationError> {
        let domain = self.config.validate()?;

        let position = AnimatedValue::new(0.0, runtime);
        position.set_bounds(Some((0.0, 0.0)));
        let cells = SliderCells {
            position,
            scale: AnimatedValue::new(1.0, runtime),
            value: MutableState::new(domain.min()),
            width: MutableState::new(0.0),
        };
        let haptics = Haptics::resolve(self.config.haptic_feedback, self.haptic_engine.clone());
        let width = self.config.width;

        let mut inner = SliderInner {
            notifier: ChangeNotifier::new(domain.min()),
            sync: ControlledValueSync::new(self.controlled.into_cell()),
            emitter: CallbackEmitter::new(self.callbacks, runtime.dispatcher()),
            gesture: GestureStateMachine::new(),
            config: self.config,
            domain,
            cells,
            haptics,
            haptic_engine: self.haptic_engine,
        };
        if let Some(width) = width {
            inner.layout(width);
        }
        inner.run_reactions();

        let inner = Rc::new(RefCell::new(inner));
        let weak = Rc::downgrade(&inner);
        let frames = runtime.frame_clock().observe_frames(move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            // Skip the frame if the slider is mid-call; its caller runs the
            // reactions itself.
            if let Ok(mut inner) = inner.try_borrow_mut() {
                inner.run_reactions();
            };
        });

        Ok(Slider {
            inner,
            runtime: runtime.clone(),
            _frames: frames,
        })
    }
}

/// A single-thumb slider controller living on one runtime.
pub struct Slider {
    inner: Rc<RefCell<SliderInner>>,
    runtime: RuntimeHandle,
    _frames: FrameObserverRegistration,
}

impl Slider {
    pub fn builder(config: SliderConfig) -> SliderBuilder {
        SliderBuilder::new(config)
    }

    /// Reports the measured track width.
    pub fn on_layout(&self, width: f64) {
        self.runtime.assert_ui_thread();
        let mut inner = self.inner.borrow_mut();
        inner.layout(width);
        inner.run_reactions();
    }

    /// Feeds one drag sample. Ignored entirely while the slider is disabled.
    pub fn on_drag(&self, event: DragEvent) {
        self.runtime.assert_ui_thread();
        let mut inner = self.inner.borrow_mut();
        if inner.config.disabled {
            log::trace!("slider disabled; dropping {:?}", event.phase);
            return;
        }
        inner.handle_drag(event);
        inner.run_reactions();
    }

    /// Updates the controlled value. Unchanged values are a no-op.
    pub fn set_value(&self, value: f64) {
        self.runtime.assert_ui_thread();
        let mut inner = self.inner.borrow_mut();
        if inner.sync.current() == value {
            return;
        }
        inner.sync.source().set(value);
        inner.run_reactions();
    }

    /// Applies a new configuration.
    ///
    /// Returns `Ok(false)` without touching anything when `config` equals
    /// the current one. A changed domain is a full reconfiguration: an
    /// active drag is ended and the thumb moves to the controlled value.
    pub fn set_config(&self, config: SliderConfig) -> Result<bool, ConfigurationError> {
        self.runtime.assert_ui_thread();
        let mut inner = self.inner.borrow_mut();
        if inner.config == config {
            return Ok(false);
        }
        let domain = config.validate()?;
        let domain_changed = domain != inner.domain;

        if inner.gesture.is_active() && (config.disabled || domain_changed) {
            log::debug!("reconfiguration ends the active drag");
            inner.handle_drag(DragEvent::cancel());
        }
        if config.haptic_feedback != inner.config.haptic_feedback {
            inner.haptics = Haptics::resolve(config.haptic_feedback, inner.haptic_engine.clone());
        }
        let new_width = config.width.filter(|width| Some(*width) != inner.config.width);

        inner.config = config;
        inner.domain = domain;
        if let Some(width) = new_width {
            inner.layout(width);
        }
        if domain_changed {
            log::debug!("slider domain changed to {domain:?}");
            let SliderInner {
                sync,
                cells,
                domain,
                config,
                ..
            } = &mut *inner;
            sync.retarget(cells, domain, config.timing);
        }
        inner.run_reactions();
        Ok(true)
    }

    pub fn config(&self) -> SliderConfig {
        self.inner.borrow().config.clone()
    }

    pub fn domain(&self) -> Domain {
        self.inner.borrow().domain
    }

    /// Thumb position in pixels.
    pub fn position(&self) -> f64 {
        self.inner.borrow().cells.position.value()
    }

    /// Quantized value derived from the thumb position.
    pub fn value(&self) -> f64 {
        self.inner.borrow().cells.value.get()
    }

    pub fn scale(&self) -> f64 {
        self.inner.borrow().cells.scale.value()
    }

    pub fn width(&self) -> f64 {
        self.inner.borrow().cells.width.get()
    }

    /// Latest controlled value.
    pub fn controlled_value(&self) -> f64 {
        self.inner.borrow().sync.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().gesture.is_active()
    }

    pub fn session(&self) -> Option<GestureSession> {
        self.inner.borrow().gesture.session()
    }

    /// True while the thumb or its scale pulse is still moving.
    pub fn is_animating(&self) -> bool {
        let inner = self.inner.borrow();
        inner.cells.position.is_running() || inner.cells.scale.is_running()
    }

    /// Target of the thumb's current animation, or its resting position.
    pub fn position_target(&self) -> f64 {
        self.inner.borrow().cells.position.target()
    }

    pub fn position_state(&self) -> State<f64> {
        self.inner.borrow().cells.position.state()
    }

    pub fn value_state(&self) -> State<f64> {
        self.inner.borrow().cells.value.as_state()
    }

    pub fn scale_state(&self) -> State<f64> {
        self.inner.borrow().cells.scale.state()
    }

    pub fn visuals(&self) -> SliderVisuals {
        let inner = self.inner.borrow();
        SliderVisuals::compute(
            &inner.config,
            inner.cells.position.value(),
            inner.cells.scale.value(),
            inner.cells.width.get(),
        )
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Slider")
            .field("position", &inner.cells.position.value())
            .field("value", &inner.cells.value.get())
            .field("width", &inner.cells.width.get())
            .field("session", &inner.gesture.session())
            .field("haptics", &inner.haptics)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/slider_tests.rs"]
mod tests;
