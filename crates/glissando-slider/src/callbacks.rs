use std::fmt;
use std::sync::Arc;

use glissando_core::LogicDispatcher;

pub type StartCallback = Arc<dyn Fn() + Send + Sync>;
pub type ValueCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Consumer callbacks. Every one is optional; a missing callback is skipped.
#[derive(Clone, Default)]
pub struct SliderCallbacks {
    on_start: Option<StartCallback>,
    on_change: Option<ValueCallback>,
    on_confirm: Option<ValueCallback>,
}

impl SliderCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a drag begins.
    pub fn on_start(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(callback));
        self
    }

    /// Called for every distinct value produced while dragging.
    pub fn on_change(mut self, callback: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Called once with the final value when a drag is released.
    pub fn on_confirm(mut self, callback: impl Fn(f64) + Send + Sync + 'static) -> Self {
        self.on_confirm = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for SliderCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_confirm", &self.on_confirm.is_some())
            .finish()
    }
}

/// Posts consumer callbacks to the business-logic domain.
pub(crate) struct CallbackEmitter {
    callbacks: SliderCallbacks,
    dispatcher: LogicDispatcher,
}

impl CallbackEmitter {
    pub(crate) fn new(callbacks: SliderCallbacks, dispatcher: LogicDispatcher) -> Self {
        Self {
            callbacks,
            dispatcher,
        }
    }

    pub(crate) fn start(&self) {
        if let Some(callback) = self.callbacks.on_start.clone() {
            self.dispatcher.post(move || callback());
        }
    }

    pub(crate) fn change(&self, value: f64) {
        if let Some(callback) = self.callbacks.on_change.clone() {
            self.dispatcher.post(move || callback(value));
        }
    }

    pub(crate) fn confirm(&self, value: f64) {
        if let Some(callback) = self.callbacks.on_confirm.clone() {
            self.dispatcher.post(move || callback(value));
        }
    }

    pub(crate) fn dispatcher(&self) -> &LogicDispatcher {
        &self.dispatcher
    }
}
