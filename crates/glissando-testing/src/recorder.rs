use std::sync::{Arc, Mutex, MutexGuard};

use glissando_slider::{HapticFeedback, HapticKind, HapticOptions, SliderCallbacks};

/// Something the slider told the business-logic side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    Start,
    Change(f64),
    Confirm(f64),
    Haptic(HapticKind, HapticOptions),
}

/// Thread-safe log of slider callbacks, in delivery order.
#[derive(Clone, Default)]
pub struct CallbackRecorder {
    events: Arc<Mutex<Vec<SliderEvent>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SliderEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, event: SliderEvent) {
        self.lock().push(event);
    }

    /// Callbacks that record every event.
    pub fn callbacks(&self) -> SliderCallbacks {
        let start = self.clone();
        let change = self.clone();
        let confirm = self.clone();
        SliderCallbacks::new()
            .on_start(move || start.push(SliderEvent::Start))
            .on_change(move |value| change.push(SliderEvent::Change(value)))
            .on_confirm(move |value| confirm.push(SliderEvent::Confirm(value)))
    }

    /// Haptic engine that records into the same log.
    pub fn haptics(&self) -> Arc<RecordingHaptics> {
        Arc::new(RecordingHaptics {
            recorder: self.clone(),
        })
    }

    pub fn events(&self) -> Vec<SliderEvent> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<SliderEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn changes(&self) -> Vec<f64> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                SliderEvent::Change(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn confirms(&self) -> Vec<f64> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                SliderEvent::Confirm(value) => Some(*value),
                _ => None,
            })
            .collect()
    }
}

/// [`HapticFeedback`] that logs triggers instead of vibrating.
pub struct RecordingHaptics {
    recorder: CallbackRecorder,
}

impl HapticFeedback for RecordingHaptics {
    fn trigger(&self, kind: HapticKind, options: HapticOptions) {
        self.recorder.push(SliderEvent::Haptic(kind, options));
    }
}
