use crate::runtime::RuntimeHandle;
use crate::{FrameCallbackId, FrameObserverId};

/// Entry point for frame-synchronised work on a runtime.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` once on the next frame with the frame time in nanoseconds.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        }) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    /// Runs `observer` on every frame, after that frame's callbacks, until the
    /// returned registration is dropped.
    ///
    /// Observers do not request frames on their own.
    pub fn observe_frames(&self, observer: impl FnMut(u64) + 'static) -> FrameObserverRegistration {
        let runtime = self.runtime.clone();
        let id = runtime.register_frame_observer(observer);
        FrameObserverRegistration { runtime, id }
    }
}

/// Pending one-shot frame callback. Dropping it cancels the callback.
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

/// Live frame observer. Dropping it unregisters the observer.
pub struct FrameObserverRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameObserverId>,
}

impl Drop for FrameObserverRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.remove_frame_observer(id);
        }
    }
}
