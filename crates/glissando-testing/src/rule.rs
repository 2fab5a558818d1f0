use std::sync::Arc;

use glissando_core::{Runtime, RuntimeHandle, TestScheduler};
use glissando_slider::{DragEvent, Slider, SliderBuilder, SliderConfig};

use crate::recorder::{CallbackRecorder, SliderEvent};

/// Frame interval used by the harness (~60 FPS).
pub const FRAME_NANOS: u64 = 16_666_667;

const MAX_SETTLE_FRAMES: usize = 2_000;

/// Deterministic host for slider tests.
///
/// Owns a runtime whose frames only advance when the test asks, and a
/// [`CallbackRecorder`] wired into every slider built through the rule.
pub struct SliderTestRule {
    runtime: Runtime,
    scheduler: Arc<TestScheduler>,
    recorder: CallbackRecorder,
    frame_time: u64,
}

impl Default for SliderTestRule {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderTestRule {
    pub fn new() -> Self {
        let scheduler = Arc::new(TestScheduler::default());
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            recorder: CallbackRecorder::new(),
            frame_time: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn recorder(&self) -> &CallbackRecorder {
        &self.recorder
    }

    pub fn frame_requests(&self) -> usize {
        self.scheduler.frame_requests()
    }

    /// Builder pre-wired with recording callbacks.
    pub fn builder(&self, config: SliderConfig) -> SliderBuilder {
        Slider::builder(config).callbacks(self.recorder.callbacks())
    }

    /// Builds a recording slider, panicking on invalid configuration.
    pub fn slider(&self, config: SliderConfig) -> Slider {
        self.builder(config)
            .build(&self.handle())
            .expect("slider configuration should be valid")
    }

    pub fn advance_frame(&mut self) {
        self.frame_time += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.frame_time);
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Advances until `slider` stops animating. Returns the frame count.
    pub fn advance_until_idle(&mut self, slider: &Slider) -> usize {
        let mut frames = 0;
        while slider.is_animating() {
            assert!(
                frames < MAX_SETTLE_FRAMES,
                "slider still animating after {MAX_SETTLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        // One more frame so observers see the resting values.
        self.advance_frame();
        frames
    }

    /// Runs queued business-logic callbacks.
    pub fn drain_logic(&self) -> usize {
        self.runtime.drain_logic()
    }

    /// Delivers pending callbacks and returns everything recorded so far.
    pub fn events(&self) -> Vec<SliderEvent> {
        self.drain_logic();
        self.recorder.events()
    }

    /// Delivers pending callbacks and returns every `on_change` value so far.
    pub fn changes(&self) -> Vec<f64> {
        self.drain_logic();
        self.recorder.changes()
    }

    /// Delivers pending callbacks and returns every `on_confirm` value so far.
    pub fn confirms(&self) -> Vec<f64> {
        self.drain_logic();
        self.recorder.confirms()
    }

    /// Delivers pending callbacks and clears the log.
    pub fn take_events(&self) -> Vec<SliderEvent> {
        self.drain_logic();
        self.recorder.take()
    }

    /// Performs a whole drag: start, one update per translation with a frame
    /// after each, then release at the last translation.
    pub fn drag(&mut self, slider: &Slider, translations: &[f64]) {
        slider.on_drag(DragEvent::start());
        self.advance_frame();
        for &translation in translations {
            slider.on_drag(DragEvent::update(translation));
            self.advance_frame();
        }
        let last = translations.last().copied().unwrap_or(0.0);
        slider.on_drag(DragEvent::end(last));
    }
}
