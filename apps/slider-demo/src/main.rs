use std::sync::Arc;
use std::thread;
use std::time::Duration;

use glissando_core::{Clock, DefaultScheduler, MutableState, Runtime, StdClock};
use glissando_slider::{
    DragEvent, HapticFeedback, HapticKind, HapticOptions, Slider, SliderCallbacks, SliderConfig,
};
use web_time::Instant;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const TRACK_WIDTH: f64 = 320.0;

/// Stands in for a device vibrator.
struct LoggingHaptics;

impl HapticFeedback for LoggingHaptics {
    fn trigger(&self, kind: HapticKind, options: HapticOptions) {
        log::info!("haptic {} ({:?})", kind.as_str(), options);
    }
}

/// Wall-clock frame loop standing in for a display link.
struct FrameLoop {
    runtime: Runtime,
    clock: StdClock,
    started: Instant,
}

impl FrameLoop {
    fn new(runtime: Runtime) -> Self {
        let clock = StdClock;
        Self {
            runtime,
            started: clock.now(),
            clock,
        }
    }

    fn tick(&self) {
        thread::sleep(FRAME_INTERVAL);
        self.runtime
            .drain_frame_callbacks(self.clock.elapsed_nanos(self.started));
    }

    fn settle(&self, slider: &Slider) {
        let mut frames = 0;
        while slider.is_animating() {
            self.tick();
            frames += 1;
        }
        self.tick();
        log::debug!("settled after {frames} frames: {slider:?}");
    }
}

fn init_logging() {
    #[cfg(all(feature = "logging", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logging();

    println!("=== Glissando Slider Demo ===");
    println!("Drives a slider through a scripted drag:");
    println!("  - Live value changes while dragging");
    println!("  - Spring settle onto the step grid on release");
    println!("  - Host-driven value updates while idle");
    println!();

    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let Some(executor) = runtime.detach_logic_executor() else {
        log::error!("logic executor already taken");
        return;
    };
    // Consumer callbacks run on their own thread, off the frame loop.
    let worker = thread::spawn(move || while executor.run_next() {});

    let level = MutableState::new(30.0);
    let callbacks = SliderCallbacks::new()
        .on_start(|| log::info!("drag started"))
        .on_change(|value| log::info!("value {value}"))
        .on_confirm(|value| log::info!("confirmed {value}"));
    let config = SliderConfig::default()
        .with_step(5.0)
        .with_haptic_feedback(true);

    let slider = match Slider::builder(config)
        .shared_value(level.clone())
        .callbacks(callbacks)
        .haptics(Arc::new(LoggingHaptics))
        .build(&runtime.handle())
    {
        Ok(slider) => slider,
        Err(err) => {
            log::error!("invalid slider configuration: {err}");
            return;
        }
    };
    let frames = FrameLoop::new(runtime);

    slider.on_layout(TRACK_WIDTH);
    frames.settle(&slider);
    log::info!("laid out at {} px for value {}", slider.position(), slider.value());

    slider.on_drag(DragEvent::start());
    frames.tick();
    let mut translation = 0.0;
    while translation < 150.0 {
        translation += 7.5;
        slider.on_drag(DragEvent::update(translation));
        frames.tick();
    }
    slider.on_drag(DragEvent::end(translation));
    frames.settle(&slider);
    log::info!("thumb at {} px", slider.position());

    level.set(80.0);
    frames.settle(&slider);
    log::info!("host moved value to {}", slider.value());
    log::info!("{:?}", slider.visuals());

    drop(slider);
    drop(frames);
    if worker.join().is_err() {
        log::error!("callback worker panicked");
    }
}
