use super::*;

use glissando_core::{Runtime, TestScheduler};
use std::sync::Arc;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

struct Frames {
    runtime: Runtime,
    time: u64,
}

impl Frames {
    fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(TestScheduler::default())),
            time: 0,
        }
    }

    fn advance(&mut self) {
        self.time += FRAME_NANOS;
        self.runtime.drain_frame_callbacks(self.time);
    }

    fn run_until_idle(&mut self, value: &AnimatedValue, max_frames: usize) -> Vec<f64> {
        let mut samples = Vec::new();
        for _ in 0..max_frames {
            if !value.is_running() {
                break;
            }
            self.advance();
            samples.push(value.value());
        }
        samples
    }
}

#[test]
fn timing_interpolates_and_lands_on_target() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.animate_to(100.0, Transition::Timing(TimingSpec::linear(160)));
    assert!(value.is_running());
    assert_eq!(value.value(), 0.0, "nothing moves before the first frame");

    let samples = frames.run_until_idle(&value, 32);
    assert!(samples.iter().any(|v| *v > 0.0 && *v < 100.0));
    assert!(samples.windows(2).all(|w| w[0] <= w[1]), "linear tween is monotonic");
    assert_eq!(value.value(), 100.0);
    assert_eq!(value.state().get(), 100.0);
    assert!(!value.is_running());
    assert!(!frames.runtime.needs_frame());
}

#[test]
fn spring_settles_on_target() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.animate_to(1.6, Transition::Spring(SpringSpec::default()));
    assert_eq!(value.transition(), Some(Transition::Spring(SpringSpec::default())));

    frames.run_until_idle(&value, 600);
    assert!(!value.is_running(), "spring should come to rest");
    assert_eq!(value.transition(), None);
    assert_eq!(value.value(), 1.6);
    assert_eq!(value.velocity(), 0.0);
}

#[test]
fn retargeting_continues_from_current_value() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.animate_to(100.0, Transition::Spring(SpringSpec::default()));
    for _ in 0..6 {
        frames.advance();
    }
    let mid = value.value();
    let velocity = value.velocity();
    assert!(mid > 0.0 && mid < 100.0);
    assert!(velocity > 0.0);

    value.animate_to(0.0, Transition::Spring(SpringSpec::default()));
    assert_eq!(value.value(), mid, "replacing the target must not jump");
    assert_eq!(value.velocity(), velocity, "springs keep their momentum");
    assert_eq!(value.target(), 0.0);

    frames.run_until_idle(&value, 600);
    assert_eq!(value.value(), 0.0);
}

#[test]
fn timing_retarget_starts_from_in_flight_value() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.animate_to(100.0, Transition::Timing(TimingSpec::linear(300)));
    for _ in 0..5 {
        frames.advance();
    }
    let mid = value.value();
    value.animate_to(50.0, Transition::Timing(TimingSpec::linear(300)));
    frames.advance();
    assert_eq!(value.value(), mid, "first frame of the new tween starts where the old one was");
    frames.run_until_idle(&value, 64);
    assert_eq!(value.value(), 50.0);
}

#[test]
fn snap_and_stop_cancel_in_flight_transitions() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.animate_to(100.0, Transition::Timing(TimingSpec::linear(300)));
    frames.advance();
    frames.advance();

    value.snap_to(42.0);
    assert!(!value.is_running());
    frames.advance();
    assert_eq!(value.value(), 42.0);

    value.animate_to(0.0, Transition::Spring(SpringSpec::default()));
    frames.advance();
    frames.advance();
    frames.advance();
    value.stop();
    let halted = value.value();
    frames.advance();
    assert_eq!(value.value(), halted);
    assert_eq!(value.target(), halted);
}

#[test]
fn bounds_clamp_published_values() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    value.set_bounds(Some((0.0, 100.0)));
    value.animate_to(100.0, Transition::Spring(SpringSpec::new(600.0, 5.0)));

    let samples = frames.run_until_idle(&value, 600);
    assert!(samples.iter().all(|v| (0.0..=100.0).contains(v)));
    assert_eq!(value.value(), 100.0);

    value.snap_to(250.0);
    assert_eq!(value.value(), 100.0);
    value.set_bounds(Some((0.0, 40.0)));
    assert_eq!(value.value(), 40.0);
}

#[test]
fn animating_to_resting_value_finishes_immediately() {
    let frames = Frames::new();
    let value = AnimatedValue::new(7.0, &frames.runtime.handle());
    value.animate_to(7.0, Transition::default());
    assert!(!value.is_running());
    assert!(!frames.runtime.needs_frame());
}

#[test]
fn overshoot_clamping_stops_at_first_crossing() {
    let mut frames = Frames::new();
    let value = AnimatedValue::new(0.0, &frames.runtime.handle());
    let spec = SpringSpec::new(600.0, 5.0).with_overshoot_clamping(true);
    value.animate_to(10.0, Transition::Spring(spec));
    let samples = frames.run_until_idle(&value, 600);
    assert!(samples.iter().all(|v| *v <= 10.0));
    assert_eq!(value.value(), 10.0);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinearIn,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start should be ~0 for {easing:?}");
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end should be ~1 for {easing:?}");
    }
    assert!(Easing::EaseOut.transform(0.5) > 0.5);
    assert!(Easing::EaseIn.transform(0.5) < 0.5);
}

#[test]
fn default_specs_match_slider_tuning() {
    let timing = TimingSpec::default();
    assert_eq!(timing.duration_millis, 300);
    assert_eq!(timing.easing, Easing::EaseOut);

    let spring = SpringSpec::default();
    assert!(spring.damping_ratio() < 1.0, "default spring is slightly bouncy");
}
