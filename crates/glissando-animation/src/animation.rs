//! Frame-driven animation of a single `f64` cell.
//!
//! An [`AnimatedValue`] always animates from wherever it currently is.
//! Starting a transition while another one is in flight replaces the target;
//! springs carry their velocity across the replacement so there is no visible
//! jump, and nothing is ever queued.

use std::cell::RefCell;
use std::rc::Rc;

use glissando_core::{
    FrameCallbackRegistration, FrameClock, MutableState, RuntimeHandle, State, NANOS_PER_MILLI,
};

use crate::easing::Easing;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Longest frame gap a spring will integrate; longer hitches are treated as
/// this long so the simulation cannot blow up.
const MAX_SPRING_FRAME_SECONDS: f64 = 0.064;

/// Fixed integration step for spring physics.
const SPRING_SUBSTEP_SECONDS: f64 = 0.001;

/// Fixed-duration eased transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl TimingSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }
}

impl Default for TimingSpec {
    fn default() -> Self {
        Self::new(300, Easing::EaseOut)
    }
}

/// Damped harmonic oscillator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Spring constant. Higher values pull harder toward the target.
    pub stiffness: f64,
    /// Damping coefficient. Higher values bounce less.
    pub damping: f64,
    /// Mass being moved.
    pub mass: f64,
    /// Below this speed (units per second) the spring may come to rest.
    pub rest_speed_threshold: f64,
    /// Below this distance from the target the spring may come to rest.
    pub rest_displacement_threshold: f64,
    /// Finish as soon as the target is crossed instead of oscillating.
    pub overshoot_clamping: bool,
}

impl SpringSpec {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Damping ratio; 1.0 is critically damped.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            stiffness: 150.0,
            damping: 15.0,
            mass: 1.0,
            rest_speed_threshold: 0.01,
            rest_displacement_threshold: 0.01,
            overshoot_clamping: false,
        }
    }
}

/// How a value moves toward a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Timing(TimingSpec),
    Spring(SpringSpec),
}

impl Default for Transition {
    fn default() -> Self {
        Transition::Timing(TimingSpec::default())
    }
}

/// Animated `f64` cell advanced by the runtime's frame clock.
pub struct AnimatedValue {
    inner: Rc<RefCell<AnimatedValueInner>>,
}

struct AnimatedValueInner {
    state: MutableState<f64>,
    clock: FrameClock,
    current: f64,
    velocity: f64,
    start: f64,
    target: f64,
    transition: Option<Transition>,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    bounds: Option<(f64, f64)>,
    registration: Option<FrameCallbackRegistration>,
}

impl AnimatedValueInner {
    fn clamp(&self, value: f64) -> f64 {
        match self.bounds {
            Some((lo, hi)) => value.clamp(lo, hi),
            None => value,
        }
    }

    fn publish(&self) {
        self.state.set(self.clamp(self.current));
    }

    fn cancel_frame(&mut self) {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
    }

    fn finish(&mut self) {
        self.current = self.target;
        self.start = self.target;
        self.velocity = 0.0;
        self.transition = None;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.publish();
    }

    /// Advances a timing transition. Returns true while it still runs.
    fn step_timing(&mut self, spec: TimingSpec, frame_time_nanos: u64) -> bool {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start_time);
        let duration = (spec.duration_millis * NANOS_PER_MILLI).max(1);
        let linear = (elapsed as f64 / duration as f64).clamp(0.0, 1.0);
        if linear >= 1.0 {
            self.finish();
            return false;
        }
        let progress = spec.easing.transform(linear);
        self.current = self.start + (self.target - self.start) * progress;
        self.publish();
        true
    }

    /// Advances a spring transition. Returns true while it still runs.
    fn step_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) -> bool {
        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            // First frame only establishes the time base.
            return true;
        };
        let dt = (frame_time_nanos.saturating_sub(last) as f64 / NANOS_PER_SECOND)
            .min(MAX_SPRING_FRAME_SECONDS);
        let mass = if spec.mass > 0.0 { spec.mass } else { 1.0 };
        let displacement_before = self.current - self.target;

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP_SECONDS);
            let displacement = self.current - self.target;
            let force = -spec.stiffness * displacement - spec.damping * self.velocity;
            self.velocity += force / mass * h;
            self.current += self.velocity * h;
            remaining -= h;
        }

        let displacement_after = self.current - self.target;
        let crossed = displacement_before * displacement_after < 0.0;
        let at_rest = self.velocity.abs() < spec.rest_speed_threshold
            && (self.current - self.target).abs() < spec.rest_displacement_threshold;
        if at_rest || (spec.overshoot_clamping && crossed) {
            log::trace!("spring settled at {}", self.target);
            self.finish();
            return false;
        }
        self.publish();
        true
    }
}

impl AnimatedValue {
    /// Create a new animated value resting at `initial`.
    pub fn new(initial: f64, runtime: &RuntimeHandle) -> Self {
        let inner = AnimatedValueInner {
            state: MutableState::new(initial),
            clock: runtime.frame_clock(),
            current: initial,
            velocity: 0.0,
            start: initial,
            target: initial,
            transition: None,
            start_time_nanos: None,
            last_frame_nanos: None,
            bounds: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Current (bounded) value.
    pub fn value(&self) -> f64 {
        let inner = self.inner.borrow();
        inner.clamp(inner.current)
    }

    /// Target of the running transition, or the resting value.
    pub fn target(&self) -> f64 {
        self.inner.borrow().target
    }

    pub fn velocity(&self) -> f64 {
        self.inner.borrow().velocity
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().transition.is_some()
    }

    /// Transition currently driving this value, if any.
    pub fn transition(&self) -> Option<Transition> {
        self.inner.borrow().transition
    }

    /// Read-only cell that receives every published frame value.
    pub fn state(&self) -> State<f64> {
        self.inner.borrow().state.as_state()
    }

    /// Clamp every published value into `[lo, hi]`. `None` removes the bounds.
    pub fn set_bounds(&self, bounds: Option<(f64, f64)>) {
        let mut inner = self.inner.borrow_mut();
        inner.bounds = bounds.map(|(lo, hi)| (lo.min(hi), lo.max(hi)));
        inner.target = inner.clamp(inner.target);
        if inner.transition.is_none() {
            inner.current = inner.clamp(inner.current);
            inner.start = inner.current;
        }
        inner.publish();
    }

    /// Animate toward `target`, replacing any transition already in flight.
    pub fn animate_to(&self, target: f64, transition: Transition) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.cancel_frame();

            inner.current = inner.clamp(inner.current);
            inner.start = inner.current;
            inner.target = inner.clamp(target);
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            if matches!(transition, Transition::Timing(_)) {
                inner.velocity = 0.0;
            }

            if inner.current == inner.target && inner.velocity == 0.0 {
                inner.finish();
                return;
            }
            inner.transition = Some(transition);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Jump to `value` immediately, cancelling any transition.
    pub fn snap_to(&self, value: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_frame();
        inner.target = inner.clamp(value);
        inner.finish();
    }

    /// Halt wherever the value currently is.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.cancel_frame();
        inner.target = inner.clamp(inner.current);
        inner.finish();
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatedValueInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatedValueInner>>, frame_time_nanos: u64) {
        let schedule_next = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            match inner.transition {
                Some(Transition::Timing(spec)) => inner.step_timing(spec, frame_time_nanos),
                Some(Transition::Spring(spec)) => inner.step_spring(spec, frame_time_nanos),
                None => false,
            }
        };

        if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

impl Clone for AnimatedValue {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
