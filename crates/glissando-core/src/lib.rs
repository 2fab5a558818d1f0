//! Core runtime for Glissando.
//!
//! Two execution domains meet here. The animation domain is the
//! [`Runtime`]: frame callbacks, frame observers and [`MutableState`] cells,
//! all single-threaded and driven by [`Runtime::drain_frame_callbacks`]. The
//! business-logic domain is a [`LogicExecutor`] fed through a one-way
//! [`LogicDispatcher`] channel.

mod frame_clock;
mod platform;
mod reaction;
mod runtime;
mod state;

pub use frame_clock::{FrameClock, FrameCallbackRegistration, FrameObserverRegistration};
pub use platform::{Clock, RuntimeScheduler, StdClock};
pub use reaction::Reaction;
pub use runtime::{
    DefaultScheduler, LogicDispatcher, LogicExecutor, Runtime, RuntimeHandle, TestScheduler,
};
pub use state::{MutableState, State};

pub type FrameCallbackId = u64;
pub type FrameObserverId = u64;

/// Nanoseconds per millisecond, for converting frame times.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
