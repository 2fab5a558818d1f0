//! Platform abstraction traits for the Glissando runtime.
//!
//! Hosts implement these to drive frames from their own event loop.

use web_time::Instant;

/// Schedules work for the runtime.
///
/// Implementations are asked for a new frame whenever an animation or a
/// posted callback is pending. They must be safe to use from multiple
/// threads because the logic dispatcher can be cloned across threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Wall clock backed by `web_time`, so it also works on wasm targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        let nanos = since.elapsed().as_nanos();
        u64::try_from(nanos).unwrap_or(u64::MAX)
    }
}
