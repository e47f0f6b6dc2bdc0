//! Wall-clock frame driving for hosts without a display vsync.
//!
//! [`StdRuntime`] pairs a [`Runtime`] with a scheduler that only raises a
//! flag. The host loop polls [`StdRuntime::take_frame_request`] and answers
//! each request with [`StdRuntime::pump_frame`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rawsheet_core::{Clock, Runtime, RuntimeHandle, RuntimeScheduler};
use web_time::Instant;

/// Scheduler that records that a frame was requested.
#[derive(Debug, Default)]
pub struct FrameRequestFlag {
    requested: AtomicBool,
}

impl FrameRequestFlag {
    /// Returns whether a frame has been requested since the last call.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}

impl RuntimeScheduler for FrameRequestFlag {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }
}

/// Clock backed by [`web_time::Instant`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// A runtime whose frames are stamped with wall-clock time since creation.
pub struct StdRuntime {
    requests: Arc<FrameRequestFlag>,
    clock: StdClock,
    started_at: Instant,
    runtime: Runtime,
}

impl StdRuntime {
    pub fn new() -> Self {
        let requests = Arc::new(FrameRequestFlag::default());
        let runtime = Runtime::new(requests.clone());
        let clock = StdClock;
        Self {
            requests,
            started_at: clock.now(),
            clock,
            runtime,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Returns whether the runtime asked for a frame since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.requests.take()
    }

    /// Drains one frame stamped with the current time. Returns that time in
    /// nanoseconds.
    pub fn pump_frame(&self) -> u64 {
        let now = self.clock.elapsed_nanos(self.started_at);
        self.runtime.drain_frame_callbacks(now);
        now
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("requests", &self.requests)
            .field("runtime", &self.runtime)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
