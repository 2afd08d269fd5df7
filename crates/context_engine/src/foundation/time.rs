//! Time management utilities

use std::time::{Duration, Instant};

/// Fixed-rate frame pacer
///
/// The core runs on a fixed delta (e.g. 1/30 s) no matter how long a frame
/// actually took; this only keeps the host from running ahead of real time.
pub struct FixedTimestep {
    period: Duration,
    next_frame: Instant,
    frame_count: u64,
}

impl FixedTimestep {
    /// Create a pacer for `frame_rate` frames per second
    pub fn new(frame_rate: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)));
        Self {
            period,
            next_frame: Instant::now() + period,
            frame_count: 0,
        }
    }

    /// Fixed delta handed to every subsystem, in seconds
    pub fn delta_time(&self) -> f32 {
        self.period.as_secs_f32()
    }

    /// Number of frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sleep until the next frame boundary.
    ///
    /// If the host fell behind by more than a whole period the schedule is
    /// re-based on "now" instead of trying to catch up with a burst of frames.
    pub fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.next_frame.checked_duration_since(now) {
            std::thread::sleep(remaining);
            self.next_frame += self.period;
        } else {
            log::trace!(
                "Frame {} overran its budget by {:?}",
                self.frame_count,
                now.duration_since(self.next_frame)
            );
            self.next_frame = now + self.period;
        }
        self.frame_count += 1;
    }
}
