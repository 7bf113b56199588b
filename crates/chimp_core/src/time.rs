use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

pub const TARGET_FPS: u32 = 60;

/// Paces a loop to a fixed tick rate and measures how well it keeps up.
///
/// The owner waits until `next_tick()` (e.g. `ControlFlow::WaitUntil`), then
/// calls `tick_if_due()`. Deadlines advance by one period from the previous
/// deadline, so short jitter does not accumulate drift. A loop that falls more
/// than a period behind re-anchors on the current instant instead of
/// bursting to catch up.
pub struct FrameClock {
    pub period: Duration,
    pub slow_frame_threshold: Duration,
    next_tick: Instant,
    last_tick: Instant,
    pub frame_count: u64,
    pub real_dt: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, now: Instant) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1)));
        let period_secs = period.as_secs_f64();
        Self {
            period,
            slow_frame_threshold: Duration::from_millis(250),
            next_tick: now + period,
            last_tick: now,
            frame_count: 0,
            real_dt: 0.0,
            fps_samples: [period_secs; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: f64::from(target_fps.max(1)),
            smoothed_frame_time_ms: period_secs * 1000.0,
        }
    }

    /// Deadline of the next frame tick.
    pub fn next_tick(&self) -> Instant {
        self.next_tick
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// Tick only if the deadline has passed at `now`. Returns whether a tick
    /// happened.
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.tick_at(now);
        true
    }

    /// Record a frame tick at `now`. Returns the measured seconds since the
    /// previous tick.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.real_dt = elapsed.as_secs_f64();
        self.last_tick = now;
        self.frame_count += 1;

        if elapsed > self.slow_frame_threshold {
            log::warn!(
                "Frame took {:.1}ms, budget is {:.1}ms",
                self.real_dt * 1000.0,
                self.period.as_secs_f64() * 1000.0
            );
        }

        self.next_tick += self.period;
        if self.next_tick <= now {
            self.next_tick = now + self.period;
        }

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.real_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}
