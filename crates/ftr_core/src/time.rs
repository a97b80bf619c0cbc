use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Fixed-step animation clock.
///
/// Blinker timers are counted in ticks, so the tick rate (not the display
/// refresh rate) sets their speed. Each frame feeds wall-clock time into an
/// accumulator and `should_tick()` drains it in `tick_dt` slices.
pub struct TimeState {
    pub tick_dt: f64,
    pub max_accumulator: f64,
    accumulator: f64,
    pub tick_count: u64,
    pub frame_count: u64,
    pub ticks_this_frame: u32,
    pub real_dt: f64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new(tick_rate_hz: f64) -> Self {
        let tick_dt = 1.0 / tick_rate_hz;
        Self {
            tick_dt,
            max_accumulator: 0.25,
            accumulator: 0.0,
            tick_count: 0,
            frame_count: 0,
            ticks_this_frame: 0,
            real_dt: 0.0,
            last_instant: Instant::now(),
            fps_samples: [tick_dt; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: tick_rate_hz,
            smoothed_frame_time_ms: tick_dt * 1000.0,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(dt);
    }

    /// Feed `dt` seconds of elapsed time. `begin_frame` calls this with the
    /// measured wall-clock delta.
    pub fn advance(&mut self, dt: f64) {
        self.real_dt = dt;

        // A stalled frame (window drag, breakpoint) must not replay seconds of
        // blinker ticks at once.
        if self.real_dt > self.max_accumulator {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator to {}ms",
                self.real_dt * 1000.0,
                self.max_accumulator * 1000.0
            );
            self.real_dt = self.max_accumulator;
        }

        self.accumulator += self.real_dt;
        self.ticks_this_frame = 0;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    pub fn should_tick(&mut self) -> bool {
        if self.accumulator >= self.tick_dt {
            self.accumulator -= self.tick_dt;
            self.tick_count += 1;
            self.ticks_this_frame += 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new(60.0)
    }
}
