use std::time::Instant;

/// wall-clock anchor for the whole run; everything downstream works in seconds since start.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// monotonic seconds since run start, for the animation phase
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    pub fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// windowed frame counter: averages over roughly one second, then resets. window boundaries
/// drift by up to one frame's duration, which is fine for a title readout.
#[derive(Debug)]
pub struct FpsMeter {
    window_start: f64,
    frames: u32,
}

impl FpsMeter {
    pub fn new(now: f64) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// records one finished frame; yields the windowed average once >= 1s has elapsed.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed >= 1.0 {
            let fps = f64::from(self.frames) / elapsed;
            self.frames = 0;
            self.window_start = now;
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_frames_in_one_second() {
        let mut meter = FpsMeter::new(0.0);
        for i in 1..60 {
            assert_eq!(meter.tick(f64::from(i) / 60.0), None);
        }
        assert_eq!(meter.tick(1.0), Some(60.0));
    }

    #[test]
    fn test_window_resets_after_emit() {
        let mut meter = FpsMeter::new(0.0);
        assert_eq!(meter.tick(2.0), Some(0.5));
        // new window starts at the emit time, not at a fixed grid
        assert_eq!(meter.tick(2.5), None);
        assert_eq!(meter.tick(3.0), Some(2.0));
    }

    #[test]
    fn test_overlong_window_divides_by_actual_elapsed() {
        let mut meter = FpsMeter::new(0.0);
        // 3 frames spread over 1.5 seconds
        assert_eq!(meter.tick(0.5), None);
        assert_eq!(meter.tick(0.75), None);
        assert_eq!(meter.tick(1.5), Some(2.0));
    }
}
