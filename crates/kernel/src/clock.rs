use std::time::{Duration, Instant};

/// Wall clock for the frame loop: elapsed time feeds the shader, delta is
/// for frame timing diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Restart both the elapsed and the delta reference points.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Seconds since construction or the last reset.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Time since the previous call to `delta` (or since reset).
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.elapsed();
        assert!(a >= 0.0);
        assert!(b > a);
    }

    #[test]
    fn delta_measures_since_previous_call() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.delta();
        assert!(first >= Duration::from_millis(5));
        let second = clock.delta();
        assert!(second < first);
    }

    #[test]
    fn reset_restarts_elapsed() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(50));
        let before = clock.elapsed();
        clock.reset();
        assert!(clock.elapsed() < before);
    }
}
