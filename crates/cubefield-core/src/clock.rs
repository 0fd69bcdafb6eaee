/// Converts raw frame timestamps (milliseconds, arbitrary epoch) into seconds
/// elapsed since the first frame.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    epoch_offset_sec: Option<f64>,
    elapsed_sec: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first call pins the epoch and returns 0.
    pub fn tick(&mut self, raw_timestamp_ms: f64) -> f64 {
        let seconds = raw_timestamp_ms * 0.001;
        let offset = *self.epoch_offset_sec.get_or_insert(-seconds);
        self.elapsed_sec = offset + seconds;
        self.elapsed_sec
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_sec
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.epoch_offset_sec.is_some()
    }

    /// Forget the epoch; the next tick starts again from zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero_even_for_large_timestamps() {
        let mut c = AnimationClock::new();
        assert!(!c.is_initialized());
        assert_eq!(c.tick(1_234_567.89), 0.0);
        assert!(c.is_initialized());
    }

    #[test]
    fn reset_reinitializes() {
        let mut c = AnimationClock::new();
        c.tick(100.0);
        c.tick(600.0);
        c.reset();
        assert_eq!(c.tick(5_000.0), 0.0);
        assert!((c.tick(5_250.0) - 0.25).abs() < 1e-12);
    }
}
