/// Nominal DMG refresh interval in milliseconds (~59.7 Hz rounded to 60).
pub const REFRESH_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Endless stream of refresh timestamps for hosts without a vsync callback.
///
/// Never returns `None`; callers bound it with `take` or stop pulling.
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshClock {
    next: f64,
    interval: f64,
}

impl RefreshClock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Restarts the stream at `now`.
    pub fn starting_at(now: f64) -> Self {
        Self {
            next: now,
            interval: REFRESH_INTERVAL_MS,
        }
    }
}

impl Default for RefreshClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for RefreshClock {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let now = self.next;
        self.next += self.interval;
        Some(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_monotonic_timestamps() {
        let stamps: Vec<f64> = RefreshClock::starting_at(100.0).take(3).collect();
        assert_eq!(stamps[0], 100.0);
        assert!(stamps[1] > stamps[0] && stamps[2] > stamps[1]);
        assert!((stamps[2] - stamps[0] - 2.0 * REFRESH_INTERVAL_MS).abs() < 1e-9);
    }
}
