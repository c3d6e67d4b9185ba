/// Elapsed/delta bookkeeping for the frame loop. Callers pass the seconds
/// elapsed since the scene was created.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub elapsed: f64,
    pub previous: f64,
    pub delta: f64,
}

impl FrameClock {
    pub fn tick(&mut self, elapsed_sec: f64) -> f64 {
        self.elapsed = elapsed_sec;
        self.delta = (elapsed_sec - self.previous).max(0.0);
        self.previous = elapsed_sec;
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_tracks_previous_tick() {
        let mut c = FrameClock::default();
        assert_eq!(c.tick(0.5), 0.5);
        assert!((c.tick(0.516) - 0.016).abs() < 1e-9);
        assert_eq!(c.previous, 0.516);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut c = FrameClock::default();
        c.tick(2.0);
        assert_eq!(c.tick(1.0), 0.0);
    }
}
