use crate::constants::STATS_SAMPLE_MS;

/// One published frames-per-second reading with the running extremes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FpsSample {
    pub fps: f32,
    pub min: f32,
    pub max: f32,
}

impl FpsSample {
    pub fn label(&self) -> String {
        format!(
            "{:.0} FPS ({:.0}-{:.0})",
            self.fps.round(),
            self.min.round(),
            self.max.round()
        )
    }
}

/// Frame counter that publishes an FPS reading once per sampling window.
#[derive(Clone, Debug)]
pub struct FrameStats {
    frames: u32,
    window_start_ms: f64,
    min: f32,
    max: f32,
    last: Option<FpsSample>,
}

impl FrameStats {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frames: 0,
            window_start_ms: now_ms,
            min: f32::INFINITY,
            max: 0.0,
            last: None,
        }
    }

    /// Count a frame. Returns a sample when the window has closed.
    pub fn update(&mut self, now_ms: f64) -> Option<FpsSample> {
        self.frames += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed < STATS_SAMPLE_MS {
            return None;
        }
        let fps = (self.frames as f64 * 1000.0 / elapsed) as f32;
        self.min = self.min.min(fps);
        self.max = self.max.max(fps);
        self.window_start_ms = now_ms;
        self.frames = 0;
        let sample = FpsSample {
            fps,
            min: self.min,
            max: self.max,
        };
        self.last = Some(sample);
        Some(sample)
    }

    /// Frames counted in the current, still open window.
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }

    pub fn last(&self) -> Option<FpsSample> {
        self.last
    }
}
