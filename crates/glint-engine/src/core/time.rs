/// Variable-timestep frame clock.
/// Turns wall-clock timestamps into clamped, scalable frame deltas.
pub struct FrameClock {
    /// Timestamp of the previous `advance` call, seconds.
    last: Option<f64>,
    /// Scaled delta of the current frame, seconds.
    delta: f32,
    /// Unscaled delta of the current frame, seconds.
    raw_delta: f32,
    time_scale: f32,
    /// Longest raw delta accepted; debugger pauses and hitches clamp here.
    max_delta: f32,
    target_fps: u32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            last: None,
            delta: 0.0,
            raw_delta: 0.0,
            time_scale: 1.0,
            max_delta: 0.25,
            target_fps,
        }
    }

    /// Feed the current wall-clock time once per frame. The first call
    /// produces a zero delta.
    pub fn advance(&mut self, now_seconds: f64) {
        let raw = match self.last {
            Some(last) => (now_seconds - last) as f32,
            None => 0.0,
        };
        self.last = Some(now_seconds);
        self.raw_delta = raw.clamp(0.0, self.max_delta);
        self.delta = self.raw_delta * self.time_scale;
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    pub fn unscaled_delta_seconds(&self) -> f32 {
        self.raw_delta
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// 0 freezes updates while rendering continues; negatives clamp to 0.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale.max(0.0);
    }

    /// Seconds each frame may spend to hold the target rate, 0 when uncapped.
    pub fn frame_budget(&self) -> f32 {
        if self.target_fps == 0 {
            return 0.0;
        }
        1.0 / self.target_fps as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}
