use serde::{Deserialize, Serialize};

/// Which clock a tween reads its delta time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeMode {
    /// Frame delta affected by the host's time scale (pausable game time).
    #[default]
    Scaled,
    /// Real frame delta, unaffected by the host's time scale.
    Unscaled,
}

/// Which host update phase drives a tween when it is played through a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Update,
    LateUpdate,
    FixedUpdate,
}

/// One frame's worth of time, supplied by the host to every `update` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Scaled delta time in seconds.
    pub delta: f32,
    /// Unscaled delta time in seconds.
    pub unscaled_delta: f32,
    /// Global multiplier applied on top of each tween's own time scale.
    pub time_scale: f32,
}

impl FrameTime {
    /// A frame where scaled and unscaled deltas are the same.
    pub fn new(dt: f32) -> Self {
        Self {
            delta: dt,
            unscaled_delta: dt,
            time_scale: 1.0,
        }
    }

    pub fn with_unscaled(delta: f32, unscaled_delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta,
            time_scale: 1.0,
        }
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Delta for the given clock, with the global scale applied.
    #[inline]
    pub fn delta_for(&self, mode: TimeMode) -> f32 {
        let dt = match mode {
            TimeMode::Scaled => self.delta,
            TimeMode::Unscaled => self.unscaled_delta,
        };
        dt * self.time_scale
    }
}

/// Fixed timestep accumulator.
/// Drives `FixedUpdate` tweens at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(1.0 / 50.0)
    }
}
