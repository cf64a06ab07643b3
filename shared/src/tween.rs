use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadraticIn,
    #[default]
    QuadraticOut,
    QuadraticInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep {
    /// Eased progress in `[0, 1]`
    pub progress: f32,
    pub just_started: bool,
    pub just_finished: bool,
}

/// Time-based interpolation driver. Owns no values; callers lerp with
/// the returned progress so the endpoints may move while it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
    started: bool,
    finished: bool,
}

impl Tween {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            easing,
            started: false,
            finished: false,
        }
    }

    pub fn step(&mut self, dt: f32) -> TweenStep {
        let just_started = !self.started;
        self.started = true;

        if self.finished {
            return TweenStep {
                progress: 1.0,
                just_started,
                just_finished: false,
            };
        }

        self.elapsed += dt.max(0.0);
        let linear = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        let just_finished = linear >= 1.0;
        self.finished = just_finished;

        TweenStep {
            progress: self.easing.apply(linear),
            just_started,
            just_finished,
        }
    }
}
