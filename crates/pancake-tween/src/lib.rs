pub mod config;
pub mod core;
pub mod easing;
pub mod error;
pub mod interpolation;
pub mod manager;
pub mod sync;
pub mod tween;

// Re-export key types at crate root for convenience
pub use config::{EaseSetting, TweenSettings};
pub use crate::core::time::{FixedTimestep, FrameTime, TimeMode, UpdateMode};
pub use easing::{lerp, AnimationCurve, Ease, EaseFn, EaseFunction, Keyframe};
pub use error::{Result, TweenError};
pub use interpolation::{Color, Interpolate};
pub use manager::TweenManager;
pub use sync::SyncContext;
pub use tween::{Completion, ResetMode, Tween, TweenBuilder, TweenStatus};
