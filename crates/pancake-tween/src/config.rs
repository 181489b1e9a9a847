// config.rs
//
// Serializable tween settings. Used as project-wide defaults or per-tween
// presets loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::core::time::{TimeMode, UpdateMode};
use crate::easing::{AnimationCurve, Ease, EaseFunction};
use crate::tween::ResetMode;

/// Easing entry of [`TweenSettings`]: a named ease or a keyframed curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EaseSetting {
    Named(Ease),
    Curve(AnimationCurve),
}

impl Default for EaseSetting {
    fn default() -> Self {
        EaseSetting::Named(Ease::Linear)
    }
}

impl From<EaseSetting> for EaseFunction {
    fn from(setting: EaseSetting) -> Self {
        match setting {
            EaseSetting::Named(ease) => EaseFunction::from(ease),
            EaseSetting::Curve(curve) => EaseFunction::from(curve),
        }
    }
}

/// Configuration applied to a tween before it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenSettings {
    pub ease: EaseSetting,
    /// Total iterations; -1 loops forever, 0 and 1 both play once.
    pub loops: i32,
    pub loop_reset_mode: ResetMode,
    /// Seconds to wait before the first iteration.
    pub delay: f32,
    pub time_scale: f32,
    pub time_mode: TimeMode,
    pub update_mode: UpdateMode,
}

impl Default for TweenSettings {
    fn default() -> Self {
        Self {
            ease: EaseSetting::default(),
            loops: 0,
            loop_reset_mode: ResetMode::InitialValues,
            delay: 0.0,
            time_scale: 1.0,
            time_mode: TimeMode::Scaled,
            update_mode: UpdateMode::Update,
        }
    }
}

impl TweenSettings {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
