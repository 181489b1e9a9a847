// error.rs
//
// Error types for tween configuration and composition.
// Runtime validity failures are not errors: they kill the tween.

use thiserror::Error;

/// Errors returned by tween configuration, lifecycle and composition calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// The operation is only allowed before the tween starts playing.
    #[error("tween is already playing")]
    AlreadyPlaying,

    /// The operation needs a playing (or paused) tween.
    #[error("tween is not playing")]
    NotPlaying,

    /// The tween is owned by a group and is driven by it.
    #[error("tween is nested in a group and cannot be driven independently")]
    Nested,

    /// The tween completed or was killed; replay it instead.
    #[error("tween already finished; use replay() to run it again")]
    Finished,

    /// Callback tweens have no duration, so a delay is meaningless.
    #[error("delay is not supported on callback tweens")]
    DelayOnCallback,

    #[error("invalid duration {0}: must be finite and >= 0")]
    InvalidDuration(f32),

    #[error("invalid delay {0}: must be finite and >= 0")]
    InvalidDelay(f32),

    #[error("invalid time scale {0}: must be finite and >= 0")]
    InvalidTimeScale(f32),

    /// An animation curve needs at least one key to be evaluated.
    #[error("animation curve has no keys")]
    EmptyCurve,

    /// The child already belongs to a group.
    #[error("tween is already nested in another group")]
    AlreadyNested,

    /// Playing tweens cannot be moved into a group.
    #[error("cannot add a playing tween to a group")]
    ChildPlaying,

    /// Only group tweens accept children.
    #[error("tween is not a group")]
    NotAGroup,

    /// Adding the child would make the group contain itself.
    #[error("cannot add a group to itself or to one of its descendants")]
    CyclicGroup,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TweenError>;

pub(crate) fn check_non_negative(value: f32, err: fn(f32) -> TweenError) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(err(value))
    }
}
