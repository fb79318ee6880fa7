//! Player-related small types and handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum PlayerCmd {
    /// Fetch and load `name`, replacing any current sink.
    Load {
        name: String,
        autoplay: bool,
        start_at: Duration,
    },
    /// Flip pause/resume; ignored when nothing is loaded.
    TogglePause,
    /// Drop the current sink and go idle.
    Stop,
    /// Seek to a normalized `[0, 1]` position of the current track; ignored
    /// when nothing is loaded or the duration is unknown.
    SeekTo(f64),
    /// Shut the player thread down.
    Quit,
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlayerInfo {
    /// Currently loaded track name, if any.
    pub name: Option<String>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total duration when the container reports one.
    pub duration: Option<Duration>,
    /// Whether playback is currently advancing.
    pub playing: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlayerInfo {
    pub fn state(&self) -> PlaybackState {
        if self.name.is_none() {
            PlaybackState::Stopped
        } else if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }
}

pub type PlayerHandle = Arc<Mutex<PlayerInfo>>;

/// Notifications the player thread pushes back to the event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current sink drained to its end.
    TrackEnded,
    /// Fetching or decoding a track failed; the player is idle again.
    LoadFailed { name: String, message: String },
}

/// Progress threshold past which the end-of-track safety net arms.
pub const NEAR_END_FRACTION: f64 = 0.99;

/// Clamp a normalized seek target into `[0, 1]`.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Playback progress as a fraction of the known duration; `None` while the
/// duration is unknown (metadata not decoded) or zero.
pub fn progress_fraction(info: &PlayerInfo) -> Option<f64> {
    let total = info.duration?;
    if total.is_zero() {
        return None;
    }
    Some((info.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
}
