use std::time::Duration;

use super::types::{PlaybackState, PlayerInfo, clamp_fraction, progress_fraction};

fn info(name: Option<&str>, elapsed: u64, duration: Option<u64>, playing: bool) -> PlayerInfo {
    PlayerInfo {
        name: name.map(str::to_string),
        elapsed: Duration::from_secs(elapsed),
        duration: duration.map(Duration::from_secs),
        playing,
    }
}

#[test]
fn clamp_fraction_bounds_the_target() {
    assert_eq!(clamp_fraction(0.5), 0.5);
    assert_eq!(clamp_fraction(-0.2), 0.0);
    assert_eq!(clamp_fraction(1.7), 1.0);
    assert_eq!(clamp_fraction(f64::NAN), 0.0);
}

#[test]
fn progress_fraction_requires_a_known_duration() {
    assert_eq!(progress_fraction(&info(Some("a"), 10, None, true)), None);
    assert_eq!(progress_fraction(&info(Some("a"), 10, Some(0), true)), None);
}

#[test]
fn progress_fraction_scales_and_clamps() {
    let half = progress_fraction(&info(Some("a"), 50, Some(100), true)).unwrap();
    assert!((half - 0.5).abs() < f64::EPSILON);

    // The ticker can overshoot the duration slightly; the fraction caps at 1.
    let over = progress_fraction(&info(Some("a"), 120, Some(100), true)).unwrap();
    assert_eq!(over, 1.0);
}

#[test]
fn state_maps_name_and_playing_flags() {
    assert_eq!(info(None, 0, None, false).state(), PlaybackState::Stopped);
    assert_eq!(
        info(Some("a"), 0, Some(10), true).state(),
        PlaybackState::Playing
    );
    assert_eq!(
        info(Some("a"), 0, Some(10), false).state(),
        PlaybackState::Paused
    );
}
