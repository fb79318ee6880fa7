//! Best-effort playback-status telemetry.
//!
//! Every state-changing action (play, pause, skip, committed seek) arms the
//! single debounce slot; when it fires, one report carrying the player's
//! state at that moment goes out. Push failures are the API worker's to log;
//! they are never shown to the user and never retried.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::api::StatusReport;
use crate::debounce::Debouncer;
use crate::player::PlayerInfo;

pub struct StatusReporter {
    debounce: Debouncer,
}

impl StatusReporter {
    pub fn new(delay: Duration) -> Self {
        Self {
            debounce: Debouncer::new(delay),
        }
    }

    /// Note a state-changing action; collapses with any push already
    /// pending (last write wins).
    pub fn mark_changed(&mut self, now: Instant) {
        self.debounce.schedule_from(now);
    }

    /// The report to push once the debounce window has elapsed. Nothing is
    /// reported while no track is loaded.
    pub fn poll(&mut self, now: Instant, info: &PlayerInfo) -> Option<StatusReport> {
        if !self.debounce.fire(now) {
            return None;
        }
        let name = info.name.clone()?;
        Some(StatusReport {
            name,
            position: info.elapsed.as_secs_f64(),
            playing: info.playing,
            time: unix_now(),
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    fn playing(name: &str, secs: u64) -> PlayerInfo {
        PlayerInfo {
            name: Some(name.to_string()),
            elapsed: Duration::from_secs(secs),
            duration: Some(Duration::from_secs(180)),
            playing: true,
        }
    }

    #[test]
    fn pushes_once_after_the_window_with_the_state_at_fire_time() {
        let mut reporter = StatusReporter::new(DELAY);
        let t0 = Instant::now();

        reporter.mark_changed(t0);
        assert!(reporter.poll(t0, &playing("a", 1)).is_none());

        // The state read at fire time wins, not the one at mark time.
        let report = reporter.poll(t0 + DELAY, &playing("b", 7)).unwrap();
        assert_eq!(report.name, "b");
        assert_eq!(report.position, 7.0);
        assert!(report.playing);

        assert!(reporter.poll(t0 + DELAY * 4, &playing("b", 9)).is_none());
    }

    #[test]
    fn rapid_changes_collapse_into_one_push() {
        let mut reporter = StatusReporter::new(DELAY);
        let t0 = Instant::now();

        reporter.mark_changed(t0);
        reporter.mark_changed(t0 + DELAY / 2);

        // The first deadline was superseded.
        assert!(reporter.poll(t0 + DELAY, &playing("a", 1)).is_none());
        assert!(reporter.poll(t0 + DELAY / 2 + DELAY, &playing("a", 2)).is_some());
    }

    #[test]
    fn nothing_is_reported_while_idle() {
        let mut reporter = StatusReporter::new(DELAY);
        let t0 = Instant::now();

        reporter.mark_changed(t0);
        assert!(reporter.poll(t0 + DELAY, &PlayerInfo::default()).is_none());
        // The armed slot is consumed either way.
        assert!(reporter.poll(t0 + DELAY * 2, &playing("a", 1)).is_none());
    }
}
