use super::*;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

#[test]
fn handle_updates_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_playback(PlaybackState::Playing);
    handle.set_title(Some("abbey road".to_string()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackState::Playing);
        assert_eq!(s.title.as_deref(), Some("abbey road"));
    }

    handle.set_playback(PlaybackState::Stopped);
    handle.set_title(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackState::Stopped);
        assert_eq!(s.title, None);
    }
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Playing;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Paused;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_carries_the_title_and_tolerates_idle() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    // Idle: the key is present with an empty title.
    assert!(iface.metadata().contains_key("xesam:title"));

    {
        let mut s = state.lock().unwrap();
        s.title = Some("abbey road".to_string());
    }
    let map = iface.metadata();
    let title = map.get("xesam:title").unwrap();
    assert_eq!(
        String::try_from(title.clone()).ok().as_deref(),
        Some("abbey road")
    );
}

#[test]
fn media_key_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.stop();

    assert!(matches!(rx.try_recv(), Ok(ControlCmd::PlayPause)));
    assert!(matches!(rx.try_recv(), Ok(ControlCmd::Next)));
    assert!(matches!(rx.try_recv(), Ok(ControlCmd::Stop)));
}
