use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::debug;
use rodio::{OutputStreamBuilder, Sink};

use crate::api::ApiClient;

use super::sink::create_sink_at;
use super::types::{PlayerCmd, PlayerEvent, PlayerHandle, PlayerInfo, clamp_fraction};

/// A fetched and decodable track. The byte buffer is kept so seeks can
/// rebuild the sink without refetching.
struct LoadedTrack {
    name: String,
    bytes: Arc<[u8]>,
    duration: Option<Duration>,
}

pub(super) fn spawn_player_thread(
    client: ApiClient,
    rx: Receiver<PlayerCmd>,
    info: PlayerHandle,
    events: Sender<PlayerEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("no audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<LoadedTrack> = None;
        let mut paused = true;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        // Ticker thread updating info.elapsed while playback advances.
        let info_for_ticker = info.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_millis(500));
                if let Ok(mut i) = info_for_ticker.lock() {
                    if i.playing {
                        i.elapsed += Duration::from_millis(500);
                    }
                }
            }
        });

        fn go_idle(
            sink: &mut Option<Sink>,
            current: &mut Option<LoadedTrack>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            info: &PlayerHandle,
        ) {
            if let Some(s) = sink.take() {
                s.stop();
            }
            *current = None;
            *paused = true;
            *started_at = None;
            *accumulated = Duration::ZERO;
            if let Ok(mut i) = info.lock() {
                *i = PlayerInfo::default();
            }
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(PlayerCmd::Load {
                    name,
                    autoplay,
                    start_at,
                }) => {
                    // At most one live sink: the previous one is fully
                    // stopped and released before the replacement exists.
                    go_idle(
                        &mut sink,
                        &mut current,
                        &mut paused,
                        &mut started_at,
                        &mut accumulated,
                        &info,
                    );

                    let bytes: Arc<[u8]> = match client.fetch_song(&name) {
                        Ok(bytes) => Arc::from(bytes),
                        Err(e) => {
                            let _ = events.send(PlayerEvent::LoadFailed {
                                name,
                                message: e.to_string(),
                            });
                            continue;
                        }
                    };

                    match create_sink_at(&stream, bytes.clone(), start_at) {
                        Ok((new_sink, duration)) => {
                            debug!("loaded {name:?} ({} bytes)", bytes.len());
                            if autoplay {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            }
                            paused = !autoplay;
                            accumulated = start_at;
                            if let Ok(mut i) = info.lock() {
                                i.name = Some(name.clone());
                                i.elapsed = start_at;
                                i.duration = duration;
                                i.playing = autoplay;
                            }
                            current = Some(LoadedTrack {
                                name,
                                bytes,
                                duration,
                            });
                            sink = Some(new_sink);
                        }
                        Err(e) => {
                            let _ = events.send(PlayerEvent::LoadFailed {
                                name,
                                message: e.to_string(),
                            });
                        }
                    }
                }

                Ok(PlayerCmd::TogglePause) => {
                    // Idle player: nothing to flip.
                    if let Some(ref s) = sink {
                        if paused {
                            s.play();
                            started_at = Some(Instant::now());
                            if let Ok(mut i) = info.lock() {
                                i.playing = true;
                            }
                        } else {
                            s.pause();
                            if let Some(st) = started_at {
                                accumulated += st.elapsed();
                            }
                            started_at = None;
                            if let Ok(mut i) = info.lock() {
                                i.playing = false;
                                // Resync from the precise accounting; the
                                // coarse ticker drifts within its period.
                                i.elapsed = accumulated;
                            }
                        }
                        paused = !paused;
                    }
                }

                Ok(PlayerCmd::Stop) => {
                    go_idle(
                        &mut sink,
                        &mut current,
                        &mut paused,
                        &mut started_at,
                        &mut accumulated,
                        &info,
                    );
                }

                Ok(PlayerCmd::SeekTo(fraction)) => {
                    // No-op without a loaded track or a known duration.
                    let Some((name, bytes, total)) = current
                        .as_ref()
                        .and_then(|t| t.duration.map(|d| (t.name.clone(), t.bytes.clone(), d)))
                    else {
                        continue;
                    };
                    if sink.is_none() {
                        continue;
                    }

                    let target = total.mul_f64(clamp_fraction(fraction));

                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    match create_sink_at(&stream, bytes, target) {
                        Ok((new_sink, _)) => {
                            if paused {
                                started_at = None;
                            } else {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            }
                            accumulated = target;
                            if let Ok(mut i) = info.lock() {
                                i.elapsed = target;
                            }
                            sink = Some(new_sink);
                        }
                        Err(e) => {
                            // The buffer decoded once already; a failure here
                            // means the track is gone for good.
                            go_idle(
                                &mut sink,
                                &mut current,
                                &mut paused,
                                &mut started_at,
                                &mut accumulated,
                                &info,
                            );
                            let _ = events.send(PlayerEvent::LoadFailed {
                                name,
                                message: e.to_string(),
                            });
                        }
                    }
                }

                Ok(PlayerCmd::Quit) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    if let Ok(mut i) = info.lock() {
                        i.playing = false;
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    // Completion check: a drained sink means the track ended.
                    let drained = sink.as_ref().is_some_and(|s| !paused && s.empty());
                    if drained {
                        go_idle(
                            &mut sink,
                            &mut current,
                            &mut paused,
                            &mut started_at,
                            &mut accumulated,
                            &info,
                        );
                        let _ = events.send(PlayerEvent::TrackEnded);
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
