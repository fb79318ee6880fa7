use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{Api, ApiCmd, ApiEvent};
use crate::app::{App, Drag, Pane};
use crate::config;
use crate::debounce::Debouncer;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{self, PlaybackState, Player, PlayerCmd, PlayerEvent};
use crate::queue::Queue;
use crate::search;
use crate::status::StatusReporter;
use crate::ui::{self, in_rect};

/// Grace between crossing the near-end threshold and the safety-net skip.
const AUTOSKIP_DELAY: Duration = Duration::from_millis(200);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub status: StatusReporter,
    /// One-shot timer for the near-end auto-skip safety net.
    pub autoskip: Debouncer,
    pub autoskip_armed: bool,
    /// Autoplay of the seeded queue holds until the resume pull answered.
    pub resume_pending: bool,
    /// Track name sent to the player but not yet visible in its shared info.
    pub pending_load: Option<String>,
    /// Last track name mirrored into the terminal title.
    pub last_title: Option<String>,
    /// Last (state, title) pair mirrored to MPRIS.
    pub last_remote: (PlaybackState, Option<String>),
    /// Hit-test regions of the last drawn frame.
    pub hit: ui::HitAreas,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings) -> Self {
        Self {
            status: StatusReporter::new(Duration::from_millis(settings.status.debounce_ms)),
            autoskip: Debouncer::new(AUTOSKIP_DELAY),
            autoskip_armed: false,
            resume_pending: true,
            pending_load: None,
            last_title: None,
            last_remote: (PlaybackState::Stopped, None),
            hit: ui::HitAreas::default(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing and sync with the
/// API worker, the player thread and MPRIS. Returns `Ok(())` when shutdown
/// is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    api: &Api,
    api_events: &Receiver<ApiEvent>,
    player: &Player,
    player_events: &Receiver<PlayerEvent>,
    mpris: &MprisHandle,
    control_tx: &Sender<ControlCmd>,
    control_rx: &Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();

        app.sync_player();
        if let Some(pending) = state.pending_load.as_deref() {
            if app.player.name.as_deref() == Some(pending) {
                state.pending_load = None;
            }
        }

        // Mirror the track name into the terminal title.
        if app.player.name != state.last_title {
            let title = app.player.name.clone().unwrap_or_else(|| "encore".to_string());
            let _ = execute!(io::stdout(), SetTitle(title));
            state.last_title = app.player.name.clone();
            // A different track restarts the near-end bookkeeping.
            state.autoskip_armed = false;
            state.autoskip.cancel();
        }

        // Mirror playback state to MPRIS when it changed.
        let remote = (app.player.state(), app.player.name.clone());
        if remote != state.last_remote {
            mpris.set_playback(remote.0);
            mpris.set_title(remote.1.clone());
            state.last_remote = remote;
        }

        app.tick_banner(now);

        // Debounced search lookup.
        if let Some(query) = app.search.poll(now) {
            api.send(ApiCmd::Search(query));
        }

        // Debounced status push (best-effort telemetry).
        if let Some(report) = state.status.poll(now, &app.player) {
            api.send(ApiCmd::PushStatus(report));
        }

        // Near-end safety net, alongside the drained-sink completion event.
        // Suspended while a drag gesture owns the progress bar or a load is
        // still in flight (the mirror would show the replaced track).
        if app.drag.is_none() && state.pending_load.is_none() {
            if let Some(fraction) = player::progress_fraction(&app.player) {
                if fraction > player::NEAR_END_FRACTION && !state.autoskip_armed {
                    state.autoskip_armed = true;
                    state.autoskip.schedule_from(now);
                }
            }
        }
        if state.autoskip.fire(now) && state.pending_load.is_none() {
            skip_to_next(app, player, state, now);
        }

        while let Ok(event) = player_events.try_recv() {
            match event {
                PlayerEvent::TrackEnded => {
                    // The ended signal of a track that was already replaced
                    // (the safety net won the race) must not also skip the
                    // replacement.
                    if state.pending_load.is_none() {
                        skip_to_next(app, player, state, now);
                    }
                }
                PlayerEvent::LoadFailed { name, message } => {
                    log::warn!("failed to load {name:?}: {message}");
                    app.show_error(format!("play {name}: {message}"), now);
                    state.pending_load = None;
                    // Move on; the queue drains to idle if everything fails.
                    skip_to_next(app, player, state, now);
                }
            }
        }

        while let Ok(event) = api_events.try_recv() {
            handle_api_event(event, app, player, state, now);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, player, state, now) {
                shutdown(api, player);
                return Ok(());
            }
        }

        terminal.draw(|frame| {
            state.hit = ui::draw(frame, app, &settings.ui, &settings.controls);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, player, api, control_tx, state) {
                        shutdown(api, player);
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, app, player, api, state, Instant::now());
                }
                _ => {}
            }
        }
    }
}

fn shutdown(api: &Api, player: &Player) {
    player.quit();
    api.send(ApiCmd::Quit);
}

/// Pop the queue head and start it; an exhausted queue sends the player to
/// idle. Also the landing point for both end-of-track signals.
fn skip_to_next(app: &mut App, player: &Player, state: &mut EventLoopState, now: Instant) {
    state.autoskip.cancel();
    state.autoskip_armed = false;

    match app.queue.advance() {
        Some(name) => {
            state.pending_load = Some(name.clone());
            player.send(PlayerCmd::Load {
                name,
                autoplay: true,
                start_at: Duration::ZERO,
            });
        }
        None => {
            // Nothing to play: idle, position cleared, title reset on the
            // next iteration's mirror pass.
            state.pending_load = None;
            player.send(PlayerCmd::Stop);
        }
    }
    app.clamp_queue_cursor();
    state.status.mark_changed(now);
}

/// Start the head when nothing is playing or loading, nothing is waiting on
/// the resume pull, and there is something to start.
fn maybe_start_playback(app: &mut App, player: &Player, state: &mut EventLoopState, now: Instant) {
    if state.resume_pending {
        return;
    }
    if app.player.name.is_some() || state.pending_load.is_some() {
        return;
    }
    if app.queue.is_empty() {
        return;
    }
    skip_to_next(app, player, state, now);
}

fn handle_api_event(
    event: ApiEvent,
    app: &mut App,
    player: &Player,
    state: &mut EventLoopState,
    now: Instant,
) {
    match event {
        ApiEvent::SearchDone { query, names } => {
            // Replies for superseded queries are dropped; the newer request
            // is already in flight.
            if query == app.search.current_query() {
                app.search.apply_results(names);
            }
        }
        ApiEvent::AddDone { name } => {
            app.search.clear_input();
            app.queue.enqueue(name);
            maybe_start_playback(app, player, state, now);
        }
        ApiEvent::QueueLoaded { names } => {
            // Seed only a pristine local queue; anything the user did in the
            // meantime wins over the startup pull.
            if app.queue.is_empty() {
                app.queue = Queue::from_names(names);
            }
            maybe_start_playback(app, player, state, now);
        }
        ApiEvent::LastStatusLoaded { name, position } => {
            state.resume_pending = false;
            match name {
                Some(name) if app.player.name.is_none() && state.pending_load.is_none() => {
                    // Resume paused at the reported position, without the
                    // push a fresh play would schedule (no echo).
                    state.pending_load = Some(name.clone());
                    player.send(PlayerCmd::Load {
                        name,
                        autoplay: false,
                        start_at: Duration::from_secs_f64(position),
                    });
                }
                _ => maybe_start_playback(app, player, state, now),
            }
        }
        ApiEvent::Failed { action, message } => {
            app.show_error(format!("{action}: {message}"), now);
        }
    }
}

/// Returns `true` when shutdown is requested.
fn handle_control_cmd(
    cmd: ControlCmd,
    app: &mut App,
    player: &Player,
    state: &mut EventLoopState,
    now: Instant,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::PlayPause => toggle_play_pause(app, player, state, now),
        ControlCmd::Play => {
            if app.player.state() == PlaybackState::Paused {
                toggle_play_pause(app, player, state, now);
            }
        }
        ControlCmd::Pause => {
            if app.player.state() == PlaybackState::Playing {
                toggle_play_pause(app, player, state, now);
            }
        }
        ControlCmd::Stop => {
            if app.player.name.is_some() {
                player.send(PlayerCmd::Stop);
                state.pending_load = None;
                state.status.mark_changed(now);
            }
        }
        ControlCmd::Next => skip_to_next(app, player, state, now),
    }
    false
}

/// Flip pause/resume; a no-op while nothing is loaded.
fn toggle_play_pause(app: &mut App, player: &Player, state: &mut EventLoopState, now: Instant) {
    if app.player.name.is_none() {
        return;
    }
    player.send(PlayerCmd::TogglePause);
    // Optimistic mirror so the UI flips without waiting a frame.
    app.player.playing = !app.player.playing;
    state.status.mark_changed(now);
}

/// Commit a normalized seek; every input path (keyboard step, bar click,
/// drag release) funnels through here.
fn commit_seek(app: &mut App, player: &Player, state: &mut EventLoopState, fraction: f64, now: Instant) {
    if app.player.name.is_none() || app.player.duration.is_none() {
        return;
    }
    player.send(PlayerCmd::SeekTo(fraction));
    state.autoskip.cancel();
    state.autoskip_armed = false;
    state.status.mark_changed(now);
}

/// Keyboard seek: step the current position and commit it as a fraction.
fn seek_by(app: &mut App, player: &Player, state: &mut EventLoopState, delta_secs: i64, now: Instant) {
    let Some(total) = app.player.duration else {
        return;
    };
    if app.player.name.is_none() || total.is_zero() {
        return;
    }
    let target = (app.player.elapsed.as_secs_f64() + delta_secs as f64).max(0.0);
    let fraction = (target / total.as_secs_f64()).clamp(0.0, 1.0);
    commit_seek(app, player, state, fraction, now);
}

/// Dispatch the add action for whatever sits in the search input: a direct
/// media URL goes out as-is, anything else as a library song name.
fn submit_add(api: &Api, text: &str) {
    if search::is_media_url(text) {
        let (url, rename) = search::split_rename(text);
        api.send(ApiCmd::AddUrl { url, rename });
    } else {
        api.send(ApiCmd::AddSong(text.to_string()));
    }
}

/// Returns `true` when shutdown is requested.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    api: &Api,
    control_tx: &Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    let now = Instant::now();

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.pane {
        Pane::Search => handle_search_key(key, app, api, now),
        Pane::Queue => handle_queue_key(key, settings, app, player, control_tx, state, now),
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App, api: &Api, now: Instant) -> bool {
    match key.code {
        KeyCode::Tab => {
            app.search.hide_dropdown();
            app.toggle_pane();
        }
        KeyCode::Esc => {
            if app.search.dropdown_shown() {
                app.search.hide_dropdown();
            } else {
                app.toggle_pane();
            }
        }
        KeyCode::Down => app.search.cursor_down(),
        KeyCode::Up => app.search.cursor_up(),
        KeyCode::Enter => {
            match app.search.activate() {
                // A confirmed result is copied into the input and added.
                Some(name) => submit_add(api, &name),
                None => {
                    // With the dropdown open, Enter without a highlight is a
                    // no-op. Without it, Enter adds whatever was typed
                    // (direct URLs included); an empty input does nothing.
                    if !app.search.dropdown_shown() {
                        let text = app.search.input().trim().to_string();
                        if !text.is_empty() {
                            submit_add(api, &text);
                        }
                    }
                }
            }
        }
        KeyCode::Backspace => app.search.pop_char(now),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) && !c.is_control() => {
            app.search.push_char(c, now);
        }
        _ => {}
    }
    false
}

fn handle_queue_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &Player,
    control_tx: &Sender<ControlCmd>,
    state: &mut EventLoopState,
    now: Instant,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab | KeyCode::Char('/') => app.toggle_pane(),

        // Reorder: the cursor follows the moved row so it can keep moving.
        KeyCode::Down | KeyCode::Char('j') if ctrl => {
            let from = app.queue_cursor;
            if from + 1 < app.queue.len() {
                app.queue.reorder(from, from + 1);
                app.queue_cursor = from + 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') if ctrl => {
            let from = app.queue_cursor;
            if from > 0 && from < app.queue.len() {
                app.queue.reorder(from, from - 1);
                app.queue_cursor = from - 1;
            }
        }

        KeyCode::Down | KeyCode::Char('j') => app.queue_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.queue_cursor_up(),
        KeyCode::Char('g') | KeyCode::Home => {
            if !app.queue.is_empty() {
                app.queue_cursor = 0;
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if !app.queue.is_empty() {
                app.queue_cursor = app.queue.len() - 1;
            }
        }

        KeyCode::Char('x') | KeyCode::Delete => {
            app.queue.remove_at(app.queue_cursor);
            app.clamp_queue_cursor();
        }

        // Play the selected track now; the previous head waits at slot 1.
        KeyCode::Enter => {
            if app.queue.get(app.queue_cursor).is_some() {
                app.queue.move_to_front(app.queue_cursor);
                skip_to_next(app, player, state, now);
            }
        }

        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('n') | KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }

        KeyCode::Char('L') | KeyCode::Right => {
            seek_by(app, player, state, settings.controls.seek_step_secs as i64, now);
        }
        KeyCode::Char('H') | KeyCode::Left => {
            seek_by(app, player, state, -(settings.controls.seek_step_secs as i64), now);
        }

        _ => {}
    }
    false
}

/// Fraction of the progress bar a click column corresponds to.
fn bar_fraction(column: u16, bar: ratatui::layout::Rect) -> f64 {
    let span = f64::from(bar.width.saturating_sub(1).max(1));
    (f64::from(column.saturating_sub(bar.x)) / span).clamp(0.0, 1.0)
}

fn handle_mouse_event(
    mouse: MouseEvent,
    app: &mut App,
    player: &Player,
    api: &Api,
    state: &mut EventLoopState,
    now: Instant,
) {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Result rows take precedence: the dropdown overlays the lists.
            if let Some(results) = state.hit.results {
                if app.search.dropdown_shown() && in_rect(column, row, results) {
                    let index = state.hit.results_offset + (row - results.y) as usize;
                    if let Some(name) = app.search.select(index) {
                        submit_add(api, &name);
                    }
                    return;
                }
            }

            if in_rect(column, row, state.hit.progress) {
                // Seeking needs a known duration, same as the commit path.
                if player::progress_fraction(&app.player).is_some() {
                    app.drag = Some(Drag::Seek {
                        fraction: bar_fraction(column, state.hit.progress),
                    });
                }
                return;
            }

            if in_rect(column, row, state.hit.queue_rows) {
                let index = state.hit.queue_offset + (row - state.hit.queue_rows.y) as usize;
                if index < app.queue.len() {
                    app.pane = Pane::Queue;
                    app.queue_cursor = index;
                    app.drag = Some(Drag::QueueRow { from: index });
                }
            }
        }

        MouseEventKind::Drag(MouseButton::Left) => match app.drag {
            Some(Drag::Seek { .. }) => {
                // Preview only; tick-driven updates stay suspended until the
                // release commits.
                app.drag = Some(Drag::Seek {
                    fraction: bar_fraction(column, state.hit.progress),
                });
            }
            Some(Drag::QueueRow { from }) => {
                if in_rect(column, row, state.hit.queue_rows) {
                    let to = state.hit.queue_offset + (row - state.hit.queue_rows.y) as usize;
                    // The grabbed row steps to the hovered slot; successive
                    // steps compose to the same order as one direct reorder.
                    if to != from && to < app.queue.len() {
                        app.queue.reorder(from, to);
                        app.queue_cursor = to;
                        app.drag = Some(Drag::QueueRow { from: to });
                    }
                }
            }
            None => {}
        },

        MouseEventKind::Up(MouseButton::Left) => match app.drag.take() {
            Some(Drag::Seek { fraction }) => {
                commit_seek(app, player, state, fraction, now);
            }
            Some(Drag::QueueRow { .. }) | None => {}
        },

        _ => {}
    }
}
