//! Session-state model: `App` and its small helper types.
//!
//! One struct owns the queue, the search box, the cursors and the transient
//! banner; every mutation goes through a method here or on the owned parts,
//! and the event loop is the only caller.

use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::player::{PlayerHandle, PlayerInfo};
use crate::queue::Queue;
use crate::search::SearchBox;

/// How long a transient error banner stays on screen.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// Which pane owns keyboard input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Search,
    Queue,
}

/// A pointer drag in progress. While one is active, tick-driven progress
/// updates stay out of the way.
#[derive(Clone, Debug, PartialEq)]
pub enum Drag {
    /// Scrubbing the progress bar; `fraction` is the live preview.
    Seek { fraction: f64 },
    /// Dragging a queue row; `from` is where the grabbed row currently sits.
    QueueRow { from: usize },
}

/// The main session state.
pub struct App {
    pub queue: Queue,
    pub search: SearchBox,
    pub pane: Pane,
    pub queue_cursor: usize,
    /// Per-frame snapshot of the player thread's shared info.
    pub player: PlayerInfo,
    pub player_handle: Option<PlayerHandle>,
    pub drag: Option<Drag>,
    banner: Option<(String, Instant)>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            queue: Queue::new(),
            search: SearchBox::new(Duration::from_millis(settings.search.debounce_ms)),
            pane: Pane::Search,
            queue_cursor: 0,
            player: PlayerInfo::default(),
            player_handle: None,
            drag: None,
            banner: None,
        }
    }

    /// Attach the shared handle used to observe playback progress.
    pub fn set_player_handle(&mut self, handle: PlayerHandle) {
        self.player_handle = Some(handle);
    }

    /// Snapshot the player thread's shared info for this frame.
    pub fn sync_player(&mut self) {
        if let Some(handle) = self.player_handle.as_ref() {
            if let Ok(info) = handle.lock() {
                self.player = info.clone();
            }
        }
    }

    /// Show a transient error banner (auto-dismissed after `BANNER_TTL`).
    pub fn show_error(&mut self, message: String, now: Instant) {
        self.banner = Some((message, now));
    }

    /// Drop the banner once its display window has passed.
    pub fn tick_banner(&mut self, now: Instant) {
        if let Some((_, since)) = self.banner.as_ref() {
            if now.duration_since(*since) >= BANNER_TTL {
                self.banner = None;
            }
        }
    }

    pub fn banner_message(&self) -> Option<&str> {
        self.banner.as_ref().map(|(message, _)| message.as_str())
    }

    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Search => Pane::Queue,
            Pane::Queue => Pane::Search,
        };
    }

    /// Move the queue cursor down, wrapping at the end.
    pub fn queue_cursor_down(&mut self) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }
        self.queue_cursor = (self.queue_cursor + 1) % len;
    }

    /// Move the queue cursor up, wrapping at the top.
    pub fn queue_cursor_up(&mut self) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }
        self.queue_cursor = (self.queue_cursor + len - 1) % len;
    }

    /// Keep the cursor on a valid row after a queue mutation. A removed
    /// row's screen position passes the cursor to whatever occupies it now;
    /// past the end it clamps to the last row.
    pub fn clamp_queue_cursor(&mut self) {
        if self.queue.is_empty() {
            self.queue_cursor = 0;
        } else if self.queue_cursor >= self.queue.len() {
            self.queue_cursor = self.queue.len() - 1;
        }
    }
}
