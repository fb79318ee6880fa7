//! Search input state machine.
//!
//! Keystrokes edit the input; the trimmed text is compared against the last
//! processed query so repeated events with the same text are no-ops. A
//! direct-media-URL input is a pending add, never a lookup. Everything else
//! arms the debounce slot; when it fires the query goes out, and the reply
//! replaces the result set wholesale.

use std::time::{Duration, Instant};

use crate::debounce::Debouncer;

pub struct SearchBox {
    input: String,
    last_query: String,
    debounce: Debouncer,
    /// Query armed behind the debounce; overwritten by each newer keystroke.
    pending: Option<String>,
    results: Vec<String>,
    cursor: Option<usize>,
    shown: bool,
}

impl SearchBox {
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            input: String::new(),
            last_query: String::new(),
            debounce: Debouncer::new(debounce_delay),
            pending: None,
            results: Vec::new(),
            cursor: None,
            shown: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether the result dropdown is on screen.
    pub fn dropdown_shown(&self) -> bool {
        self.shown
    }

    /// A completed lookup came back empty; shown as a placeholder row,
    /// distinct from the no-dropdown state.
    pub fn no_results(&self) -> bool {
        self.shown && self.results.is_empty()
    }

    /// The last processed query, used to drop superseded lookup replies.
    pub fn current_query(&self) -> &str {
        &self.last_query
    }

    /// Whether a lookup is waiting out its debounce window.
    pub fn lookup_pending(&self) -> bool {
        self.debounce.pending()
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.input.push(c);
        self.input_changed(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        self.input.pop();
        self.input_changed(now);
    }

    fn input_changed(&mut self, now: Instant) {
        let query = self.input.trim().to_string();
        if query == self.last_query {
            return;
        }

        self.debounce.cancel();
        self.pending = None;
        self.last_query = query.clone();
        self.cursor = None;

        if is_media_url(&query) {
            // Pending direct add; the lookup endpoint is never asked.
            return;
        }

        self.pending = Some(query);
        self.debounce.schedule_from(now);
    }

    /// Debounce tick: the query to look up once the window has elapsed. A
    /// fired empty query clears the dropdown instead of searching.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if !self.debounce.fire(now) {
            return None;
        }
        let query = self.pending.take()?;
        if query.is_empty() {
            self.results.clear();
            self.shown = false;
            return None;
        }
        Some(query)
    }

    /// Replace the result set wholesale with a completed lookup's reply.
    pub fn apply_results(&mut self, names: Vec<String>) {
        self.results = names;
        self.cursor = None;
        self.shown = true;
    }

    pub fn cursor_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.cursor = Some(match self.cursor {
            None => 0,
            Some(i) => (i + 1) % self.results.len(),
        });
    }

    pub fn cursor_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len();
        self.cursor = Some(match self.cursor {
            None => len - 1,
            Some(i) => (i + len - 1) % len,
        });
    }

    /// Confirm the highlighted result: its name is copied into the input and
    /// the dropdown closes. `None` when nothing is highlighted.
    pub fn activate(&mut self) -> Option<String> {
        let index = self.cursor?;
        let name = self.results.get(index)?.clone();
        self.input = name.clone();
        // Selecting is not a new query; do not re-trigger a lookup.
        self.last_query = name.clone();
        self.debounce.cancel();
        self.pending = None;
        self.shown = false;
        self.cursor = None;
        Some(name)
    }

    /// Pointer selection of result row `index`.
    pub fn select(&mut self, index: usize) -> Option<String> {
        if index >= self.results.len() {
            return None;
        }
        self.cursor = Some(index);
        self.activate()
    }

    pub fn hide_dropdown(&mut self) {
        self.shown = false;
        self.cursor = None;
    }

    /// Reset after a successful add.
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.last_query.clear();
        self.pending = None;
        self.debounce.cancel();
        self.results.clear();
        self.cursor = None;
        self.shown = false;
    }
}

/// Direct-media-URL classification: these inputs are added as-is and never
/// sent to the lookup endpoint.
pub fn is_media_url(input: &str) -> bool {
    input.contains("youtube.com") || input.contains("youtu.be")
}

/// Split an `<url> as <name>` direct add into the url and optional rename.
pub fn split_rename(input: &str) -> (String, Option<String>) {
    if let Some((url, rename)) = input.split_once(" as ") {
        if is_media_url(url.trim()) && !rename.trim().is_empty() {
            return (url.trim().to_string(), Some(rename.trim().to_string()));
        }
    }
    (input.trim().to_string(), None)
}
