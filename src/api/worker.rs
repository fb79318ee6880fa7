//! The API worker thread: requests in, completions out.
//!
//! User-initiated failures (search, add) come back as `Failed` events for
//! the error banner. Startup pulls and status pushes are best-effort: their
//! failures are logged and never surfaced.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::client::ApiClient;
use super::models::StatusReport;

/// Requests the event loop hands to the worker.
#[derive(Debug)]
pub enum ApiCmd {
    Search(String),
    AddSong(String),
    AddUrl { url: String, rename: Option<String> },
    LoadQueue,
    LoadLastStatus,
    PushStatus(StatusReport),
    Quit,
}

/// Completions the worker reports back.
#[derive(Debug)]
pub enum ApiEvent {
    SearchDone { query: String, names: Vec<String> },
    AddDone { name: String },
    QueueLoaded { names: Vec<String> },
    LastStatusLoaded { name: Option<String>, position: f64 },
    /// A user-initiated request failed; `action` labels it for the banner.
    Failed { action: &'static str, message: String },
}

pub(super) fn spawn_api_worker(
    client: ApiClient,
    rx: Receiver<ApiCmd>,
    tx: Sender<ApiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = rx.recv() {
            match cmd {
                ApiCmd::Search(query) => match client.search(&query) {
                    Ok(entries) => {
                        debug!("search {query:?}: {} results", entries.len());
                        let _ = tx.send(ApiEvent::SearchDone {
                            query,
                            names: entries.into_iter().map(|e| e.name).collect(),
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(ApiEvent::Failed {
                            action: "search",
                            message: e.to_string(),
                        });
                    }
                },
                ApiCmd::AddSong(name) => match client.add_song(&name) {
                    Ok(name) => {
                        let _ = tx.send(ApiEvent::AddDone { name });
                    }
                    Err(e) => {
                        let _ = tx.send(ApiEvent::Failed {
                            action: "add",
                            message: e.to_string(),
                        });
                    }
                },
                ApiCmd::AddUrl { url, rename } => match client.add_url(&url, rename.as_deref()) {
                    Ok(name) => {
                        let _ = tx.send(ApiEvent::AddDone { name });
                    }
                    Err(e) => {
                        let _ = tx.send(ApiEvent::Failed {
                            action: "add",
                            message: e.to_string(),
                        });
                    }
                },
                ApiCmd::LoadQueue => {
                    let names = match client.queue() {
                        Ok(entries) => entries.into_iter().map(|e| e.name).collect(),
                        Err(e) => {
                            warn!("queue pull failed: {e}");
                            Vec::new()
                        }
                    };
                    let _ = tx.send(ApiEvent::QueueLoaded { names });
                }
                ApiCmd::LoadLastStatus => {
                    let last = match client.last_status() {
                        Ok(last) => last,
                        Err(e) => {
                            warn!("status pull failed: {e}");
                            Default::default()
                        }
                    };
                    let _ = tx.send(ApiEvent::LastStatusLoaded {
                        name: last.name,
                        position: last.time.unwrap_or(0.0).max(0.0),
                    });
                }
                ApiCmd::PushStatus(report) => {
                    // Telemetry, not durability: log and move on, no retry.
                    if let Err(e) = client.push_status(&report) {
                        warn!("status push failed: {e}");
                    }
                }
                ApiCmd::Quit => break,
            }
        }
    })
}
