//! REST surface of the jukebox backend.
//!
//! `ApiClient` speaks the wire protocol; `Api` owns the worker thread that
//! runs requests off the event loop, reporting completions back over a
//! channel.

mod client;
mod models;
mod worker;

pub use client::{ApiClient, ApiError};
pub use models::{LastStatus, SongEntry, StatusReport};
pub use worker::{ApiCmd, ApiEvent};

#[cfg(test)]
mod tests;

use std::sync::mpsc::{self, Receiver, Sender};

/// Handle to the API worker thread.
pub struct Api {
    tx: Sender<ApiCmd>,
}

impl Api {
    /// Spawn the worker thread owning the HTTP client.
    pub fn spawn(client: ApiClient) -> (Self, Receiver<ApiEvent>) {
        let (tx, rx) = mpsc::channel::<ApiCmd>();
        let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();
        let _worker = worker::spawn_api_worker(client, rx, event_tx);
        (Self { tx }, event_rx)
    }

    pub fn send(&self, cmd: ApiCmd) {
        let _ = self.tx.send(cmd);
    }
}
