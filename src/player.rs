//! Player controller: one background thread owning the audio output.
//!
//! At most one sink is ever alive; loading a track fully stops and releases
//! the previous one first. The thread publishes progress through a shared
//! handle and reports completions back over a channel.

mod sink;
mod thread;
mod types;

pub use types::{
    NEAR_END_FRACTION, PlaybackState, PlayerCmd, PlayerEvent, PlayerHandle, PlayerInfo,
    clamp_fraction, progress_fraction,
};

#[cfg(test)]
mod tests;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::api::ApiClient;

pub struct Player {
    tx: Sender<PlayerCmd>,
    info: PlayerHandle,
}

impl Player {
    /// Spawn the player thread; `client` fetches the audio bytes.
    pub fn new(client: ApiClient) -> (Self, Receiver<PlayerEvent>) {
        let (tx, rx) = mpsc::channel::<PlayerCmd>();
        let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
        let info: PlayerHandle = Arc::new(Mutex::new(PlayerInfo::default()));

        let _player = self::thread::spawn_player_thread(client, rx, info.clone(), event_tx);

        (Self { tx, info }, event_rx)
    }

    /// Shared handle the UI reads progress from.
    pub fn handle(&self) -> PlayerHandle {
        self.info.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) {
        let _ = self.tx.send(cmd);
    }

    pub fn quit(&self) {
        let _ = self.tx.send(PlayerCmd::Quit);
    }
}
