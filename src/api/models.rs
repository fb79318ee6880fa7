//! Wire payloads for the backend endpoints.

use serde::{Deserialize, Serialize};

/// A song entry as returned by `/api/songs` and `/api/queue`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SongEntry {
    pub name: String,
}

/// `/api/queue` POST body: a library song by name, or a direct media URL
/// with an optional rename.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AddPayload {
    Song {
        song: String,
    },
    Url {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rename: Option<String>,
    },
}

/// `/api/queue` POST reply: `{name}` on success, `{error}` otherwise.
#[derive(Debug, Deserialize)]
pub struct AddResponse {
    pub name: Option<String>,
    pub error: Option<String>,
}

/// `/api/player/status` POST body. `position` is seconds into the track;
/// `time` is the wall-clock unix timestamp of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub name: String,
    pub position: f64,
    pub playing: bool,
    pub time: u64,
}

/// `/api/player/status` GET reply: the last reported track and the position
/// (seconds) to resume it at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LastStatus {
    pub name: Option<String>,
    pub time: Option<f64>,
}
