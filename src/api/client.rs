//! Blocking HTTP client for the backend.
//!
//! Lives on worker threads only; the event loop never calls into it
//! directly.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use super::models::{AddPayload, AddResponse, LastStatus, SongEntry, StatusReport};

/// Extension the backend stores audio files under; appended to plain song
/// names when posting an add.
pub(crate) const SONG_EXTENSION: &str = ".wav";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection, timeout, non-2xx status).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with an `{error}` payload.
    #[error("{0}")]
    Backend(String),
    /// The reply body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("encore/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        join_endpoint(&self.base_url, path)
    }

    /// `GET /api/songs?q=<text>`: names matching the query.
    pub fn search(&self, query: &str) -> Result<Vec<SongEntry>, ApiError> {
        let reply = self
            .http
            .get(self.endpoint("/api/songs"))
            .query(&[("q", query)])
            .send()?
            .error_for_status()?;
        decode(reply)
    }

    /// `GET /api/queue`: the backend's queue, in order.
    pub fn queue(&self) -> Result<Vec<SongEntry>, ApiError> {
        let reply = self
            .http
            .get(self.endpoint("/api/queue"))
            .send()?
            .error_for_status()?;
        decode(reply)
    }

    /// `POST /api/queue` with a library song name.
    pub fn add_song(&self, name: &str) -> Result<String, ApiError> {
        self.add(&AddPayload::Song {
            song: song_filename(name),
        })
    }

    /// `POST /api/queue` with a direct media URL (optionally renamed).
    pub fn add_url(&self, url: &str, rename: Option<&str>) -> Result<String, ApiError> {
        self.add(&AddPayload::Url {
            url: url.to_string(),
            rename: rename.map(str::to_string),
        })
    }

    fn add(&self, payload: &AddPayload) -> Result<String, ApiError> {
        // The backend reports application errors in the body, with or
        // without a 2xx status; decode the body either way.
        let reply = self.http.post(self.endpoint("/api/queue")).json(payload).send()?;
        let body: AddResponse = decode(reply)?;
        if let Some(error) = body.error {
            return Err(ApiError::Backend(error));
        }
        body.name
            .ok_or_else(|| ApiError::Decode("add reply missing `name`".to_string()))
    }

    /// `POST /api/player/status`: fire-and-forget playback telemetry.
    pub fn push_status(&self, report: &StatusReport) -> Result<(), ApiError> {
        self.http
            .post(self.endpoint("/api/player/status"))
            .json(report)
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// `GET /api/player/status`: the last state anyone reported.
    pub fn last_status(&self) -> Result<LastStatus, ApiError> {
        let reply = self
            .http
            .get(self.endpoint("/api/player/status"))
            .send()?
            .error_for_status()?;
        decode(reply)
    }

    /// `GET /api/play?song=<name>`: the audio bytes for a track.
    pub fn fetch_song(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        let reply = self
            .http
            .get(self.endpoint("/api/play"))
            .query(&[("song", name)])
            .send()?
            .error_for_status()?;
        Ok(reply.bytes()?.to_vec())
    }
}

fn decode<T: serde::de::DeserializeOwned>(reply: reqwest::blocking::Response) -> Result<T, ApiError> {
    reply.json().map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn join_endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub(crate) fn song_filename(name: &str) -> String {
    if name.ends_with(SONG_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SONG_EXTENSION}")
    }
}
