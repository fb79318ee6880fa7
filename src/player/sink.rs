//! Sink construction from fetched audio bytes.
//!
//! The helper decodes an in-memory byte buffer and prepares a paused `Sink`
//! at the requested start position. Seeking re-runs it against the same
//! buffer at a new offset.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

/// Decode `bytes` and prepare a paused sink starting at `start_at`. Also
/// returns the container-reported total duration when available.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    bytes: Arc<[u8]>,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), DecoderError> {
    let source = Decoder::new(Cursor::new(bytes))?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(handle.mixer());
    // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    Ok((sink, duration))
}
