use crate::api::{Api, ApiCmd};

/// Ask the backend for the seed state: the shared queue, and the last
/// reported player status so the session resumes paused at that position.
/// Both pulls are best-effort; the replies land in the event loop.
pub fn request_initial_state(api: &Api) {
    api.send(ApiCmd::LoadQueue);
    api.send(ApiCmd::LoadLastStatus);
}
