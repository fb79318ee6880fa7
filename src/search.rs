//! Search module: the debounced song-lookup input and its result list.

mod model;

pub use model::*;
