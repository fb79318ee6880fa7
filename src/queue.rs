//! Queue module: the ordered list of tracks waiting to play.

mod model;

pub use model::*;
