//! Heartfall Player - desktop host for the heart overlay
//!
//! A plain window plays the part of the page: it toggles the overlay,
//! forwards pointer input and reports viewport changes.

mod player_app;

pub use player_app::{apply_config, load_config, PlayerApp};
