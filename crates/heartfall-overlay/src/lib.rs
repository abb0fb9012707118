//! Heartfall Overlay - lifecycle controller
//!
//! `Lifecycle` reacts to the host's show flag. A rising edge builds an
//! `OverlaySession` (world, physics scheduler, render loop, canvas); a falling
//! edge consumes it. The host forwards viewport changes, pointer input and the
//! two loop ticks, and drains `OverlayEvent`s.

mod lifecycle;
mod runner;

pub use lifecycle::{Lifecycle, OverlaySession};
pub use runner::PhysicsRunner;
