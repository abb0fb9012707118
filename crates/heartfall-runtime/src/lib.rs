//! Heartfall Runtime - Loop infrastructure
//!
//! Provides the building blocks the overlay's two loops share:
//! - `GameClock`: fixed-timestep accumulator for the physics scheduler
//! - `PointerState`: mouse/touch tracking scoped to the drawing surface
//! - `OverlayEvent` / `EventBus`: typed event queue drained by the host

mod clock;
mod event;
mod event_bus;
mod pointer;

pub use clock::GameClock;
pub use event::OverlayEvent;
pub use event_bus::EventBus;
pub use pointer::{PointerEvent, PointerState, PRIMARY_BUTTON};
