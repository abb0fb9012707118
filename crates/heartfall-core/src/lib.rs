//! Heartfall Core - Foundational types for the heart overlay
//!
//! This crate provides the types that all other Heartfall crates depend on:
//! - `Color`, `Viewport`, `BodySnapshot` - shared value types
//! - `OverlayConfig` - TOML-backed tuning for bodies, world, drag and runtime
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{BodiesConfig, DragConfig, OverlayConfig, RuntimeConfig, WorldConfig};
pub use error::{HeartfallError, Result};
pub use types::{BodySnapshot, Color, Viewport};
