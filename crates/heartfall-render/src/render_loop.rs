//! Per-frame paint pass over the body snapshots

use crate::canvas::DrawContext;
use crate::heart::draw_heart;
use heartfall_core::BodySnapshot;

/// Paints one frame per display refresh while running.
///
/// Each frame first runs the default pass, which clears the surface to fully
/// transparent since circle primitives are never shown, then draws a heart
/// per body in snapshot order.
#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames painted since creation
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Paint `bodies` into `ctx`. Returns the number of hearts drawn; a
    /// stopped loop leaves the context untouched.
    pub fn frame<C: DrawContext + ?Sized>(&mut self, ctx: &mut C, bodies: &[BodySnapshot]) -> usize {
        if !self.running {
            return 0;
        }

        ctx.clear();
        for body in bodies {
            draw_heart(ctx, body);
        }

        self.frames += 1;
        bodies.len()
    }
}
