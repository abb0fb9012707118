//! Heartfall Render - paints the overlay
//!
//! Drawing is split in two halves:
//! - a CPU side (`DrawContext`, `PixelCanvas`, `draw_heart`, `RenderLoop`)
//!   that turns body snapshots into a premultiplied RGBA raster, testable
//!   without a GPU;
//! - a wgpu side (`RenderContext`, `FramePresenter`) that puts the raster on
//!   screen over the host page colour.

mod canvas;
mod context;
mod heart;
mod presenter;
mod render_loop;

pub use canvas::{DrawContext, PixelCanvas};
pub use context::{RenderContext, RenderError};
pub use heart::{draw_heart, HEART_SCALE};
pub use presenter::FramePresenter;
pub use render_loop::RenderLoop;

#[cfg(test)]
mod tests {
    #[test]
    fn overlay_shader_wgsl_parses() {
        let source = include_str!("overlay_shader.wgsl");
        naga::front::wgsl::parse_str(source).expect("overlay_shader.wgsl failed to parse");
    }
}
