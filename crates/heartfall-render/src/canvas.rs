//! 2D drawing context and the software canvas behind it

use crate::context::RenderError;
use heartfall_core::{Color, Viewport};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Immediate-mode 2D drawing contract, modelled on an HTML canvas context.
///
/// The current path is recorded in local coordinates and mapped through the
/// transform in effect when it is filled.
pub trait DrawContext {
    /// Push the current transform and fill style
    fn save(&mut self);
    /// Pop the last saved state; a no-op on an empty stack
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    /// Rotate clockwise (y-down) by `angle` radians
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, x: f32, y: f32);
    /// Multiply the current transform by `m`
    fn transform(&mut self, m: Transform);
    fn current_transform(&self) -> Transform;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32);
    fn close_path(&mut self);

    fn set_fill_style(&mut self, color: Color);
    /// Fill the current path with the non-zero winding rule
    fn fill(&mut self);
    /// Reset every pixel to fully transparent, ignoring the transform
    fn clear(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct State {
    transform: Transform,
    fill: Color,
}

/// Premultiplied RGBA8 pixmap implementing [`DrawContext`].
///
/// Sized in physical pixels; drawing happens in logical pixels through a base
/// transform of `scale(pixel_ratio)`.
pub struct PixelCanvas {
    pixmap: Pixmap,
    pixel_ratio: f32,
    state: State,
    stack: Vec<State>,
    path: PathBuilder,
}

fn allocate(viewport: Viewport) -> Result<Pixmap, RenderError> {
    let (width, height) = viewport.physical_size();
    Pixmap::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })
}

impl PixelCanvas {
    pub fn new(viewport: Viewport) -> Result<Self, RenderError> {
        Ok(Self {
            pixmap: allocate(viewport)?,
            pixel_ratio: viewport.pixel_ratio,
            state: Self::base_state(viewport.pixel_ratio),
            stack: Vec::new(),
            path: PathBuilder::new(),
        })
    }

    fn base_state(pixel_ratio: f32) -> State {
        State {
            transform: Transform::from_scale(pixel_ratio, pixel_ratio),
            fill: Color::BLACK,
        }
    }

    /// Reallocate for a new viewport. Contents and drawing state are reset,
    /// as when a browser canvas element changes size. On failure the old
    /// pixmap is kept.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), RenderError> {
        self.pixmap = allocate(viewport)?;
        self.pixel_ratio = viewport.pixel_ratio;
        self.state = Self::base_state(viewport.pixel_ratio);
        self.stack.clear();
        self.path = PathBuilder::new();
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Raw premultiplied RGBA bytes, row-major, `4 × width` bytes per row
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Pixel at physical coordinates, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap
            .pixel(x, y)
            .map(|c| [c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Depth of the save stack
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawContext for PixelCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.transform(Transform::from_translate(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.transform(Transform::from_rotate(angle.to_degrees()));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.transform(Transform::from_scale(x, y));
    }

    fn transform(&mut self, m: Transform) {
        self.state.transform = self.state.transform.pre_concat(m);
    }

    fn current_transform(&self) -> Transform {
        self.state.transform
    }

    fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.path.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn set_fill_style(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn fill(&mut self) {
        // Empty or degenerate paths produce nothing to fill
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let fill = self.state.fill;
        let Some(color) = tiny_skia::Color::from_rgba(
            fill.r.clamp(0.0, 1.0),
            fill.g.clamp(0.0, 1.0),
            fill.b.clamp(0.0, 1.0),
            fill.a.clamp(0.0, 1.0),
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, self.state.transform, None);
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }
}
