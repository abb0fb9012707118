//! Heart silhouette drawn in place of each body's circle

use crate::canvas::DrawContext;
use heartfall_core::BodySnapshot;

/// Heart size relative to the collision radius
pub const HEART_SCALE: f32 = 1.1;

/// Paint one heart centred on the body and turned by its angle.
///
/// Leaves the context transform exactly as it found it.
pub fn draw_heart<C: DrawContext + ?Sized>(ctx: &mut C, body: &BodySnapshot) {
    let r = body.radius * HEART_SCALE;

    ctx.save();
    ctx.translate(body.position.x, body.position.y);
    ctx.rotate(body.angle);

    // Two mirrored cubics from the top notch down to the tip and back
    ctx.begin_path();
    ctx.move_to(0.0, -0.35 * r);
    ctx.bezier_curve_to(-r, -0.9 * r, -1.2 * r, 0.4 * r, 0.0, 1.3 * r);
    ctx.bezier_curve_to(1.2 * r, 0.4 * r, r, -0.9 * r, 0.0, -0.35 * r);
    ctx.close_path();

    ctx.set_fill_style(body.color);
    ctx.fill();
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use glam::Vec2;
    use heartfall_core::{Color, Viewport};

    fn heart_at(x: f32, y: f32, angle: f32) -> BodySnapshot {
        BodySnapshot {
            position: Vec2::new(x, y),
            angle,
            radius: 20.0,
            color: Color::from_hex(0xE11D48),
        }
    }

    #[test]
    fn test_heart_fills_interior() {
        let mut canvas = PixelCanvas::new(Viewport::new(100.0, 100.0)).unwrap();
        let body = heart_at(50.0, 50.0, 0.0);
        draw_heart(&mut canvas, &body);

        let expected = body.color.to_premultiplied_rgba8();
        assert_eq!(canvas.pixel(50, 50), Some(expected));
        assert_eq!(canvas.pixel(50, 65), Some(expected));
        // Both lobes
        assert_eq!(canvas.pixel(38, 45), Some(expected));
        assert_eq!(canvas.pixel(62, 45), Some(expected));
    }

    #[test]
    fn test_notch_and_exterior_transparent() {
        let mut canvas = PixelCanvas::new(Viewport::new(100.0, 100.0)).unwrap();
        draw_heart(&mut canvas, &heart_at(50.0, 50.0, 0.0));

        // Above the notch, between the lobes
        assert_eq!(canvas.pixel(50, 38), Some([0; 4]));
        // Below the tip
        assert_eq!(canvas.pixel(50, 85), Some([0; 4]));
        assert_eq!(canvas.pixel(2, 2), Some([0; 4]));
        assert_eq!(canvas.pixel(97, 50), Some([0; 4]));
    }

    #[test]
    fn test_heart_follows_rotation() {
        let mut canvas = PixelCanvas::new(Viewport::new(100.0, 100.0)).unwrap();
        draw_heart(&mut canvas, &heart_at(50.0, 50.0, std::f32::consts::PI));

        // Upside down: the tip points up and the notch faces down
        assert_eq!(canvas.pixel(50, 62), Some([0; 4]));
        assert_ne!(canvas.pixel(50, 35), Some([0; 4]));
    }

    #[test]
    fn test_transform_restored_after_many_hearts() {
        let mut canvas = PixelCanvas::new(Viewport::new(200.0, 200.0).with_pixel_ratio(2.0)).unwrap();
        let before = canvas.current_transform();

        for i in 0..50 {
            let f = i as f32;
            draw_heart(&mut canvas, &heart_at(f * 3.7, 200.0 - f * 2.1, f * 0.37));
        }

        assert_eq!(canvas.current_transform(), before);
        assert_eq!(canvas.save_depth(), 0);
    }
}
