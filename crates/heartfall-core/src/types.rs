//! Shared value types

use crate::error::{HeartfallError, Result};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color, straight (non-premultiplied) alpha
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse a CSS-style `#RRGGBB` or `#RRGGBBAA` string
    pub fn parse_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || HeartfallError::InvalidColor(s.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

        match digits.len() {
            6 => Ok(Self::from_hex(value)),
            8 => {
                let mut color = Self::from_hex(value >> 8);
                color.a = (value & 0xFF) as f32 / 255.0;
                Ok(color)
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// 8-bit premultiplied RGBA, the layout the pixel canvas stores
    pub fn to_premultiplied_rgba8(&self) -> [u8; 4] {
        let a = self.a.clamp(0.0, 1.0);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * a * 255.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            (a * 255.0).round() as u8,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// The visible area the overlay covers, in logical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Physical pixels per logical pixel (window scale factor)
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        self
    }

    /// Build from a physical window size and its scale factor
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let ratio = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            width: (width as f64 / ratio) as f32,
            height: (height as f64 / ratio) as f32,
            pixel_ratio: ratio as f32,
        }
    }

    /// Size of the backing drawing surface in physical pixels (never zero)
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio).ceil().max(1.0) as u32;
        let h = (self.height * self.pixel_ratio).ceil().max(1.0) as u32;
        (w, h)
    }
}

/// Read-only view of one body, handed from the simulation to the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    pub radius: f32,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0xF43F5E);
        assert!((c.r - 0.957).abs() < 0.01);
        assert!((c.g - 0.247).abs() < 0.01);
        assert!((c.b - 0.369).abs() < 0.01);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#ec4899").unwrap(), Color::from_hex(0xEC4899));
        assert_eq!(Color::parse_hex("E11D48").unwrap(), Color::from_hex(0xE11D48));

        let translucent = Color::parse_hex("#FFFFFF80").unwrap();
        assert!((translucent.a - 0.502).abs() < 0.01);

        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#GG0000").is_err());
        assert!(Color::parse_hex("").is_err());
    }

    #[test]
    fn test_premultiplied_bytes() {
        assert_eq!(Color::from_hex(0xFF8000).to_premultiplied_rgba8(), [255, 128, 0, 255]);
        assert_eq!(Color::TRANSPARENT.to_premultiplied_rgba8(), [0, 0, 0, 0]);

        let half_white = Color::new(1.0, 1.0, 1.0, 0.5);
        assert_eq!(half_white.to_premultiplied_rgba8(), [128, 128, 128, 128]);
    }

    #[test]
    fn test_viewport_physical_size() {
        let vp = Viewport::new(800.0, 600.0).with_pixel_ratio(2.0);
        assert_eq!(vp.physical_size(), (1600, 1200));

        let vp = Viewport::from_physical(1500, 900, 1.5);
        assert!((vp.width - 1000.0).abs() < 1e-3);
        assert!((vp.height - 600.0).abs() < 1e-3);
        assert_eq!(vp.physical_size(), (1500, 900));

        assert_eq!(Viewport::new(0.0, 0.0).physical_size(), (1, 1));
    }
}
