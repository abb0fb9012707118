//! Heart bodies and the factory that spawns them above the viewport

use glam::Vec2;
use heartfall_core::{BodiesConfig, Color, OverlayConfig, Result, Viewport};
use rand::seq::SliceRandom;
use rand::Rng;
use rapier2d::prelude::RigidBodyHandle;

/// Index into the world's body table, stable for one activation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// Initial state of one body, before it enters the simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySpec {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// A simulated heart: a circle collider with a fixed radius and color
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub handle: RigidBodyHandle,
    pub radius: f32,
    pub color: Color,
    /// Mass in pixel units (density · area)
    pub mass: f32,
}

impl Body {
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Generates the initial population with bounded randomness
pub struct BodyFactory {
    count: usize,
    radius_min: f32,
    radius_max: f32,
    spawn_y_min: f32,
    spawn_y_max: f32,
    palette: Vec<Color>,
}

impl BodyFactory {
    /// Capture the generation parameters, rejecting ranges that cannot be
    /// sampled
    pub fn from_config(config: &OverlayConfig) -> Result<Self> {
        config.validate()?;
        let BodiesConfig {
            count,
            radius_min,
            radius_max,
            spawn_y_min,
            spawn_y_max,
            ..
        } = config.bodies;

        Ok(Self {
            count,
            radius_min,
            radius_max,
            spawn_y_min,
            spawn_y_max,
            palette: config.palette_colors()?,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Produce `count` bodies spread across the viewport width and staggered
    /// above its top edge so they cascade in
    pub fn generate<R: Rng>(&self, viewport: Viewport, rng: &mut R) -> Vec<BodySpec> {
        let width = viewport.width.max(1.0);
        (0..self.count)
            .map(|_| {
                let radius = rng.gen_range(self.radius_min..self.radius_max);
                let x = rng.gen_range(0.0..width);
                let y = rng.gen_range(self.spawn_y_min..self.spawn_y_max);
                let color = self.palette.choose(rng).copied().unwrap_or(Color::WHITE);
                BodySpec {
                    position: Vec2::new(x, y),
                    radius,
                    color,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_population_in_range() {
        let config = OverlayConfig::default();
        let factory = BodyFactory::from_config(&config).unwrap();
        let palette = config.palette_colors().unwrap();
        let viewport = Viewport::new(800.0, 600.0);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let specs = factory.generate(viewport, &mut rng);

        assert_eq!(specs.len(), 180);
        for spec in &specs {
            assert!(spec.radius >= 20.0 && spec.radius < 40.0);
            assert!(spec.position.y >= -1100.0 && spec.position.y < -100.0);
            assert!(spec.position.x >= 0.0 && spec.position.x < 800.0);
            assert!(palette.contains(&spec.color));
        }
    }

    #[test]
    fn test_every_palette_entry_used() {
        let config = OverlayConfig::default();
        let factory = BodyFactory::from_config(&config).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let specs = factory.generate(Viewport::new(1024.0, 768.0), &mut rng);

        for color in factory.palette() {
            assert!(specs.iter().any(|s| s.color == *color));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let factory = BodyFactory::from_config(&OverlayConfig::default()).unwrap();
        let viewport = Viewport::new(800.0, 600.0);

        let a = factory.generate(viewport, &mut ChaCha8Rng::seed_from_u64(9));
        let b = factory.generate(viewport, &mut ChaCha8Rng::seed_from_u64(9));
        let c = factory.generate(viewport, &mut ChaCha8Rng::seed_from_u64(10));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_configured_count() {
        let mut config = OverlayConfig::default();
        config.bodies.count = 0;
        let factory = BodyFactory::from_config(&config).unwrap();
        let specs = factory.generate(Viewport::new(800.0, 600.0), &mut ChaCha8Rng::seed_from_u64(1));
        assert!(specs.is_empty());
    }

    #[test]
    fn test_unvalidated_ranges_rejected() {
        let mut config = OverlayConfig::default();
        config.bodies.radius_min = 40.0;
        config.bodies.radius_max = 20.0;
        assert!(BodyFactory::from_config(&config).is_err());

        let mut config = OverlayConfig::default();
        config.bodies.spawn_y_min = f32::NAN;
        assert!(BodyFactory::from_config(&config).is_err());
    }

    #[test]
    fn test_body_contains() {
        let body = Body {
            handle: RigidBodyHandle::invalid(),
            radius: 20.0,
            color: Color::WHITE,
            mass: 1.0,
        };
        let center = Vec2::new(100.0, 100.0);
        assert!(body.contains(center, Vec2::new(115.0, 110.0)));
        assert!(!body.contains(center, Vec2::new(121.0, 100.0)));
    }
}
