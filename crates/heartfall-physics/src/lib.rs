//! Heartfall Physics - Rapier 2D integration
//!
//! Provides the simulation side of the overlay:
//! - `PhysicsWorld`: wraps the Rapier pipeline behind a pixel-space API
//! - `BodyFactory`: spawns the falling population
//! - `Boundaries`: floor and side walls framing the viewport
//! - `DragConstraint`: pointer spring attached to one body at a time
//! - `HeartWorld`: everything above for one activation

pub mod bodies;
pub mod boundary;
pub mod drag;
pub mod world;

use bodies::{Body, BodyFactory, BodyId, BodySpec};
use boundary::Boundaries;
use drag::DragConstraint;
use glam::Vec2;
use heartfall_core::{BodySnapshot, OverlayConfig, Result, Viewport};
use rand::Rng;
use world::{Material, PhysicsWorld};

/// Bodies, boundaries, gravity and the drag spring for one active session
pub struct HeartWorld {
    physics: PhysicsWorld,
    bodies: Vec<Body>,
    boundaries: Boundaries,
    drag: DragConstraint,
    viewport: Viewport,
}

impl HeartWorld {
    /// Build a world and populate it from the body factory
    pub fn new<R: Rng>(config: &OverlayConfig, viewport: Viewport, rng: &mut R) -> Result<Self> {
        let factory = BodyFactory::from_config(config)?;
        let specs = factory.generate(viewport, rng);
        Ok(Self::from_specs(config, viewport, &specs))
    }

    /// Build a world holding exactly the given bodies
    pub fn from_specs(config: &OverlayConfig, viewport: Viewport, specs: &[BodySpec]) -> Self {
        let mut physics = PhysicsWorld::new(Vec2::from(config.world.gravity_px_per_s2()));
        let material = Material {
            restitution: config.bodies.restitution,
            friction: config.bodies.friction,
            density: config.bodies.density,
        };

        let bodies = specs
            .iter()
            .map(|spec| Body {
                handle: physics.insert_ball(spec.position, spec.radius, material),
                radius: spec.radius,
                color: spec.color,
                mass: material.density * std::f32::consts::PI * spec.radius * spec.radius,
            })
            .collect();

        let boundaries = Boundaries::new(&mut physics, viewport, config.world.wall_thickness);

        Self {
            physics,
            bodies,
            boundaries,
            drag: DragConstraint::new(&config.drag),
            viewport,
        }
    }

    /// Advance the simulation by one fixed step of `dt` seconds
    pub fn fixed_update(&mut self, dt: f32) {
        self.drag.apply(&mut self.physics, dt);
        self.physics.step(dt);
    }

    /// Current state of every body, in draw order
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        let mut out = Vec::with_capacity(self.bodies.len());
        self.snapshots_into(&mut out);
        out
    }

    /// Like [`snapshots`](Self::snapshots), reusing the caller's buffer
    pub fn snapshots_into(&self, out: &mut Vec<BodySnapshot>) {
        out.clear();
        out.extend(self.bodies.iter().filter_map(|body| {
            let (position, angle) = self.physics.pose(body.handle)?;
            Some(BodySnapshot {
                position,
                angle,
                radius: body.radius,
                color: body.color,
            })
        }));
    }

    /// Reposition boundaries for a new viewport; bodies are left alone
    pub fn resize(&mut self, viewport: Viewport) {
        self.boundaries.resize(&mut self.physics, viewport);
        self.viewport = viewport;
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            "boundaries repositioned"
        );
    }

    /// Top-most body whose circle contains `at`
    pub fn body_at(&self, at: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, body)| {
                self.physics
                    .translation(body.handle)
                    .is_some_and(|center| body.contains(center, at))
            })
            .map(|(index, _)| BodyId(index))
    }

    /// Engage the drag spring on the body under the pointer, if any
    pub fn grab(&mut self, at: Vec2) -> Option<BodyId> {
        self.drag.set_pointer(at);
        let id = self.body_at(at)?;
        let body = self.bodies[id.0];
        if self.drag.attach(&self.physics, id, body.handle, body.mass, at) {
            tracing::debug!(body = id.0, x = at.x, y = at.y, "grabbed body");
            Some(id)
        } else {
            None
        }
    }

    /// Move the pointer end of the drag spring
    pub fn drag_to(&mut self, at: Vec2) {
        self.drag.set_pointer(at);
    }

    /// Detach the drag spring; the body keeps its velocity
    pub fn release(&mut self) -> Option<BodyId> {
        let released = self.drag.detach();
        if let Some(id) = released {
            tracing::debug!(body = id.0, "released body");
        }
        released
    }

    pub fn dragged(&self) -> Option<BodyId> {
        self.drag.attached()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn body_position(&self, id: BodyId) -> Option<Vec2> {
        self.physics.translation(self.body(id)?.handle)
    }

    pub fn body_velocity(&self, id: BodyId) -> Option<Vec2> {
        self.physics.linvel(self.body(id)?.handle)
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
