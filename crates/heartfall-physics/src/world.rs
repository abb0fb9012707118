//! Physics world wrapping Rapier 2D
//!
//! Callers work in logical pixels with y growing downward. Rapier itself runs
//! in metres; every value crossing this wrapper is scaled by
//! [`PIXELS_PER_METER`].

use glam::Vec2;
use rapier2d::prelude::*;

/// Conversion between the pixel API and Rapier's internal metres
pub const PIXELS_PER_METER: f32 = 100.0;

fn to_meters(v: Vec2) -> Vector<Real> {
    vector![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

fn to_meters_point(v: Vec2) -> Point<Real> {
    point![v.x / PIXELS_PER_METER, v.y / PIXELS_PER_METER]
}

fn to_pixels(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y) * PIXELS_PER_METER
}

fn to_pixels_point(p: &Point<Real>) -> Vec2 {
    Vec2::new(p.x, p.y) * PIXELS_PER_METER
}

/// Surface response of a collider, with density expressed per square pixel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// Create a world with gravity given in px/s²
    pub fn new(gravity: Vec2) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: to_meters(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Step the physics simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    /// Gravity in px/s²
    pub fn gravity(&self) -> Vec2 {
        to_pixels(&self.gravity)
    }

    /// Insert a dynamic ball and return its handle
    pub fn insert_ball(&mut self, center: Vec2, radius: f32, material: Material) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_meters(center))
            .build();
        let handle = self.rigid_body_set.insert(body);

        // Same mass in both unit systems: density per m² = density per px² * ppm²
        let collider = ColliderBuilder::ball(radius / PIXELS_PER_METER)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density * PIXELS_PER_METER * PIXELS_PER_METER)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Insert an immovable box centred at `center` with the given full size
    pub fn insert_fixed_cuboid(&mut self, center: Vec2, size: Vec2) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(to_meters(center))
            .build();
        let handle = self.rigid_body_set.insert(body);

        let half = size * 0.5 / PIXELS_PER_METER;
        let collider = ColliderBuilder::cuboid(half.x, half.y).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Remove a rigid body and its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Centre and rotation of a body
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<(Vec2, f32)> {
        self.rigid_body_set
            .get(handle)
            .map(|rb| (to_pixels(rb.translation()), rb.rotation().angle()))
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.pose(handle).map(|(position, _)| position)
    }

    /// Move a body without touching its velocity
    pub fn set_translation(&mut self, handle: RigidBodyHandle, center: Vec2) {
        if let Some(rb) = self.rigid_body_set.get_mut(handle) {
            rb.set_translation(to_meters(center), true);
        }
    }

    /// Linear velocity in px/s
    pub fn linvel(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|rb| to_pixels(rb.linvel()))
    }

    /// Map a world point into the body's local frame
    pub fn local_point(&self, handle: RigidBodyHandle, world: Vec2) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|rb| {
            let local = rb.position().inverse_transform_point(&to_meters_point(world));
            to_pixels_point(&local)
        })
    }

    /// Map a point in the body's local frame back into the world
    pub fn world_point(&self, handle: RigidBodyHandle, local: Vec2) -> Option<Vec2> {
        self.rigid_body_set.get(handle).map(|rb| {
            let world = rb.position() * to_meters_point(local);
            to_pixels_point(&world)
        })
    }

    /// Apply an instantaneous impulse (mass · px/s) at a world point
    pub fn apply_impulse_at_point(&mut self, handle: RigidBodyHandle, impulse: Vec2, point: Vec2) {
        if let Some(rb) = self.rigid_body_set.get_mut(handle) {
            rb.apply_impulse_at_point(to_meters(impulse), to_meters_point(point), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATERIAL: Material = Material {
        restitution: 0.2,
        friction: 0.5,
        density: 0.05,
    };

    #[test]
    fn test_create_physics_world() {
        let world = PhysicsWorld::new(Vec2::new(0.0, 1000.0));
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_set.len(), 0);
        assert!((world.gravity().y - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_insert_ball_and_cuboid() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 1000.0));
        let ball = world.insert_ball(Vec2::new(120.0, -40.0), 25.0, MATERIAL);
        let floor = world.insert_fixed_cuboid(Vec2::new(400.0, 650.0), Vec2::new(800.0, 100.0));

        assert_eq!(world.body_count(), 2);
        assert_eq!(world.collider_set.len(), 2);

        let p = world.translation(ball).unwrap();
        assert!((p - Vec2::new(120.0, -40.0)).length() < 1e-3);
        let f = world.translation(floor).unwrap();
        assert!((f - Vec2::new(400.0, 650.0)).length() < 1e-3);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 1000.0));
        let ball = world.insert_ball(Vec2::new(0.0, 0.0), 20.0, MATERIAL);

        for _ in 0..30 {
            world.step(1.0 / 60.0);
        }

        // y grows downward
        let y = world.translation(ball).unwrap().y;
        assert!(y > 100.0);
        assert!(world.linvel(ball).unwrap().y > 0.0);
    }

    #[test]
    fn test_ball_rests_on_floor() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 1000.0));
        let ball = world.insert_ball(Vec2::new(400.0, 300.0), 30.0, MATERIAL);
        world.insert_fixed_cuboid(Vec2::new(400.0, 650.0), Vec2::new(800.0, 100.0));

        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }

        // Floor top is at 600, the ball centre settles one radius above it
        let y = world.translation(ball).unwrap().y;
        assert!((y - 570.0).abs() < 3.0, "ball settled at {y}");
    }

    #[test]
    fn test_local_world_point_inverse() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let ball = world.insert_ball(Vec2::new(50.0, 80.0), 20.0, MATERIAL);

        let grab = Vec2::new(60.0, 75.0);
        let local = world.local_point(ball, grab).unwrap();
        assert!((local - Vec2::new(10.0, -5.0)).length() < 1e-3);
        let back = world.world_point(ball, local).unwrap();
        assert!((back - grab).length() < 1e-3);
    }

    #[test]
    fn test_off_centre_impulse_spins() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let ball = world.insert_ball(Vec2::ZERO, 20.0, MATERIAL);
        world.step(1.0 / 60.0);

        world.apply_impulse_at_point(ball, Vec2::new(50.0, 0.0), Vec2::new(0.0, -15.0));
        assert!(world.linvel(ball).unwrap().x > 0.0);

        world.step(1.0 / 60.0);
        let (_, angle) = world.pose(ball).unwrap();
        assert!(angle.abs() > 0.0);
    }

    #[test]
    fn test_remove_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let ball = world.insert_ball(Vec2::ZERO, 20.0, MATERIAL);
        world.remove_rigid_body(ball);
        assert!(!world.contains(ball));
        assert_eq!(world.pose(ball), None);
    }
}
