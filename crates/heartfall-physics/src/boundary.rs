//! Static floor and side walls that keep bodies inside the viewport

use crate::world::PhysicsWorld;
use glam::Vec2;
use heartfall_core::Viewport;
use rapier2d::prelude::RigidBodyHandle;

/// Which of the three boundaries a handle belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Floor,
    Left,
    Right,
}

/// Three fixed, invisible cuboids sized to the viewport at creation
pub struct Boundaries {
    floor: RigidBodyHandle,
    left: RigidBodyHandle,
    right: RigidBodyHandle,
    thickness: f32,
}

impl Boundaries {
    pub fn new(world: &mut PhysicsWorld, viewport: Viewport, thickness: f32) -> Self {
        let (w, h, t) = (viewport.width, viewport.height, thickness);

        let floor = world.insert_fixed_cuboid(floor_center(w, h, t), Vec2::new(w, t));
        let left = world.insert_fixed_cuboid(Vec2::new(-t / 2.0, h / 2.0), Vec2::new(t, h));
        let right = world.insert_fixed_cuboid(right_center(w, h, t), Vec2::new(t, h));

        Self {
            floor,
            left,
            right,
            thickness,
        }
    }

    /// Follow a new viewport by moving the floor and right wall.
    ///
    /// Extents stay as created and the left wall never moves, so a viewport
    /// that grows far beyond its initial size can open gaps at the corners.
    pub fn resize(&self, world: &mut PhysicsWorld, viewport: Viewport) {
        let (w, h, t) = (viewport.width, viewport.height, self.thickness);
        world.set_translation(self.floor, floor_center(w, h, t));
        world.set_translation(self.right, right_center(w, h, t));
    }

    pub fn handle(&self, side: Side) -> RigidBodyHandle {
        match side {
            Side::Floor => self.floor,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn center(&self, world: &PhysicsWorld, side: Side) -> Option<Vec2> {
        world.translation(self.handle(side))
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

fn floor_center(w: f32, h: f32, t: f32) -> Vec2 {
    Vec2::new(w / 2.0, h + t / 2.0)
}

fn right_center(w: f32, h: f32, t: f32) -> Vec2 {
    Vec2::new(w + t / 2.0, h / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(actual: Option<Vec2>, expected: Vec2) {
        let actual = actual.unwrap();
        assert!(
            (actual - expected).length() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_boundaries_frame_viewport() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let walls = Boundaries::new(&mut world, Viewport::new(800.0, 600.0), 100.0);

        assert_eq!(world.body_count(), 3);
        assert_near(walls.center(&world, Side::Floor), Vec2::new(400.0, 650.0));
        assert_near(walls.center(&world, Side::Left), Vec2::new(-50.0, 300.0));
        assert_near(walls.center(&world, Side::Right), Vec2::new(850.0, 300.0));
    }

    #[test]
    fn test_resize_moves_floor_and_right_wall_only() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let walls = Boundaries::new(&mut world, Viewport::new(800.0, 600.0), 100.0);

        walls.resize(&mut world, Viewport::new(400.0, 300.0));

        assert_near(walls.center(&world, Side::Floor), Vec2::new(200.0, 350.0));
        assert_near(walls.center(&world, Side::Right), Vec2::new(450.0, 150.0));
        assert_near(walls.center(&world, Side::Left), Vec2::new(-50.0, 300.0));
    }

    #[test]
    fn test_resize_keeps_extents() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let walls = Boundaries::new(&mut world, Viewport::new(800.0, 600.0), 100.0);
        walls.resize(&mut world, Viewport::new(1600.0, 1200.0));
        world.step(1.0 / 60.0);

        let floor = walls.handle(Side::Floor);
        let collider = world.rigid_body_set[floor].colliders()[0];
        let cuboid = world.collider_set[collider].shape().as_cuboid().unwrap();
        // 800 px wide at 100 px/m
        assert!((cuboid.half_extents.x - 4.0).abs() < 1e-4);
    }
}
