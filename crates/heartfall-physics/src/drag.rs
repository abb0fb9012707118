//! Pointer drag spring
//!
//! One `DragConstraint` lives for a whole activation. Its attachment is
//! transient: pressing over a body engages it, releasing lets go. While
//! engaged, every fixed step pushes the grabbed point a fraction of the way
//! toward the pointer with an impulse, so the body lags behind the pointer
//! instead of snapping to it, and turns when held off-centre.

use crate::bodies::BodyId;
use crate::world::PhysicsWorld;
use glam::Vec2;
use heartfall_core::DragConfig;
use rapier2d::prelude::RigidBodyHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Attachment {
    body: BodyId,
    handle: RigidBodyHandle,
    mass: f32,
    /// Grab point in the body's local frame
    local_anchor: Vec2,
}

#[derive(Debug)]
pub struct DragConstraint {
    stiffness: f32,
    damping: f32,
    pointer: Option<Vec2>,
    attachment: Option<Attachment>,
}

impl DragConstraint {
    pub fn new(config: &DragConfig) -> Self {
        Self {
            stiffness: config.stiffness,
            damping: config.damping,
            pointer: None,
            attachment: None,
        }
    }

    /// Engage `body` at the world point `at`
    pub fn attach(
        &mut self,
        world: &PhysicsWorld,
        body: BodyId,
        handle: RigidBodyHandle,
        mass: f32,
        at: Vec2,
    ) -> bool {
        let Some(local_anchor) = world.local_point(handle, at) else {
            return false;
        };
        self.pointer = Some(at);
        self.attachment = Some(Attachment {
            body,
            handle,
            mass,
            local_anchor,
        });
        true
    }

    /// Let go of the current body; returns it if one was held
    pub fn detach(&mut self) -> Option<BodyId> {
        self.attachment.take().map(|a| a.body)
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn attached(&self) -> Option<BodyId> {
        self.attachment.map(|a| a.body)
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Pull the engaged body toward the pointer for one step of `dt` seconds.
    ///
    /// A body that vanished from the world since it was grabbed is dropped
    /// silently.
    pub fn apply(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let (Some(attachment), Some(pointer)) = (self.attachment, self.pointer) else {
            return;
        };
        if dt <= 0.0 {
            return;
        }

        let (Some(anchor), Some(velocity)) = (
            world.world_point(attachment.handle, attachment.local_anchor),
            world.linvel(attachment.handle),
        ) else {
            self.attachment = None;
            return;
        };

        let delta_v = self.stiffness * (pointer - anchor) / dt - self.damping * velocity;
        world.apply_impulse_at_point(attachment.handle, attachment.mass * delta_v, anchor);
    }
}
