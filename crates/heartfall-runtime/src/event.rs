//! Events raised by the overlay for the host to observe

/// Lifecycle and interaction notifications
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// A fresh world was built and both loops started
    Activated { body_count: usize },
    /// Loops stopped and every resource of the session released
    Deactivated,
    /// Boundaries and surface follow a new viewport
    Resized { width: f32, height: f32 },
    /// The drag constraint attached to a body
    DragStarted { body: usize },
    /// The drag constraint let go of a body
    DragEnded { body: usize },
}
