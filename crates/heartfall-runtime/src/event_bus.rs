//! Pending overlay notifications, drained by the host once per frame

use crate::event::OverlayEvent;

/// Ordered queue of [`OverlayEvent`]s.
///
/// A window drag can report many sizes between two frames; a resize pushed
/// right after another resize replaces it, so the host sees only the size
/// the overlay actually settled on.
#[derive(Debug, Default)]
pub struct EventBus {
    pending: Vec<OverlayEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: OverlayEvent) {
        let supersedes = matches!(event, OverlayEvent::Resized { .. })
            && matches!(self.pending.last(), Some(OverlayEvent::Resized { .. }));
        if supersedes {
            self.pending.pop();
        }
        self.pending.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<OverlayEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[OverlayEvent] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut bus = EventBus::new();
        bus.push(OverlayEvent::Activated { body_count: 180 });
        bus.push(OverlayEvent::DragStarted { body: 3 });
        bus.push(OverlayEvent::DragEnded { body: 3 });

        assert_eq!(
            bus.drain(),
            vec![
                OverlayEvent::Activated { body_count: 180 },
                OverlayEvent::DragStarted { body: 3 },
                OverlayEvent::DragEnded { body: 3 },
            ]
        );
        assert!(bus.is_empty());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_consecutive_resizes_coalesce() {
        let mut bus = EventBus::new();
        bus.push(OverlayEvent::Resized { width: 800.0, height: 600.0 });
        bus.push(OverlayEvent::Resized { width: 640.0, height: 480.0 });
        bus.push(OverlayEvent::Resized { width: 400.0, height: 300.0 });

        assert_eq!(
            bus.pending(),
            &[OverlayEvent::Resized { width: 400.0, height: 300.0 }]
        );
    }

    #[test]
    fn test_resizes_split_by_other_events_are_kept() {
        let mut bus = EventBus::new();
        bus.push(OverlayEvent::Resized { width: 800.0, height: 600.0 });
        bus.push(OverlayEvent::DragStarted { body: 0 });
        bus.push(OverlayEvent::Resized { width: 400.0, height: 300.0 });

        assert_eq!(bus.pending().len(), 3);
    }
}
