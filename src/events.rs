use crate::core::geo::{LatLng, Point};
use crate::prelude::HashMap;
use std::collections::VecDeque;

/// Map event types emitted while navigating, loading tiles or autopanning
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A view change started
    MoveStart { zoom_changed: bool },
    /// The view moved; `fly_to` is set for intermediate fly-to frames
    Move {
        center: LatLng,
        zoom: f64,
        fly_to: bool,
    },
    /// A view change finished
    MoveEnd { center: LatLng, zoom_changed: bool },
    /// A tile layer queued its first batch while idle
    Loading,
    /// Every queued tile has been resolved
    Load,
    /// The map starts panning to keep a popup inside the viewport
    AutoPanStart { delta: Point },
    /// The active region was installed, changed or removed
    ActiveAreaChange,
}

impl MapEvent {
    /// Event name used for listener registration
    pub fn kind(&self) -> &'static str {
        match self {
            MapEvent::MoveStart { .. } => "movestart",
            MapEvent::Move { .. } => "move",
            MapEvent::MoveEnd { .. } => "moveend",
            MapEvent::Loading => "loading",
            MapEvent::Load => "load",
            MapEvent::AutoPanStart { .. } => "autopanstart",
            MapEvent::ActiveAreaChange => "activeareachange",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Queue of emitted events with optional listeners by event name
#[derive(Default)]
pub struct EventQueue {
    listeners: HashMap<&'static str, Vec<EventCallback>>,
    queue: VecDeque<MapEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.queue.push_back(event);
    }

    /// Dispatch all queued events to listeners and return them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Queued events, oldest first, without dispatching
    pub fn pending(&self) -> impl Iterator<Item = &MapEvent> {
        self.queue.iter()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn clear_events(&mut self) {
        self.queue.clear();
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_listeners_receive_matching_events() {
        let mut events = EventQueue::new();
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        events.on("loading", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        events.emit(MapEvent::Loading);
        events.emit(MapEvent::MoveStart { zoom_changed: false });
        events.emit(MapEvent::Loading);
        assert_eq!(events.pending_events(), 3);

        let processed = events.process_events();
        assert_eq!(processed.len(), 3);
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(events.pending_events(), 0);
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(
            MapEvent::AutoPanStart {
                delta: Point::zero()
            }
            .kind(),
            "autopanstart"
        );
        assert_eq!(
            MapEvent::MoveEnd {
                center: LatLng::default(),
                zoom_changed: true
            }
            .kind(),
            "moveend"
        );
    }
}
