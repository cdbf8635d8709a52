use selene_engine::input::InputEvent;

/// Slots in the platform event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 128;

/// Fixed-capacity buffer of input events with a running length.
///
/// Only allocated on platforms without native event delivery; events are
/// collected here between ticks and handed to the script in arrival order.
#[derive(Debug)]
pub struct EventQueue {
    events: Vec<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::with_capacity(EVENT_QUEUE_CAPACITY) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends an event. Returns `false` (dropping it) once the queue is full.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.events.len() >= EVENT_QUEUE_CAPACITY {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Empties the queue, yielding events in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
