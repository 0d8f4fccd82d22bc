//! Single-consumer event queue
//!
//! Producers stamp events with the frame-relative time they fired at. A
//! frame's batch is merged by that stamp (stable, so same-instant events keep
//! producer order) and appended behind whatever is already queued.

use std::collections::VecDeque;

use crate::sim::Event;

/// An event stamped with its offset (ms) inside the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timed {
    pub at_ms: f64,
    pub event: Event,
}

impl Timed {
    pub fn new(at_ms: f64, event: Event) -> Self {
        Self { at_ms, event }
    }
}

/// FIFO of events waiting for the reducer
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single event (input callbacks)
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Append one frame's worth of stamped events in time order
    pub fn push_batch(&mut self, mut batch: Vec<Timed>) {
        batch.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        self.events.extend(batch.into_iter().map(|t| t.event));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Drop everything pending (terminal signals stop the stream)
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(Event::Shoot);
        queue.push(Event::Tick(0));
        assert_eq!(queue.pop(), Some(Event::Shoot));
        assert_eq!(queue.pop(), Some(Event::Tick(0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_batch_merges_by_time_stably() {
        let mut queue = EventQueue::new();
        queue.push(Event::ChangePosition(50.0));
        queue.push_batch(vec![
            Timed::new(10.0, Event::Tick(1)),
            Timed::new(5.0, Event::Move(6.5)),
            Timed::new(10.0, Event::EnemyShoot),
            Timed::new(0.0, Event::Tick(0)),
        ]);
        let drained: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(
            drained,
            vec![
                Event::ChangePosition(50.0),
                Event::Tick(0),
                Event::Move(6.5),
                Event::Tick(1),
                Event::EnemyShoot,
            ]
        );
    }
}
