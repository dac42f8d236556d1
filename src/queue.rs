//! Bounded event queue with priority front insertion.
//!
//! Exactly one task drains the queue; the touch controller, the two
//! timers and the telemetry task post into it from outside the
//! consumer's execution context, so insertion goes through a blocking
//! mutex (critical section). Front insertion is reserved for
//! dispatcher-synthesized continuation events so that a transition
//! target observes its own `Init`/`Redraw` before any event that was
//! queued earlier.
//!
//! Saturation policy: a full queue drops the event and reports `false`.
//! The user-visible effect is a missed beep, redraw or command - an
//! accepted degradation, never an error.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::event::Event;

/// Shared, bounded FIFO of UI events.
pub struct EventBus {
    queue: Mutex<CriticalSectionRawMutex, RefCell<Deque<Event, EVENT_QUEUE_CAPACITY>>>,
}

impl EventBus {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// FIFO insertion for external producers. Returns `false` if the
    /// event was dropped because the queue is full.
    pub fn post(&self, event: Event) -> bool {
        let ok = self
            .queue
            .lock(|q| q.borrow_mut().push_back(event).is_ok());
        if !ok {
            ui_debug!("event queue full, dropping external event");
        }
        ok
    }

    /// Priority insertion for dispatcher continuations.
    pub fn post_front(&self, event: Event) -> bool {
        let ok = self
            .queue
            .lock(|q| q.borrow_mut().push_front(event).is_ok());
        if !ok {
            ui_debug!("event queue full, dropping continuation event");
        }
        ok
    }

    /// Single-consumer pop.
    pub fn take(&self) -> Option<Event> {
        self.queue.lock(|q| q.borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        self.queue.lock(|q| q.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
