//! Handoff from tick producers (possibly on other threads) to the thread that owns the widget.

use std::sync::mpsc;

use crate::{foundation::core::Generation, timer::TimerId};

/// Work item applied on the UI-affine thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// One timer interval elapsed.
    Tick {
        /// Timer that produced the tick.
        timer: TimerId,
        /// Countdown cycle the timer was scheduled for.
        generation: Generation,
    },
}

/// Sending half of the UI queue. Cheap to clone and `Send`.
#[derive(Clone, Debug)]
pub struct UiSender(mpsc::Sender<UiEvent>);

impl UiSender {
    /// Post an event. Returns `false` once the owning widget is gone.
    pub fn post(&self, event: UiEvent) -> bool {
        self.0.send(event).is_ok()
    }
}

/// Queue drained by the widget on its own thread.
#[derive(Debug)]
pub struct UiQueue {
    tx: mpsc::Sender<UiEvent>,
    rx: mpsc::Receiver<UiEvent>,
}

impl UiQueue {
    /// Empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// New sending handle.
    pub fn sender(&self) -> UiSender {
        UiSender(self.tx.clone())
    }

    /// Take every event posted so far without blocking.
    pub fn drain(&self) -> impl Iterator<Item = UiEvent> + '_ {
        self.rx.try_iter()
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}
