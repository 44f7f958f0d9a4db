//! Controllers for driving the widget from external code.
//!
//! The controllers expose lightweight state and a subscription mechanism
//! so non-UI code can pause/resume the loop and observe the transitions.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

/// External pause/resume signal for the animation loop.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Mutex<PlaybackInner>>,
}

struct PlaybackInner {
    paused: bool,
    listeners: Vec<Sender<bool>>,
}

impl PlaybackController {
    /// Create a fresh controller, initially not paused.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PlaybackInner {
                paused: false,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().paused
    }

    pub fn pause(&self) {
        self.set_paused(true);
    }

    pub fn resume(&self) {
        self.set_paused(false);
    }

    /// Set the signal; listeners are notified only on actual transitions.
    pub fn set_paused(&self, paused: bool) {
        let mut inner = self.inner.lock().unwrap();
        if inner.paused == paused {
            return;
        }
        inner.paused = paused;
        inner.listeners.retain(|tx| tx.send(paused).is_ok());
    }

    /// Subscribe to pause-state transitions (`true` = paused).
    pub fn subscribe(&self) -> Receiver<bool> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}
