//! Event subscription for the widget.
//!
//! Callers subscribe with an [`EventKind`] OR-mask filter: an event is
//! delivered when `(event.kinds & filter) != 0`. Receivers that hang up
//! are dropped silently on the next emit.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    /// The loop was paused (externally or programmatically).
    pub const PAUSE: Self = Self(1 << 0);
    /// The loop was resumed.
    pub const RESUME: Self = Self(1 << 1);
    /// A live reading was published this tick.
    pub const READING: Self = Self(1 << 2);
    /// A recorded sample was replayed into the tracker this tick.
    pub const REPLAY_SAMPLE: Self = Self(1 << 3);
    /// The loop was torn down.
    pub const STOP: Self = Self(1 << 4);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u64::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }
        let pairs: &[(EventKind, &str)] = &[
            (EventKind::PAUSE, "PAUSE"),
            (EventKind::RESUME, "RESUME"),
            (EventKind::READING, "READING"),
            (EventKind::REPLAY_SAMPLE, "REPLAY_SAMPLE"),
            (EventKind::STOP, "STOP"),
        ];
        let mut names = Vec::new();
        let mut known_bits: u64 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TraceEvent
// ─────────────────────────────────────────────────────────────────────────────

/// One occurrence delivered to subscribers.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub kinds: EventKind,
    /// Reading value for READING / REPLAY_SAMPLE events.
    pub value: Option<f64>,
    pub t: DateTime<Utc>,
}

impl TraceEvent {
    pub fn kind(kinds: EventKind) -> Self {
        Self {
            kinds,
            value: None,
            t: Utc::now(),
        }
    }

    pub fn reading(value: f64) -> Self {
        Self {
            kinds: EventKind::READING,
            value: Some(value),
            t: Utc::now(),
        }
    }

    pub fn replayed(value: f64) -> Self {
        Self {
            kinds: EventKind::REPLAY_SAMPLE,
            value: Some(value),
            t: Utc::now(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscription {
    filter: EventKind,
    tx: Sender<TraceEvent>,
}

/// Fan-out of widget events to filtered subscribers.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<Vec<Subscription>>>,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe with an OR-mask filter.
    pub fn subscribe(&self, filter: EventKind) -> Receiver<TraceEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.inner.lock().unwrap().push(Subscription { filter, tx });
        rx
    }

    /// Deliver an event to every subscriber whose filter intersects it.
    pub fn emit(&self, event: TraceEvent) {
        let mut subs = self.inner.lock().unwrap();
        subs.retain(|s| {
            if !s.filter.intersects(event.kinds) {
                return true;
            }
            s.tx.send(event.clone()).is_ok()
        });
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}
