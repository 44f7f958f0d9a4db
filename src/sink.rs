//! Published-output channel: the widget's sole data-producing boundary.
//!
//! In live mode the loop publishes the current reading once per tick; in
//! replay mode nothing is published. The consumer (recording/transport
//! layer) holds the receiver.

use std::sync::mpsc::{Receiver, Sender};

use chrono::{DateTime, Utc};

/// One published reading.
#[derive(Debug, Clone, Copy)]
pub struct IntensityReading {
    pub value: f64,
    /// Wall-clock publish time.
    pub t: DateTime<Utc>,
}

/// Sender half handed to the widget; cheap to clone.
#[derive(Clone)]
pub struct IntensitySink {
    tx: Sender<IntensityReading>,
}

impl IntensitySink {
    /// Publish the current reading. A dropped receiver is ignored; the
    /// consumer closing is not the widget's concern.
    pub fn set_intensity(&self, value: f64) {
        let _ = self.tx.send(IntensityReading {
            value,
            t: Utc::now(),
        });
    }
}

/// Create the publish channel for one widget.
pub fn channel_intensity() -> (IntensitySink, Receiver<IntensityReading>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (IntensitySink { tx }, rx)
}
