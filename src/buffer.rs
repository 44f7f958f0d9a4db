//! Ring buffer of recorded intensity samples.
//!
//! The acquisition side owns a [`BufferWriter`]; the widget reads through
//! a [`SharedSampleBuffer`]. Reads snapshot the write cursor once per
//! frame and never look past it, so an append from another thread cannot
//! be observed mid-tick.

use std::sync::{Arc, Mutex};

/// One recorded reading. The logical buffer index, not this struct,
/// carries the sample's position; `t` is the capture time in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub value: f64,
}

/// Position metadata returned alongside the newest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMeta {
    /// Logical index of the sample (0 = oldest retained).
    pub index: usize,
}

/// Fixed-capacity sequence with a write cursor. Once full, new samples
/// overwrite the oldest; `head` then stays pinned at the capacity.
pub struct SampleBuffer {
    slots: Vec<Sample>,
    capacity: usize,
    /// Physical slot the next append lands in (only meaningful once the
    /// buffer has wrapped).
    write: usize,
    /// Total samples ever pushed.
    total: u64,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            write: 0,
            total: 0,
        }
    }

    /// Current fill length / write cursor. Always `<= capacity`.
    pub fn head(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total samples ever pushed, including overwritten ones.
    pub fn total_pushed(&self) -> u64 {
        self.total
    }

    /// Append a sample, overwriting the oldest once full.
    pub fn push(&mut self, t: f64, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let sample = Sample { t, value };
        if self.slots.len() < self.capacity {
            self.slots.push(sample);
        } else {
            self.slots[self.write] = sample;
        }
        self.write = (self.write + 1) % self.capacity;
        self.total += 1;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.write = 0;
    }

    fn logical(&self, index: usize) -> Sample {
        if self.slots.len() < self.capacity {
            self.slots[index]
        } else {
            self.slots[(self.write + index) % self.capacity]
        }
    }

    /// Lazy iterator over the logical range `[start+offset,
    /// start+offset+length)`, clamped to the current fill length.
    /// Iteration never mutates the buffer and is restartable.
    pub fn iter_range(&self, start: usize, offset: usize, length: usize) -> SampleIter<'_> {
        let head = self.head();
        let begin = start.saturating_add(offset).min(head);
        let end = begin.saturating_add(length).min(head);
        SampleIter {
            buffer: self,
            next: begin,
            end,
        }
    }

    /// The most recent sample and its logical index, if any.
    pub fn read_head(&self) -> Option<(Sample, SampleMeta)> {
        let head = self.head();
        if head == 0 {
            return None;
        }
        Some((self.logical(head - 1), SampleMeta { index: head - 1 }))
    }
}

/// Finite lazy iterator yielding `(logical index, value)` pairs.
pub struct SampleIter<'a> {
    buffer: &'a SampleBuffer,
    next: usize,
    end: usize,
}

impl Iterator for SampleIter<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some((index, self.buffer.logical(index).value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleIter<'_> {}

// ─────────────────────────────────────────────────────────────────────────────
// Shared handle
// ─────────────────────────────────────────────────────────────────────────────

/// Cheap-to-clone shared handle around a [`SampleBuffer`]. The widget
/// reads through it once per tick; the acquisition side writes through a
/// [`BufferWriter`], possibly from another thread.
#[derive(Clone)]
pub struct SharedSampleBuffer {
    inner: Arc<Mutex<SampleBuffer>>,
}

impl SharedSampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SampleBuffer::new(capacity))),
        }
    }

    /// Writer handle for the acquisition side.
    pub fn writer(&self) -> BufferWriter {
        BufferWriter {
            inner: self.inner.clone(),
        }
    }

    /// Run `f` against the buffer under the lock. Keep `f` short; the
    /// writer blocks while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&SampleBuffer) -> R) -> R {
        f(&self.inner.lock().unwrap())
    }

    /// Snapshot of the write cursor.
    pub fn head(&self) -> usize {
        self.inner.lock().unwrap().head()
    }
}

/// Producer-side handle; cheap to clone and `Send`.
#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<SampleBuffer>>,
}

impl BufferWriter {
    pub fn push(&self, t: f64, value: f64) {
        self.inner.lock().unwrap().push(t, value);
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}
