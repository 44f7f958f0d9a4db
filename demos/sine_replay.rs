//! Demo: replay of a synthetic recording
//!
//! What it demonstrates
//! - Feeding samples into a `SharedSampleBuffer` from a producer thread.
//! - Running the widget in replay mode: no input bindings are attached
//!   and the reading is driven from the newest recorded sample.
//!
//! How to run
//! ```bash
//! cargo run --example sine_replay
//! ```
//! You should see a smoothed sine trace growing across the canvas with
//! the cursor riding its newest point.

use std::time::Duration;

use ranktrace::{run_ranktrace, InputConfig, InputMode, SharedSampleBuffer, SignalSource};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let buffer = SharedSampleBuffer::new(2048);
    let writer = buffer.writer();

    // Producer: 50 Hz sample rate, 0.2 Hz sine
    std::thread::spawn(move || {
        const FS_HZ: f64 = 50.0;
        const F_HZ: f64 = 0.2;
        let mut n: u64 = 0;
        loop {
            let t = n as f64 / FS_HZ;
            let value = (2.0 * std::f64::consts::PI * F_HZ * t).sin();
            writer.push(t, value);
            n = n.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(20));
        }
    });

    let cfg = InputConfig {
        mode: InputMode::Ranktrace,
        ..Default::default()
    };
    run_ranktrace(cfg, SignalSource::Replay, buffer, None)
}
