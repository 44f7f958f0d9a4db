//! Demo: live keyboard annotation
//!
//! What it demonstrates
//! - The `ranktrace` mode with its default controls: `s` raises the
//!   reading, `a` lowers it, one unit per keydown.
//! - The publish channel: every tick the widget publishes the current
//!   reading; this demo records the published readings back into the
//!   sample buffer, which is what the widget draws.
//!
//! How to run
//! ```bash
//! cargo run --example keyboard_live
//! ```

use ranktrace::{
    channel_intensity, run_ranktrace, InputConfig, InputMode, SharedSampleBuffer, SignalSource,
};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let buffer = SharedSampleBuffer::new(4096);
    let writer = buffer.writer();
    let (sink, rx) = channel_intensity();

    // Recorder: persist each published reading as a buffer sample.
    std::thread::spawn(move || {
        let start = std::time::Instant::now();
        for reading in rx {
            writer.push(start.elapsed().as_secs_f64(), reading.value);
        }
        log::info!("widget closed, recorder exiting");
    });

    let cfg = InputConfig {
        mode: InputMode::Ranktrace,
        ..Default::default()
    };
    run_ranktrace(cfg, SignalSource::Live, buffer, Some(sink))
}
