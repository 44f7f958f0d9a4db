//! Demo: pointer-driven annotation
//!
//! What it demonstrates
//! - The `continuous-mousemove` mode: the pointer's height inside the
//!   canvas is the reading, clamped to [0, 1]. No keys are bound.
//! - Control overrides via a JSON config string.
//!
//! How to run
//! ```bash
//! cargo run --example mouse_live
//! ```

use ranktrace::{
    channel_intensity, run_ranktrace, InputConfig, SharedSampleBuffer, SignalSource,
};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let cfg = InputConfig::from_json_str(
        r#"{"mode": "continuous-mousemove", "graph_update_period_ms": 100}"#,
    )
    .expect("demo config is valid");

    let buffer = SharedSampleBuffer::new(4096);
    let writer = buffer.writer();
    let (sink, rx) = channel_intensity();

    std::thread::spawn(move || {
        let start = std::time::Instant::now();
        for reading in rx {
            writer.push(start.elapsed().as_secs_f64(), reading.value);
        }
    });

    run_ranktrace(cfg, SignalSource::Live, buffer, Some(sink))
}
