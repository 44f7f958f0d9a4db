use egui::{pos2, vec2, Rect};
use ranktrace::input::Action;
use ranktrace::{
    channel_intensity, AnimationLoop, EventKind, InputConfig, InputMode, LoopState, SampleBuffer,
    SignalSource, TickInput,
};

fn canvas() -> Rect {
    Rect::from_min_size(pos2(0.0, 0.0), vec2(810.0, 150.0))
}

fn ranktrace_config() -> InputConfig {
    InputConfig {
        mode: InputMode::Ranktrace,
        ..Default::default()
    }
}

#[test]
fn live_tick_publishes_the_reading() {
    let (sink, rx) = channel_intensity();
    let mut looper =
        AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, Some(sink));
    let buf = SampleBuffer::new(8);

    let input = TickInput {
        pressed: vec![Action::Up],
        ..Default::default()
    };
    let wants_frame = looper.tick(&input, &buf, None, canvas());
    assert!(wants_frame);

    let reading = rx.try_recv().expect("live tick must publish");
    assert_eq!(reading.value, 1.0, "input applies before the snapshot");
    assert!(rx.try_recv().is_err(), "exactly one reading per tick");
}

#[test]
fn replay_tick_does_not_publish() {
    let (sink, rx) = channel_intensity();
    let mut looper =
        AnimationLoop::from_config(&ranktrace_config(), SignalSource::Replay, Some(sink));
    let mut buf = SampleBuffer::new(8);
    buf.push(0.0, 2.0);
    buf.push(0.1, 5.0);

    looper.tick(&TickInput::default(), &buf, None, canvas());
    assert!(rx.try_recv().is_err());
    assert_eq!(looper.tracker().read(), 5.0, "replay feeds the newest sample");
}

#[test]
fn replay_mode_attaches_no_input_bindings() {
    let looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Replay, None);
    assert!(looper.bindings().is_empty());
}

#[test]
fn replay_ignores_pressed_actions() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Replay, None);
    let buf = SampleBuffer::new(8);
    let input = TickInput {
        pressed: vec![Action::Up, Action::Up],
        ..Default::default()
    };
    looper.tick(&input, &buf, None, canvas());
    assert_eq!(looper.tracker().read(), 0.0);
}

#[test]
fn stopped_loop_has_no_side_effects() {
    let (sink, rx) = channel_intensity();
    let mut looper =
        AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, Some(sink));
    let buf = SampleBuffer::new(8);

    looper.stop();
    let input = TickInput {
        pressed: vec![Action::Up],
        ..Default::default()
    };
    let wants_frame = looper.tick(&input, &buf, None, canvas());

    assert!(!wants_frame, "a stopped loop schedules nothing");
    assert!(rx.try_recv().is_err(), "no publish after teardown");
    assert_eq!(looper.tracker().read(), 0.0, "no state mutation after teardown");
    assert!(looper.bindings().is_empty(), "teardown detaches listeners");
}

#[test]
fn stop_is_idempotent_and_emits_once() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    let rx = looper.events().subscribe(EventKind::STOP);
    looper.stop();
    looper.stop();
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err(), "STOP must be emitted exactly once");
}

#[test]
fn pause_then_resume_preserves_state_exactly() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    let buf = SampleBuffer::new(8);
    let up = TickInput {
        pressed: vec![Action::Up],
        ..Default::default()
    };
    looper.tick(&up, &buf, None, canvas());
    looper.tick(&up, &buf, None, canvas());
    let before = looper.tracker().state();

    looper.set_paused(true);
    assert_eq!(looper.state(), LoopState::Paused);
    assert!(!looper.tick(&up, &buf, None, canvas()), "paused loop skips ticks");
    looper.set_paused(false);
    assert_eq!(looper.state(), LoopState::Running);

    assert_eq!(looper.tracker().state(), before, "pause itself causes no drift");
}

#[test]
fn pause_and_resume_emit_events() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    let rx = looper
        .events()
        .subscribe(EventKind::PAUSE | EventKind::RESUME);
    looper.pause();
    looper.resume();
    assert!(rx.try_recv().unwrap().kinds.contains(EventKind::PAUSE));
    assert!(rx.try_recv().unwrap().kinds.contains(EventKind::RESUME));
}

#[test]
fn resume_does_not_revive_a_stopped_loop() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    looper.stop();
    looper.resume();
    assert_eq!(looper.state(), LoopState::Stopped);
    looper.set_paused(false);
    assert_eq!(looper.state(), LoopState::Stopped);
}

#[test]
fn unresolvable_mode_degrades_to_no_bindings() {
    let cfg = InputConfig {
        mode: InputMode::Binary,
        ..Default::default()
    };
    let looper = AnimationLoop::from_config(&cfg, SignalSource::Live, None);
    assert!(looper.bindings().is_empty());
    assert_eq!(looper.state(), LoopState::Running, "rendering continues");
}

#[test]
fn reading_events_carry_the_published_value() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    let rx = looper.events().subscribe(EventKind::READING);
    let buf = SampleBuffer::new(8);
    let input = TickInput {
        pressed: vec![Action::Up],
        ..Default::default()
    };
    looper.tick(&input, &buf, None, canvas());
    let event = rx.try_recv().unwrap();
    assert_eq!(event.value, Some(1.0));
}

#[test]
fn replay_ticks_emit_replay_events_only() {
    let mut looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Replay, None);
    let readings = looper.events().subscribe(EventKind::READING);
    let replays = looper.events().subscribe(EventKind::REPLAY_SAMPLE);
    let mut buf = SampleBuffer::new(8);
    buf.push(0.0, 3.0);
    looper.tick(&TickInput::default(), &buf, None, canvas());
    assert!(readings.try_recv().is_err());
    assert_eq!(replays.try_recv().unwrap().value, Some(3.0));
}

#[test]
fn event_filter_is_an_or_mask() {
    let looper = AnimationLoop::from_config(&ranktrace_config(), SignalSource::Live, None);
    let events = looper.events();
    let all = events.subscribe(EventKind::ALL);
    let none = events.subscribe(EventKind::READING);
    events.emit(ranktrace::TraceEvent::kind(EventKind::PAUSE));
    assert!(all.try_recv().is_ok());
    assert!(none.try_recv().is_err());
}

#[test]
fn event_kind_display_joins_names() {
    let kinds = EventKind::PAUSE | EventKind::RESUME;
    assert_eq!(kinds.to_string(), "PAUSE|RESUME");
    assert_eq!(EventKind::ALL.to_string(), "ALL");
    assert_eq!(EventKind(0).to_string(), "EMPTY");
}
