use chart_tempo::animation::{
    AnimationEngine, AnimationEngineConfig, AnimationUnit, GovernorPhase, ManualFrameSource,
};
use chart_tempo::render::{RecordedFrames, RecordingRenderer};

fn build_engine(target_fps: u32) -> (AnimationEngine<ManualFrameSource>, RecordedFrames) {
    let recorder = RecordingRenderer::new();
    let frames = recorder.handle();
    let mut engine = AnimationEngine::new(
        ManualFrameSource::new(),
        AnimationEngineConfig::new(target_fps),
    )
    .expect("engine init");
    engine
        .add_animate(AnimationUnit::new("ticker", recorder))
        .expect("register");
    (engine, frames)
}

/// Delivers `count` host frames at `host_hz`, starting from callback `from`.
fn pump(engine: &mut AnimationEngine<ManualFrameSource>, host_hz: u32, from: u32, count: u32) -> u32 {
    let mut accepted = 0;
    for i in from..from + count {
        let timestamp_ms = f64::from(i) * 1000.0 / f64::from(host_hz);
        if engine.on_frame(timestamp_ms).expect("frame") {
            accepted += 1;
        }
    }
    accepted
}

#[test]
fn thirty_fps_target_on_sixty_hz_host_accepts_about_thirty_per_second() {
    let (mut engine, frames) = build_engine(30);
    engine.start_all();

    pump(&mut engine, 60, 0, 60);
    frames.clear();

    let accepted = pump(&mut engine, 60, 60, 60);
    assert!((28..=32).contains(&accepted), "accepted {accepted}");
    assert_eq!(frames.len() as u32, accepted);

    pump(&mut engine, 60, 120, 60);
    assert_eq!(engine.max_fps(), 60);
    assert!((28..=32).contains(&engine.actual_fps()));
    assert_eq!(engine.governor().phase(), GovernorPhase::Throttling);
}

#[test]
fn units_see_measured_rates_after_first_window() {
    let (mut engine, frames) = build_engine(30);
    engine.start_all();
    pump(&mut engine, 120, 0, 240);

    let last = frames.last().expect("rendered frame");
    assert_eq!(last.max_fps, 120);
    assert_eq!(engine.governor().divisor(), 4);
}

#[test]
fn host_slower_than_target_gets_every_frame_dispatched() {
    let (mut engine, frames) = build_engine(60);
    engine.start_all();

    let accepted = pump(&mut engine, 30, 0, 90);
    assert_eq!(accepted, 90);
    assert_eq!(frames.len(), 90);
    assert_eq!(engine.max_fps(), 30);
}

#[test]
fn matching_host_rate_is_not_throttled() {
    let (mut engine, _) = build_engine(60);
    engine.start_all();
    pump(&mut engine, 60, 0, 60);
    let accepted = pump(&mut engine, 60, 60, 60);
    assert_eq!(accepted, 60);
}

#[test]
fn every_delivered_frame_requests_the_next_one() {
    let (mut engine, _) = build_engine(30);
    engine.start_all();
    pump(&mut engine, 60, 0, 10);
    assert_eq!(engine.source().requested_count(), 11);
    assert!(engine.source().pending().is_some());
}

#[test]
fn half_second_window_still_throttles_to_target() {
    let recorder = RecordingRenderer::new();
    let mut engine = AnimationEngine::new(
        ManualFrameSource::new(),
        AnimationEngineConfig::new(30).with_measurement_window_ms(500.0),
    )
    .expect("engine init");
    engine
        .add_animate(AnimationUnit::new("ticker", recorder))
        .expect("register");
    engine.start_all();

    pump(&mut engine, 60, 0, 60);
    let accepted = pump(&mut engine, 60, 60, 60);
    assert!((28..=32).contains(&accepted), "accepted {accepted}");
    assert_eq!(engine.max_fps(), 60);
    assert_eq!(engine.governor().divisor(), 2);
}
