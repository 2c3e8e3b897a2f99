//! Prebuilt units for the chart's standard animations.

use std::cell::Cell;
use std::rc::Rc;

use crate::render::FrameRenderer;

use super::AnimationUnit;

/// Reveals candles left to right, one frame per candle.
///
/// The limit follows `candle_count` on every tick, so candles appended
/// while the reveal runs extend it. The whole reveal is paced to finish in
/// `duration_ms` regardless of the host frame rate; once done the unit keeps
/// presenting the last frame, which a renderer reads as "draw all candles".
#[must_use]
pub fn candle_reveal_unit(
    id: impl Into<String>,
    candle_count: Rc<Cell<usize>>,
    duration_ms: f64,
    renderer: impl FrameRenderer + 'static,
) -> AnimationUnit {
    AnimationUnit::new(id, renderer)
        .with_expected_duration_ms(duration_ms)
        .with_dynamic_total_frames(move || candle_count.get() as u64)
}

/// Typewriter-style loading indicator that loops forever over `text`.
#[must_use]
pub fn loading_text_unit(
    id: impl Into<String>,
    text: &str,
    duration_ms: f64,
    renderer: impl FrameRenderer + 'static,
) -> AnimationUnit {
    AnimationUnit::new(id, renderer)
        .with_expected_duration_ms(duration_ms)
        .with_total_frames(text.chars().count() as u64)
        .with_auto_reset(true)
}

/// Part of `text` visible on `frame` of a [`loading_text_unit`].
#[must_use]
pub fn loading_text_prefix(text: &str, frame: u64) -> &str {
    let char_count = text.chars().count() as u64;
    if char_count == 0 {
        return text;
    }
    let visible = (frame % char_count) as usize;
    match text.char_indices().nth(visible) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{candle_reveal_unit, loading_text_prefix, loading_text_unit};
    use crate::render::RecordingRenderer;

    #[test]
    fn loading_prefix_cycles_through_text() {
        assert_eq!(loading_text_prefix("Loading...", 0), "");
        assert_eq!(loading_text_prefix("Loading...", 4), "Load");
        assert_eq!(loading_text_prefix("Loading...", 10), "");
        assert_eq!(loading_text_prefix("Loading...", 13), "Loa");
        assert_eq!(loading_text_prefix("", 3), "");
        assert_eq!(loading_text_prefix("čaj", 2), "ča");
    }

    #[test]
    fn loading_unit_loops_over_text_length() {
        let recorder = RecordingRenderer::new();
        let frames = recorder.handle();
        let mut unit = loading_text_unit("loading", "abc", 300.0, recorder);
        unit.start(0.0);
        for step in 0..8 {
            unit.tick(f64::from(step) * 100.0, 60, 60).expect("tick");
        }
        assert_eq!(frames.frame_indices(), vec![0, 1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn candle_reveal_follows_growing_candle_count() {
        let count = Rc::new(Cell::new(2));
        let recorder = RecordingRenderer::new();
        let frames = recorder.handle();
        let mut unit = candle_reveal_unit("candles", Rc::clone(&count), 0.0, recorder);
        unit.start(0.0);

        for step in 0..4 {
            unit.tick(f64::from(step), 60, 60).expect("tick");
        }
        assert!(unit.is_done());
        assert_eq!(unit.frame(), 2);

        count.set(5);
        unit.start(10.0);
        for step in 0..7 {
            unit.tick(10.0 + f64::from(step), 60, 60).expect("tick");
        }
        assert_eq!(unit.frame(), 5);
        assert_eq!(
            frames.frame_indices(),
            vec![0, 1, 2, 2, 0, 1, 2, 3, 4, 5, 5]
        );
    }
}
