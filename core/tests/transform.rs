use folio_scroll_core::{element_progress, ScrollSample, TransformMap};

fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= 1e-9,
        "expected {:.6} got {:.6} (delta {:.6})",
        expected,
        actual,
        delta
    );
}

#[test]
fn fade_hits_control_points_and_clamps() {
    let fade = TransformMap::fade();
    assert_close(fade.map(0.0), 0.3);
    assert_close(fade.map(0.2), 1.0);
    assert_close(fade.map(0.8), 1.0);
    assert_close(fade.map(1.0), 0.3);
    assert_close(fade.map(-1.0), 0.3);
    assert_close(fade.map(2.0), 0.3);
}

#[test]
fn translate_runs_to_negative_amplitude() {
    let translate = TransformMap::translate(50.0).unwrap();
    assert_close(translate.map(0.0), 0.0);
    assert_close(translate.map(0.5), -25.0);
    assert_close(translate.map(1.0), -50.0);
    assert_close(translate.map(1.5), -50.0);
}

#[test]
fn parallax_spans_viewport_entry_to_offset() {
    // element at 2000 on a 900px viewport, offset 50
    let parallax = TransformMap::parallax(2000.0, 900.0, 50.0).unwrap();
    assert_eq!(parallax.domain(), (1100.0, 2050.0));
    assert_close(parallax.map(0.0), 50.0);
    assert_close(parallax.map(1100.0), 50.0);
    assert_close(parallax.map(1575.0), 0.0);
    assert_close(parallax.map(2050.0), -50.0);
    assert_close(parallax.map(9000.0), -50.0);
}

#[test]
fn progress_feeds_fade() {
    let fade = TransformMap::fade();
    // element [1000, 1200) on an 800px viewport: span 1000
    let progress = element_progress(&ScrollSample::new(400.0, 800.0), 1000.0, 200.0);
    assert_close(progress, 0.2);
    assert_close(fade.map(progress), 1.0);
    let progress = element_progress(&ScrollSample::new(5000.0, 800.0), 1000.0, 200.0);
    assert_close(fade.map(progress), 0.3);
}
