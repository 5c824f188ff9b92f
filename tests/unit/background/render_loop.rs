use super::*;
use crate::config::options::WaveOptions;
use crate::render::recording::{DrawCall, RecordingSurface};

fn slow_config(opacity: f64) -> AnimationConfig {
    WaveOptions {
        speed: Some(SpeedTier::Slow),
        wave_opacity: Some(opacity),
        ..WaveOptions::default()
    }
    .resolve()
    .unwrap()
}

#[test]
fn time_cursor_advances_by_fixed_increments() {
    let mut t = TimeCursor::new();
    let mut prev = t.value();
    for i in 1..=100 {
        let v = t.advance(SpeedTier::Slow);
        assert!(v >= prev);
        assert!((v - prev - 0.001).abs() < 1e-12);
        assert!((v - 0.001 * f64::from(i)).abs() < 1e-9);
        prev = v;
    }

    let mut t = TimeCursor::new();
    assert_eq!(t.advance(SpeedTier::Fast), 0.002);
}

#[test]
fn single_frame_matches_configuration() {
    let cfg = slow_config(0.3);
    let noise = NoiseField::new(11);
    let mut canvas = RecordingSurface::new();
    let size = ViewportSize::new(103, 60);
    let mut time = TimeCursor::new();

    let stats = paint_frame(&mut canvas, size, &cfg, &noise, &mut time);
    assert_eq!(stats.strokes, 5);
    assert_eq!(stats.points_per_stroke, 21);
    assert_eq!(time.value(), 0.001);

    let fills: Vec<&DrawCall> = canvas.fills().collect();
    assert_eq!(fills.len(), 1);
    let DrawCall::FillRect { rect, alpha, color, .. } = fills[0] else {
        unreachable!()
    };
    assert_eq!(*alpha, 0.3);
    assert_eq!(*rect, size.bounds());
    assert_eq!(*color, cfg.background_fill.to_rgba8());

    let strokes: Vec<&DrawCall> = canvas.strokes().collect();
    assert_eq!(strokes.len(), 5);
    for (lane, s) in strokes.iter().enumerate() {
        let DrawCall::Stroke {
            points,
            width,
            color,
            alpha,
            ..
        } = s
        else {
            unreachable!()
        };
        assert_eq!(*width, 50.0);
        assert_eq!(*alpha, 0.3);
        assert_eq!(*color, cfg.lane_color(lane).to_rgba8());
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let expected: Vec<f64> = (0..103).step_by(5).map(f64::from).collect();
        assert_eq!(xs, expected);
    }
}

#[test]
fn fill_comes_before_strokes() {
    let cfg = slow_config(0.5);
    let noise = NoiseField::new(1);
    let mut canvas = RecordingSurface::new();
    let mut time = TimeCursor::new();
    paint_frame(
        &mut canvas,
        ViewportSize::new(20, 20),
        &cfg,
        &noise,
        &mut time,
    );
    assert!(matches!(canvas.calls()[0], DrawCall::FillRect { .. }));
    assert!(
        canvas.calls()[1..]
            .iter()
            .all(|c| matches!(c, DrawCall::Stroke { .. }))
    );
}

#[test]
fn palette_shorter_than_wave_count_cycles() {
    let cfg = WaveOptions {
        colors: Some(vec!["#ff0000".parse().unwrap(), "#00ff00".parse().unwrap()]),
        ..WaveOptions::default()
    }
    .resolve()
    .unwrap();
    let noise = NoiseField::new(1);
    let mut canvas = RecordingSurface::new();
    let mut time = TimeCursor::new();
    paint_frame(
        &mut canvas,
        ViewportSize::new(10, 10),
        &cfg,
        &noise,
        &mut time,
    );
    let colors: Vec<_> = canvas
        .strokes()
        .map(|s| match s {
            DrawCall::Stroke { color, .. } => (color.r, color.g),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        colors,
        vec![(255, 0), (0, 255), (255, 0), (0, 255), (255, 0)]
    );
}
