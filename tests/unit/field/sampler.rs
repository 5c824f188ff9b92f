use super::*;
use kurbo::PathEl;

#[test]
fn lane_offsets_are_exact_multiples() {
    for lane in 0..5 {
        assert_eq!(WaveSampler::lane_offset(lane), 0.3 * lane as f64);
    }
}

#[test]
fn coordinate_scales_x_and_carries_time() {
    let noise = NoiseField::new(1);
    let s = WaveSampler::new(&noise, 0.25);
    assert_eq!(s.coordinate(2, 400.0), [0.5, 0.3 * 2.0, 0.25]);
    assert_eq!(s.time(), 0.25);
}

#[test]
fn lanes_never_share_a_coordinate() {
    let noise = NoiseField::new(9);
    let s = WaveSampler::new(&noise, 0.01);
    for x in columns(200) {
        let coords: Vec<[f64; 3]> = (0..5).map(|i| s.coordinate(i, f64::from(x))).collect();
        for a in 0..coords.len() {
            for b in (a + 1)..coords.len() {
                assert_ne!(coords[a], coords[b]);
            }
        }
    }
}

#[test]
fn lanes_diverge_somewhere_along_the_width() {
    let noise = NoiseField::new(9);
    let s = WaveSampler::new(&noise, 0.01);
    for lane in 1..5 {
        let diverges = columns(400)
            .any(|x| (s.displacement(0, f64::from(x)) - s.displacement(lane, f64::from(x))).abs() > 1e-6);
        assert!(diverges, "lane {lane} matches lane 0 everywhere");
    }
}

#[test]
fn points_stay_within_the_band_around_the_center() {
    let noise = NoiseField::new(5);
    let s = WaveSampler::new(&noise, 3.0);
    for x in columns(300) {
        let p = s.point(1, f64::from(x), 200);
        assert!((p.y - 100.0).abs() <= AMPLITUDE_PX);
        assert_eq!(p.x, f64::from(x));
    }
}

#[test]
fn columns_step_by_five_below_width() {
    assert_eq!(columns(12).collect::<Vec<_>>(), vec![0, 5, 10]);
    assert_eq!(columns(10).collect::<Vec<_>>(), vec![0, 5]);
    assert_eq!(columns(0).count(), 0);
}

#[test]
fn lane_path_has_one_vertex_per_column() {
    let noise = NoiseField::new(5);
    let s = WaveSampler::new(&noise, 0.0);
    let path = s.lane_path(0, ViewportSize::new(100, 50));
    let els: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(els.len(), 20);
    assert!(matches!(els[0], PathEl::MoveTo(_)));
    assert!(els[1..].iter().all(|e| matches!(e, PathEl::LineTo(_))));
}
