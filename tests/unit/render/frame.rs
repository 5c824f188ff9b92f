use super::*;

#[test]
fn transparent_frame_is_zeroed() {
    let f = FrameRGBA::transparent(ViewportSize::new(3, 2));
    assert_eq!(f.data.len(), 24);
    assert!(f.data.iter().all(|&b| b == 0));
    assert!(f.premultiplied);
}

#[test]
fn straight_input_is_premultiplied_and_recovered() {
    let f = FrameRGBA::from_straight_rgba8(2, 1, vec![200, 100, 50, 255, 200, 100, 50, 128])
        .unwrap();
    assert_eq!(f.pixel(0, 0), Some([200, 100, 50, 255]));
    assert_eq!(f.pixel(1, 0), Some([100, 50, 25, 128]));

    let back = f.to_straight_rgba8();
    assert_eq!(&back[..4], &[200, 100, 50, 255]);
    assert!((i32::from(back[4]) - 200).abs() <= 2);
    assert!((i32::from(back[5]) - 100).abs() <= 2);
}

#[test]
fn wrong_length_is_rejected() {
    let err = FrameRGBA::from_straight_rgba8(2, 2, vec![0; 4]).unwrap_err();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let f = FrameRGBA::transparent(ViewportSize::new(2, 2));
    assert!(f.pixel(2, 0).is_none());
    assert!(f.pixel(0, 2).is_none());
}

#[test]
fn fully_transparent_input_drops_color() {
    let f = FrameRGBA::from_straight_rgba8(1, 1, vec![255, 128, 7, 0]).unwrap();
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 0]));
}
