use super::*;

fn blurred(src: &[u8], w: u32, h: u32, radius_px: f64) -> Vec<u8> {
    let kernel = BlurKernel::for_css_radius(radius_px).unwrap();
    let mut out = src.to_vec();
    let mut scratch = Vec::new();
    blur_in_place(&mut out, &mut scratch, w, h, &kernel);
    out
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    assert_eq!(blurred(&src, w, h, 2.0), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blurred(&src, w, h, 1.0);

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    assert!(out[center + 3] < 255);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8, "{sum_a}");
}

#[test]
fn scratch_buffer_is_reused_across_sizes() {
    let kernel = BlurKernel::for_css_radius(1.0).unwrap();
    let mut scratch = Vec::new();

    let mut big = vec![0u8; 8 * 8 * 4];
    blur_in_place(&mut big, &mut scratch, 8, 8, &kernel);
    let mut small = [7u8, 7, 7, 7].repeat(2 * 2);
    blur_in_place(&mut small, &mut scratch, 2, 2, &kernel);
    assert!(small.iter().all(|&b| b == 7));
}

#[test]
fn empty_buffer_is_left_alone() {
    let kernel = BlurKernel::for_css_radius(3.0).unwrap();
    let mut buf: Vec<u8> = Vec::new();
    let mut scratch = Vec::new();
    blur_in_place(&mut buf, &mut scratch, 0, 0, &kernel);
    assert!(buf.is_empty());
}

#[test]
fn css_radius_maps_to_three_sigma_taps() {
    let k = BlurKernel::for_css_radius(10.0).unwrap();
    assert_eq!(k.radius(), 30);
    assert_eq!(k.weights.iter().map(|&w| u64::from(w)).sum::<u64>(), 1 << 16);

    assert!(BlurKernel::for_css_radius(0.0).is_none());
    assert!(BlurKernel::for_css_radius(f64::NAN).is_none());
}
