use super::*;

fn alpha_at(buf: &[u8], width: u32, x: u32, y: u32) -> u8 {
    buf[((y * width + x) * 4 + 3) as usize]
}

#[test]
fn kernel_sums_to_one_and_is_symmetric() {
    let k = GaussianKernel::new(6, 2.0).unwrap();
    assert_eq!(k.radius(), 6);
    assert_eq!(k.weights().iter().sum::<u32>(), Q16_ONE);
    let w = k.weights();
    for i in 0..w.len() / 2 {
        assert_eq!(w[i], w[w.len() - 1 - i]);
    }
    assert!(w[6] > w[5]);
}

#[test]
fn shadow_kernel_uses_half_blur_as_sigma() {
    assert_eq!(GaussianKernel::for_shadow_blur(4.0).unwrap().radius(), 6);
    assert_eq!(GaussianKernel::for_shadow_blur(0.0).unwrap().radius(), 0);
    assert!(GaussianKernel::for_shadow_blur(-1.0).is_err());
    assert!(GaussianKernel::for_shadow_blur(f32::NAN).is_err());
    assert!(GaussianKernel::new(3, 0.0).is_err());
}

#[test]
fn zero_blur_is_identity() {
    let src = vec![0u8, 0, 0, 128, 10, 20, 30, 255];
    assert_eq!(shadow_blur(&src, 2, 1, 0.0).unwrap(), src);
}

#[test]
fn wrong_buffer_length_is_rejected() {
    assert!(shadow_blur(&[0u8; 7], 2, 1, 4.0).is_err());
}

#[test]
fn single_pixel_spreads_symmetrically() {
    let (w, h) = (21u32, 21u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((10 * w + 10) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = shadow_blur(&src, w, h, 4.0).unwrap();
    let c = alpha_at(&out, w, 10, 10);
    assert!(c > 0 && c < 255);
    assert_eq!(alpha_at(&out, w, 7, 10), alpha_at(&out, w, 13, 10));
    assert_eq!(alpha_at(&out, w, 10, 7), alpha_at(&out, w, 10, 13));
    assert!(alpha_at(&out, w, 9, 10) < c);
    assert_eq!(alpha_at(&out, w, 0, 0), 0);
}

#[test]
fn interior_of_flat_region_is_unchanged() {
    let (w, h) = (40u32, 40u32);
    let src = [7u8, 8, 9, 200].repeat((w * h) as usize);
    let out = shadow_blur(&src, w, h, 4.0).unwrap();
    let at = ((20 * w + 20) * 4) as usize;
    assert_eq!(&out[at..at + 4], &[7, 8, 9, 200]);
}

#[test]
fn edges_fade_to_transparent() {
    let (w, h) = (40u32, 40u32);
    let src = [0u8, 0, 0, 255].repeat((w * h) as usize);
    let out = shadow_blur(&src, w, h, 4.0).unwrap();
    assert!(alpha_at(&out, w, 0, 20) < 255);
    assert!(alpha_at(&out, w, 0, 0) < alpha_at(&out, w, 0, 20));
    assert_eq!(alpha_at(&out, w, 20, 20), 255);
}

#[test]
fn premultiplied_channels_never_exceed_alpha() {
    let (w, h) = (16u32, 16u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for (i, px) in src.chunks_exact_mut(4).enumerate() {
        if i % 3 == 0 {
            px.copy_from_slice(&[200, 100, 50, 200]);
        }
    }
    let out = shadow_blur(&src, w, h, 4.0).unwrap();
    for px in out.chunks_exact(4) {
        assert!(px[0] <= px[3].saturating_add(1));
    }
}
