use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn overlay_noops() {
    let dst = [10, 20, 30, 255];
    assert_eq!(overlay(dst, [0, 0, 0, 77], 0.0), dst);
    assert_eq!(overlay(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn overlay_with_black_keeps_pure_black_and_white() {
    let shade = [0, 0, 0, 77];
    assert_eq!(overlay([0, 0, 0, 255], shade, 0.2), [0, 0, 0, 255]);
    assert_eq!(overlay([255, 255, 255, 255], shade, 0.2), [255, 255, 255, 255]);
}

#[test]
fn overlay_with_black_darkens_midtones_slightly() {
    let out = overlay([128, 128, 128, 255], [0, 0, 0, 77], 0.2);
    assert!(out[0] < 128 && out[0] > 110, "{out:?}");
    assert_eq!(out[0], out[1]);
    assert_eq!(out[3], 255);
}

#[test]
fn overlay_onto_transparent_is_source() {
    let src = [255, 0, 0, 255];
    assert_eq!(overlay([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn in_place_blends_require_equal_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(overlay_in_place(&mut dst, &[0u8; 4], 1.0).is_err());

    let src = [255u8, 0, 0, 255].repeat(2);
    over_in_place(&mut dst, &src, 1.0).unwrap();
    assert_eq!(dst, src);
}
