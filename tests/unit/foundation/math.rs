use super::*;

#[test]
fn fnv_hash_is_stable_across_split_writes() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"evagen");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"eva");
    b.write_bytes(b"gen");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u32(7);
    assert_ne!(c.finish(), Fnv1a64::OFFSET_BASIS);
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u16(255, 255), 255);
}

#[test]
fn snap_clamp_rounds_to_step_and_clamps() {
    assert_eq!(snap_clamp(73.0, 24.0, 200.0, 2.0), 74.0);
    assert_eq!(snap_clamp(71.9, 24.0, 200.0, 2.0), 72.0);
    assert_eq!(snap_clamp(10.0, 24.0, 200.0, 2.0), 24.0);
    assert_eq!(snap_clamp(999.0, 24.0, 200.0, 2.0), 200.0);
    assert_eq!(snap_clamp(f64::NAN, 10.0, 300.0, 1.0), 10.0);
    assert_eq!(snap_clamp(12.5, 0.0, 40.0, 0.0), 12.5);
}
