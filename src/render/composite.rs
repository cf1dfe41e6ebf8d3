use crate::foundation::{
    error::{EvaError, EvaResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// `overlay` blend of `src` onto `dst` (W3C compositing, separable), then source-over.
pub fn overlay(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let sa = f32::from(src[3]) / 255.0 * opacity;
    let ba = f32::from(dst[3]) / 255.0;
    let straight = |premul: u8, a: u8| -> f32 {
        if a == 0 {
            0.0
        } else {
            (f32::from(premul) / f32::from(a)).min(1.0)
        }
    };

    let mut out = [0u8; 4];
    let out_a = sa + ba * (1.0 - sa);
    out[3] = to_u8(out_a);
    for i in 0..3 {
        let cs = straight(src[i], src[3]);
        let cb = straight(dst[i], dst[3]);
        let mixed = (1.0 - ba) * cs + ba * overlay_channel(cb, cs);
        out[i] = to_u8(sa * mixed + (1.0 - sa) * ba * cb);
    }
    out
}

fn overlay_channel(cb: f32, cs: f32) -> f32 {
    if cb <= 0.5 {
        2.0 * cb * cs
    } else {
        let t = 2.0 * cb - 1.0;
        cs + t - cs * t
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> EvaResult<()> {
    blend_in_place(dst, src, opacity, over, "over_in_place")
}

pub fn overlay_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> EvaResult<()> {
    blend_in_place(dst, src, opacity, overlay, "overlay_in_place")
}

fn blend_in_place(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    blend: fn(PremulRgba8, PremulRgba8, f32) -> PremulRgba8,
    what: &str,
) -> EvaResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(EvaError::render(format!(
            "{what} expects equal-length rgba8 buffers"
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = blend([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
