use crate::foundation::error::{EvaError, EvaResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Integer raster dimensions of a rendered surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Raster dimensions for a logical (possibly fractional) extent.
    ///
    /// Fractions are truncated toward zero, matching how an HTML canvas takes a fractional
    /// `width`/`height` assignment. Negative or non-finite extents collapse to zero.
    pub fn from_extent(width: f64, height: f64) -> Self {
        fn trunc(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.trunc().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Self {
            width: trunc(width),
            height: trunc(height),
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_len(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Straight-alpha sRGB color, serialized as CSS hex (`#rrggbb` / `#rrggbbaa`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Tailwind `red-600`.
    pub const RED_600: Self = Self::rgb(0xdc, 0x26, 0x26);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`; the leading `#` is optional.
    pub fn parse_hex(s: &str) -> EvaResult<Self> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if !hex.is_ascii() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EvaError::validation(format!("invalid hex color '{raw}'")));
        }

        let byte = |i: usize| -> EvaResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| EvaError::validation(format!("invalid hex color '{raw}': {e}")))
        };
        let nibble = |i: usize| -> EvaResult<u8> {
            let v = u8::from_str_radix(&hex[i..i + 1], 16)
                .map_err(|e| EvaError::validation(format!("invalid hex color '{raw}': {e}")))?;
            Ok(v * 17)
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(EvaError::validation(format!(
                "hex color '{raw}' must have 3, 6 or 8 digits"
            ))),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn premultiplied(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = EvaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = EvaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Non-uniform scale about a fixed pivot, the only transform the renderers need.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleAbout {
    pub scale: Vec2, // default (1,1)
    pub anchor: Point,
}

impl Default for ScaleAbout {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            anchor: Point::ORIGIN,
        }
    }
}

impl ScaleAbout {
    pub fn new(sx: f64, sy: f64, anchor: Point) -> Self {
        Self {
            scale: Vec2::new(sx, sy),
            anchor,
        }
    }

    pub fn to_affine(self) -> Affine {
        let t_anchor = Affine::translate(self.anchor.to_vec2());
        let t_unanchor = Affine::translate(-self.anchor.to_vec2());
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(anchor) * S(scale) * T(-anchor)
        t_anchor * t_scale * t_unanchor
    }

    /// Bounding box of `rect` after the transform.
    pub fn apply_rect(self, rect: Rect) -> Rect {
        self.to_affine().transform_rect_bbox(rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
