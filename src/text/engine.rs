use std::{borrow::Cow, collections::HashMap, path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::error::{EvaError, EvaResult};

/// Environment variable naming the sans-serif font file (grid cells and labels).
pub const SANS_FONT_ENV: &str = "EVAGEN_SANS_FONT";
/// Environment variable naming the serif font file (title block).
pub const SERIF_FONT_ENV: &str = "EVAGEN_SERIF_FONT";

/// Typeface slot a text run is set in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    Sans,
    Serif,
}

impl FontRole {
    fn fallback(self) -> Self {
        match self {
            Self::Sans => Self::Serif,
            Self::Serif => Self::Sans,
        }
    }

    fn generic_family(self) -> parley::style::GenericFamily {
        match self {
            Self::Sans => parley::style::GenericFamily::SansSerif,
            Self::Serif => parley::style::GenericFamily::Serif,
        }
    }
}

/// How a single run of text is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub role: FontRole,
    pub size_px: f32,
    /// CSS weight, 100..=1000.
    pub weight: f32,
    /// Extra advance after every glyph, in px.
    pub letter_spacing_px: f32,
}

impl TextStyle {
    pub fn new(role: FontRole, size_px: f32) -> Self {
        Self {
            role,
            size_px,
            weight: 400.0,
            letter_spacing_px: 0.0,
        }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Tracking expressed in em of this style's size.
    pub fn tracking_em(mut self, em: f32) -> Self {
        self.letter_spacing_px = em * self.size_px;
        self
    }
}

/// Measured extent of one line of text; `ascent`/`descent` are both positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtent {
    pub fn content_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Measures single-line text; the seam between layout and the font stack.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, style: &TextStyle) -> EvaResult<TextExtent>;
}

/// Font-free metrics: 0.6em advance per char, 0.8em ascent, 0.2em descent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

impl ApproxMeasure {
    pub const ADVANCE_EM: f64 = 0.6;
    pub const ASCENT_EM: f64 = 0.8;
    pub const DESCENT_EM: f64 = 0.2;
}

impl TextMeasure for ApproxMeasure {
    fn measure(&mut self, text: &str, style: &TextStyle) -> EvaResult<TextExtent> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(EvaError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let size = f64::from(style.size_px);
        let n = text.chars().count() as f64;
        let width = n * (size * Self::ADVANCE_EM + f64::from(style.letter_spacing_px));
        Ok(TextExtent {
            width: width.max(0.0),
            ascent: size * Self::ASCENT_EM,
            descent: size * Self::DESCENT_EM,
        })
    }
}

/// Raw font files per role, loaded up front so renderers never touch the filesystem.
///
/// Installed system fonts back every role unless [`FontBook::system_fonts`] turns them off.
#[derive(Clone, Debug)]
pub struct FontBook {
    fonts: HashMap<FontRole, Arc<Vec<u8>>>,
    system_fonts: bool,
}

impl Default for FontBook {
    fn default() -> Self {
        Self {
            fonts: HashMap::new(),
            system_fonts: true,
        }
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system_fonts(mut self, enabled: bool) -> Self {
        self.system_fonts = enabled;
        self
    }

    pub fn uses_system_fonts(&self) -> bool {
        self.system_fonts
    }

    pub fn with_font(mut self, role: FontRole, bytes: Vec<u8>) -> Self {
        self.fonts.insert(role, Arc::new(bytes));
        self
    }

    pub fn load(self, role: FontRole, path: &Path) -> EvaResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        Ok(self.with_font(role, bytes))
    }

    /// Fill roles not yet set from [`SANS_FONT_ENV`] / [`SERIF_FONT_ENV`].
    pub fn with_env_fallbacks(mut self) -> EvaResult<Self> {
        for (role, var) in [(FontRole::Sans, SANS_FONT_ENV), (FontRole::Serif, SERIF_FONT_ENV)] {
            if self.fonts.contains_key(&role) {
                continue;
            }
            if let Some(path) = std::env::var_os(var).filter(|v| !v.is_empty()) {
                self = self.load(role, Path::new(&path))?;
            }
        }
        Ok(self)
    }

    pub fn get(&self, role: FontRole) -> Option<&Arc<Vec<u8>>> {
        self.fonts.get(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// A shaped single line; each glyph run carries the font its glyph ids index into.
pub struct ShapedText {
    pub layout: parley::Layout<()>,
    pub extent: TextExtent,
    /// Baseline of the first line, measured down from the layout top.
    pub baseline: f64,
}

/// Stateful helper for shaping text with Parley.
///
/// A role resolves to its registered family first, then to the generic `sans-serif` or
/// `serif` family, then to the other role's registered family. Generic families and
/// per-glyph fallback come from the system font collection when it is enabled.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: HashMap<FontRole, String>,
    system_fonts: bool,
    warned_missing_font: bool,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct an engine backed by the system font collection.
    pub fn new() -> Self {
        Self::with_system_fonts(true)
    }

    /// Construct an engine with no registered fonts; `enabled` toggles system font discovery.
    pub fn with_system_fonts(enabled: bool) -> Self {
        let collection =
            parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                system_fonts: enabled,
                ..Default::default()
            });
        Self {
            font_ctx: parley::FontContext {
                collection,
                source_cache: parley::fontique::SourceCache::default(),
            },
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
            system_fonts: enabled,
            warned_missing_font: false,
        }
    }

    /// Construct an engine with every font in `book` registered.
    pub fn with_fonts(book: &FontBook) -> EvaResult<Self> {
        let mut engine = Self::with_system_fonts(book.uses_system_fonts());
        for role in [FontRole::Sans, FontRole::Serif] {
            if let Some(bytes) = book.get(role) {
                engine.register_font(role, bytes.as_slice())?;
            }
        }
        Ok(engine)
    }

    /// Register font bytes for `role`; returns the detected family name.
    pub fn register_font(&mut self, role: FontRole, font_bytes: &[u8]) -> EvaResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            EvaError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| EvaError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(?role, family = %family_name, "registered font");
        self.families.insert(role, family_name.clone());
        Ok(family_name)
    }

    /// Registered family serving `role`, after fallback to the other role.
    pub fn family_name(&self, role: FontRole) -> Option<&str> {
        self.families
            .get(&role)
            .or_else(|| self.families.get(&role.fallback()))
            .map(String::as_str)
    }

    /// Whether any font file was registered.
    pub fn has_fonts(&self) -> bool {
        !self.families.is_empty()
    }

    pub fn uses_system_fonts(&self) -> bool {
        self.system_fonts
    }

    fn font_stack(&self, role: FontRole) -> parley::style::FontStack<'static> {
        use parley::style::FontFamily;

        let named = |role: FontRole| {
            self.families
                .get(&role)
                .map(|family| FontFamily::Named(Cow::Owned(family.clone())))
        };
        let families: Vec<FontFamily<'static>> = named(role)
            .into_iter()
            .chain(std::iter::once(FontFamily::Generic(role.generic_family())))
            .chain(named(role.fallback()))
            .collect();
        parley::style::FontStack::List(Cow::Owned(families))
    }

    /// Shape one line of text. `Ok(None)` when no font resolves for any of its characters.
    pub fn shape(&mut self, text: &str, style: &TextStyle) -> EvaResult<Option<ShapedText>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(EvaError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let stack = self.font_stack(style.role);
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(stack));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(style.weight),
        ));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            style.letter_spacing_px,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        if !text.is_empty() && !has_glyph_runs(&layout) {
            if !self.warned_missing_font {
                tracing::warn!(
                    system_fonts = self.system_fonts,
                    "no font resolved; text will not be painted"
                );
                self.warned_missing_font = true;
            }
            return Ok(None);
        }

        let (extent, baseline) = match layout.lines().next() {
            Some(line) => {
                let m = line.metrics();
                let extent = TextExtent {
                    width: f64::from(layout.width()),
                    ascent: f64::from(m.ascent),
                    descent: f64::from(m.descent),
                };
                (extent, f64::from(m.baseline))
            }
            None => {
                let extent = ApproxMeasure.measure("", style)?;
                (extent, extent.ascent)
            }
        };

        Ok(Some(ShapedText {
            layout,
            extent,
            baseline,
        }))
    }
}

fn has_glyph_runs(layout: &parley::Layout<()>) -> bool {
    layout.lines().any(|line| {
        line.items()
            .any(|item| matches!(item, parley::layout::PositionedLayoutItem::GlyphRun(_)))
    })
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, style: &TextStyle) -> EvaResult<TextExtent> {
        match self.shape(text, style)? {
            Some(shaped) => Ok(shaped.extent),
            None => ApproxMeasure.measure(text, style),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
