use crate::{
    foundation::{
        core::{Canvas, Point, Rect, Rgba8, ScaleAbout},
        error::{EvaError, EvaResult},
    },
    model::title_card::{Palette, TitleCardConfig, TitleElement},
    text::engine::{FontRole, TextMeasure, TextStyle},
};

pub const DEFAULT_FRAME_WIDTH: u32 = 1280;
pub const MIN_FRAME_HEIGHT: u32 = 400;
/// Line height of title lines relative to their font size.
pub const TITLE_LEADING: f64 = 0.85;

/// Fractional anchors within the frame.
const TOP_FROM_TOP: f64 = 0.12;
const EPISODE_FROM_BOTTOM: f64 = 0.35;
const BOTTOM_FROM_BOTTOM: f64 = 0.10;

/// Frame width a title card is rendered at. Height follows from the 16:9 aspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpec {
    pub width: u32,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
        }
    }
}

impl FrameSpec {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    /// 16:9 frame, never shorter than [`MIN_FRAME_HEIGHT`].
    pub fn canvas(self) -> Canvas {
        let h = (f64::from(self.width) * 9.0 / 16.0).round() as u32;
        Canvas {
            width: self.width,
            height: h.max(MIN_FRAME_HEIGHT),
        }
    }

    pub fn breakpoint(self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }
}

/// Width classes at which label and title sizes step up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Base,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    pub fn for_width(width: u32) -> Self {
        match width {
            w if w >= 1024 => Self::Lg,
            w if w >= 768 => Self::Md,
            w if w >= 640 => Self::Sm,
            _ => Self::Base,
        }
    }
}

/// Type settings of one element at one breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    pub role: FontRole,
    pub size_px: f32,
    pub weight: f32,
    pub tracking_em: f32,
    /// Line box height in px.
    pub line_height: f64,
    pub uppercase: bool,
}

impl Typography {
    pub fn for_element(element: TitleElement, bp: Breakpoint) -> Self {
        use Breakpoint::*;
        match element {
            TitleElement::Top => {
                let size = match bp {
                    Base | Sm => 48.0,
                    Md => 72.0,
                    Lg => 96.0,
                };
                Self::label(size, f64::from(size), -0.05)
            }
            TitleElement::Episode => {
                let (size, line_height) = match bp {
                    Base | Sm => (24.0, 32.0),
                    Md => (30.0, 36.0),
                    Lg => (36.0, 40.0),
                };
                Self::label(size, line_height, 0.05)
            }
            TitleElement::Bottom => {
                let size = match bp {
                    Base | Sm => 60.0,
                    Md => 96.0,
                    Lg => 160.0,
                };
                Self::label(size, f64::from(size), -0.05)
            }
            TitleElement::Title => {
                let size: f32 = match bp {
                    Base => 60.0,
                    Sm => 72.0,
                    Md => 96.0,
                    Lg => 112.0,
                };
                Self {
                    role: FontRole::Serif,
                    size_px: size,
                    weight: 900.0,
                    tracking_em: -0.025,
                    line_height: f64::from(size) * TITLE_LEADING,
                    uppercase: false,
                }
            }
        }
    }

    fn label(size_px: f32, line_height: f64, tracking_em: f32) -> Self {
        Self {
            role: FontRole::Sans,
            size_px,
            weight: 700.0,
            tracking_em,
            line_height,
            uppercase: true,
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle::new(self.role, self.size_px)
            .weight(self.weight)
            .tracking_em(self.tracking_em)
    }
}

/// One positioned line of title-card text.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub element: TitleElement,
    /// Text as painted (labels already uppercased).
    pub text: String,
    pub style: TextStyle,
    /// Unscaled line box in frame coordinates.
    pub line_box: Rect,
    /// Unscaled left end of the baseline.
    pub origin: Point,
    pub transform: ScaleAbout,
    pub color: Rgba8,
}

impl PlacedLine {
    /// Line box after the element's stretch.
    pub fn scaled_box(&self) -> Rect {
        self.transform.apply_rect(self.line_box)
    }
}

/// Geometry of a title card, ready to compile.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleCardLayout {
    pub frame: Canvas,
    pub palette: Palette,
    pub effects_enabled: bool,
    /// Top, episode and bottom labels, in paint order.
    pub labels: Vec<PlacedLine>,
    /// Title lines, top to bottom.
    pub title_lines: Vec<PlacedLine>,
}

impl TitleCardLayout {
    pub fn lines_of(&self, element: TitleElement) -> impl Iterator<Item = &PlacedLine> {
        self.labels
            .iter()
            .chain(self.title_lines.iter())
            .filter(move |l| l.element == element)
    }

    /// Union of the scaled boxes of `element`, if it has any lines.
    pub fn element_bounds(&self, element: TitleElement) -> Option<Rect> {
        self.lines_of(element)
            .map(PlacedLine::scaled_box)
            .reduce(|a, b| a.union(b))
    }
}

/// Position the four text elements of `config` within `frame`.
pub fn layout_title_card(
    config: &TitleCardConfig,
    frame: FrameSpec,
    measure: &mut dyn TextMeasure,
) -> EvaResult<TitleCardLayout> {
    config.validate()?;
    let canvas = frame.canvas();
    if canvas.is_empty() {
        return Err(EvaError::layout("title card frame width must be > 0"));
    }

    let bp = frame.breakpoint();
    let palette = config.theme.palette();
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    let mut labels = Vec::with_capacity(3);
    for element in [TitleElement::Top, TitleElement::Episode, TitleElement::Bottom] {
        let typo = Typography::for_element(element, bp);
        let text = config.text_of(element).to_uppercase();
        let line_height = if text.is_empty() {
            0.0
        } else {
            typo.line_height
        };
        let top = match element {
            TitleElement::Top => h * TOP_FROM_TOP,
            TitleElement::Episode => h * (1.0 - EPISODE_FROM_BOTTOM) - line_height,
            _ => h * (1.0 - BOTTOM_FROM_BOTTOM) - line_height,
        };

        let mut line = place_line(element, text, &typo, top, line_height, w, measure)?;
        line.color = palette.secondary;
        let (sx, sy) = config.scale_factors(element);
        line.transform = ScaleAbout::new(sx, sy, line.line_box.center());
        labels.push(line);
    }

    let typo = Typography::for_element(TitleElement::Title, bp);
    let source_lines = config.title_lines();
    let heights: Vec<f64> = source_lines
        .iter()
        .map(|l| if l.is_empty() { 0.0 } else { typo.line_height })
        .collect();
    let block_height: f64 = heights.iter().sum();
    let (sx, sy) = config.scale_factors(TitleElement::Title);
    let block_center = Point::new(w / 2.0, h / 2.0);

    let mut title_lines = Vec::with_capacity(source_lines.len());
    let mut top = (h - block_height) / 2.0;
    for (text, line_height) in source_lines.into_iter().zip(heights) {
        let mut line = place_line(
            TitleElement::Title,
            text.to_string(),
            &typo,
            top,
            line_height,
            w,
            measure,
        )?;
        line.color = palette.primary;
        line.transform = ScaleAbout::new(sx, sy, block_center);
        title_lines.push(line);
        top += line_height;
    }

    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        ?bp,
        title_lines = title_lines.len(),
        "title card layout"
    );

    Ok(TitleCardLayout {
        frame: canvas,
        palette,
        effects_enabled: config.effects_enabled,
        labels,
        title_lines,
    })
}

/// Center one line horizontally in a box of `line_height` starting at `top`.
fn place_line(
    element: TitleElement,
    text: String,
    typo: &Typography,
    top: f64,
    line_height: f64,
    frame_width: f64,
    measure: &mut dyn TextMeasure,
) -> EvaResult<PlacedLine> {
    let style = typo.text_style();
    let extent = measure.measure(&text, &style)?;
    let left = (frame_width - extent.width) / 2.0;

    // CSS half-leading: the content area sits centered in the line box.
    let half_leading = (line_height - extent.content_height()) / 2.0;
    let baseline = top + half_leading + extent.ascent;

    let line_box = Rect::new(left, top, left + extent.width, top + line_height);
    Ok(PlacedLine {
        element,
        text,
        style,
        line_box,
        origin: Point::new(left, baseline),
        transform: ScaleAbout::default(),
        color: Rgba8::TRANSPARENT,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/title_card.rs"]
mod tests;
