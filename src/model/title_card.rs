use crate::foundation::{
    core::Rgba8,
    error::{EvaError, EvaResult},
    math::snap_clamp,
};

/// Input range of the per-field scale controls, in percent: `(min, max, step)`.
pub const SCALE_RANGE: (f64, f64, f64) = (10.0, 300.0, 1.0);

/// Background/foreground pairing of a title card. The tag names background first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Theme {
    /// Black background, white text.
    #[default]
    #[serde(rename = "black-white")]
    BlackWhite,
    /// White background, black text.
    #[serde(rename = "white-black")]
    WhiteBlack,
    /// Black background, red text.
    #[serde(rename = "black-red")]
    BlackRed,
}

/// Colors a theme resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba8,
    /// Title block.
    pub primary: Rgba8,
    /// Top, episode and bottom labels.
    pub secondary: Rgba8,
}

impl Theme {
    pub fn palette(self) -> Palette {
        let (background, foreground) = match self {
            Self::BlackWhite => (Rgba8::BLACK, Rgba8::WHITE),
            Self::WhiteBlack => (Rgba8::WHITE, Rgba8::BLACK),
            Self::BlackRed => (Rgba8::BLACK, Rgba8::RED_600),
        };
        Palette {
            background,
            primary: foreground,
            secondary: foreground,
        }
    }
}

/// The four independently placed text elements of a title card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TitleElement {
    Top,
    Episode,
    Bottom,
    Title,
}

impl TitleElement {
    /// Paint order, back to front.
    pub const PAINT_ORDER: [Self; 4] = [Self::Top, Self::Episode, Self::Bottom, Self::Title];

    /// Extra vertical stretch applied on top of the element's percent scale.
    pub fn vertical_stretch(self) -> f64 {
        match self {
            Self::Top | Self::Bottom => 1.5,
            Self::Episode => 1.25,
            Self::Title => 1.0,
        }
    }
}

/// Complete input of the title-card renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleCardConfig {
    pub top_text: String,
    pub bottom_text: String,
    pub episode_label: String,
    /// Multi-line; every `\n` starts a new stacked line.
    pub title: String,
    pub theme: Theme,
    pub effects_enabled: bool,
    pub top_scale: f64,
    pub bottom_scale: f64,
    pub episode_scale: f64,
    pub title_scale: f64,
}

impl Default for TitleCardConfig {
    fn default() -> Self {
        Self {
            top_text: "NEON GENESIS".to_string(),
            bottom_text: "EVANGELION".to_string(),
            episode_label: "EPISODE:1".to_string(),
            title: "使徒、\n襲来".to_string(),
            theme: Theme::BlackWhite,
            effects_enabled: false,
            top_scale: 100.0,
            bottom_scale: 100.0,
            episode_scale: 100.0,
            title_scale: 100.0,
        }
    }
}

impl TitleCardConfig {
    /// Title split into its stacked lines, in order. A trailing `\r` is dropped per line.
    pub fn title_lines(&self) -> Vec<&str> {
        self.title
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }

    pub fn text_of(&self, element: TitleElement) -> &str {
        match element {
            TitleElement::Top => &self.top_text,
            TitleElement::Episode => &self.episode_label,
            TitleElement::Bottom => &self.bottom_text,
            TitleElement::Title => &self.title,
        }
    }

    pub fn scale_percent(&self, element: TitleElement) -> f64 {
        match element {
            TitleElement::Top => self.top_scale,
            TitleElement::Episode => self.episode_scale,
            TitleElement::Bottom => self.bottom_scale,
            TitleElement::Title => self.title_scale,
        }
    }

    /// `(horizontal, vertical)` stretch for `element`.
    pub fn scale_factors(&self, element: TitleElement) -> (f64, f64) {
        let s = self.scale_percent(element) / 100.0;
        (s, s * element.vertical_stretch())
    }

    pub fn validate(&self) -> EvaResult<()> {
        for element in TitleElement::PAINT_ORDER {
            let pct = self.scale_percent(element);
            if !pct.is_finite() || pct < 0.0 {
                return Err(EvaError::validation(format!(
                    "{element:?} scale must be finite and >= 0 (got {pct})"
                )));
            }
        }
        Ok(())
    }

    /// Snap the four scale fields onto [`SCALE_RANGE`].
    pub fn clamped_to_controls(mut self) -> Self {
        let (min, max, step) = SCALE_RANGE;
        self.top_scale = snap_clamp(self.top_scale, min, max, step);
        self.bottom_scale = snap_clamp(self.bottom_scale, min, max, step);
        self.episode_scale = snap_clamp(self.episode_scale, min, max, step);
        self.title_scale = snap_clamp(self.title_scale, min, max, step);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/title_card.rs"]
mod tests;
