use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::{
    foundation::error::{EvaError, EvaResult},
    render::backend::RasterImage,
};

/// File name the grid renderer exports to.
pub const GRID_EXPORT_NAME: &str = "eva-text.png";
/// File name the title-card renderer exports to.
pub const TITLE_CARD_EXPORT_NAME: &str = "eva-title.jpg";
/// JPEG quality used for title cards.
pub const TITLE_CARD_JPEG_QUALITY: u8 = 95;

/// Encoded container for an exported image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg { quality: u8 },
}

impl ExportFormat {
    pub fn encode(self, img: &RasterImage) -> EvaResult<Vec<u8>> {
        match self {
            Self::Png => encode_png(img),
            Self::Jpeg { quality } => encode_jpeg(img, quality),
        }
    }
}

fn check_image(img: &RasterImage) -> EvaResult<()> {
    if img.is_empty() {
        return Err(EvaError::encode("cannot encode an empty image"));
    }
    let expected = img.width as usize * img.height as usize * 4;
    if img.data.len() != expected {
        return Err(EvaError::encode(format!(
            "pixel buffer holds {} bytes, expected {expected} for {}x{}",
            img.data.len(),
            img.width,
            img.height
        )));
    }
    Ok(())
}

/// Lossless RGBA PNG.
pub fn encode_png(img: &RasterImage) -> EvaResult<Vec<u8>> {
    check_image(img)?;
    let rgba = img.to_straight_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &rgba,
            img.width,
            img.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| EvaError::encode(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// Baseline RGB JPEG; alpha is flattened over black.
pub fn encode_jpeg(img: &RasterImage, quality: u8) -> EvaResult<Vec<u8>> {
    check_image(img)?;
    let rgb = flatten_over_black(img);
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(
            &rgb,
            img.width,
            img.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| EvaError::encode(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}

fn flatten_over_black(img: &RasterImage) -> Vec<u8> {
    let converted;
    let premul = if img.premultiplied {
        img.data.as_slice()
    } else {
        // Over black, the flattened color is exactly c * a.
        converted = img
            .data
            .chunks_exact(4)
            .flat_map(|px| {
                let a = u16::from(px[3]);
                let m = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
                [m(px[0]), m(px[1]), m(px[2]), px[3]]
            })
            .collect::<Vec<u8>>();
        converted.as_slice()
    };
    premul
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Writes rendered images under fixed names. Failures are logged, never returned.
#[derive(Clone, Debug)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Save the grid image as PNG. `None` when nothing was written.
    pub fn export_grid(&self, image: Option<&RasterImage>) -> Option<PathBuf> {
        self.export(image, GRID_EXPORT_NAME, ExportFormat::Png)
    }

    /// Save the title card as JPEG. `None` when nothing was written.
    pub fn export_title_card(&self, image: Option<&RasterImage>) -> Option<PathBuf> {
        self.export(
            image,
            TITLE_CARD_EXPORT_NAME,
            ExportFormat::Jpeg {
                quality: TITLE_CARD_JPEG_QUALITY,
            },
        )
    }

    fn export(
        &self,
        image: Option<&RasterImage>,
        file_name: &str,
        format: ExportFormat,
    ) -> Option<PathBuf> {
        let Some(image) = image.filter(|img| !img.is_empty()) else {
            tracing::debug!(file_name, "nothing rendered; export skipped");
            return None;
        };

        match self.try_export(image, file_name, format) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported image");
                Some(path)
            }
            Err(err) => {
                tracing::warn!(file_name, error = %err, "export failed");
                None
            }
        }
    }

    fn try_export(
        &self,
        image: &RasterImage,
        file_name: &str,
        format: ExportFormat,
    ) -> EvaResult<PathBuf> {
        let bytes = format.encode(image)?;
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("create output dir '{}'", self.out_dir.display()))?;
        let path = self.out_dir.join(file_name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
