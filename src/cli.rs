use std::path::{Path, PathBuf};

use clap::Parser;
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::{AdvancePolicy, ConvertOptions, Font};

const MAX_PREVIEW_WIDTH: i64 = 16384;
const MAX_PADDING: i64 = 1024;

/// Command line of the `bmf2bdf` tool.
#[derive(Parser, Debug)]
#[command(name = "bmf2bdf", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the BMF file to convert; the BDF text goes to stdout
    pub bmf_path: Option<PathBuf>,
    /// Ignore the BMF shift value and recompute advances from glyph widths (creates a proportional font)
    #[arg(short, long)]
    pub proportional: bool,
    /// Add one pixel of extra space after each glyph (increases DWIDTH by one)
    #[arg(short = 'x', long)]
    pub extra_space: bool,
    /// Also write the decoded font to this path as ron, json or rkyv, chosen by extension
    #[arg(long)]
    pub meta: Option<PathBuf>,
    /// Also render every glyph, in palette colors, into an image at this path
    #[arg(long)]
    pub preview: Option<PathBuf>,
    /// Width of the preview image in pixels
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..=MAX_PREVIEW_WIDTH))]
    pub preview_width: u32,
    /// Number of pixels between glyphs in the preview image
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(..=MAX_PADDING))]
    pub padding: u32,
}

impl Args {
    /// Conversion settings selected by the flags.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            advance: if self.proportional { AdvancePolicy::Proportional } else { AdvancePolicy::Shift },
            extra_space: self.extra_space,
        }
    }
}

/// Failures while writing the optional metadata and preview files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing the file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// RON serialization failed.
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// rkyv serialization failed.
    #[error("rkyv error: {0}")]
    Rkyv(String),

    /// Encoding or saving the preview image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The metadata path has no supported extension.
    #[error("cannot deduce metadata format from {0:?}; supported formats are ron, json, rkyv")]
    UnknownFormat(PathBuf),
}

/// Serializes the decoded font, picking the format from the extension of `path`.
pub fn write_metadata(font: &Font, path: &Path) -> Result<(), ExportError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => {
            let serialized = ron::ser::to_string_pretty(font, ron::ser::PrettyConfig::default())?;
            std::fs::write(path, serialized)?;
        }
        Some("json") => {
            let serialized = serde_json::to_string(font)?;
            std::fs::write(path, serialized)?;
        }
        Some("rkyv") => {
            let serialized = rkyv::to_bytes::<_, 4096>(font).map_err(|e| ExportError::Rkyv(format!("{e:?}")))?;
            std::fs::write(path, serialized.as_slice())?;
        }
        _ => return Err(ExportError::UnknownFormat(path.to_owned())),
    }
    Ok(())
}

/// Renders every glyph into one sheet, left to right, wrapping into rows.
///
/// Pixels take their palette color; transparent pixels and the padding stay fully transparent.
/// Indices with no palette entry are drawn white.
#[must_use]
pub fn font_to_image(font: &Font, sheet_width: u32, padding: u32) -> RgbaImage {
    let mut placements = Vec::with_capacity(font.glyphs.len());
    let mut next_x: u32 = 0;
    let mut next_y: u32 = 0;
    let mut next_y_adv = 0;
    let mut used_width = sheet_width;

    for glyph in &font.glyphs {
        let padded_w = u32::from(glyph.width).saturating_add(padding.saturating_mul(2));
        let padded_h = u32::from(glyph.height).saturating_add(padding.saturating_mul(2));

        if next_x > 0 && next_x.saturating_add(padded_w) > sheet_width {
            next_x = 0;
            next_y = next_y.saturating_add(next_y_adv);
            next_y_adv = 0;
        }

        next_y_adv = u32::max(next_y_adv, padded_h);
        used_width = u32::max(used_width, next_x.saturating_add(padded_w));
        placements.push((next_x.saturating_add(padding), next_y.saturating_add(padding)));
        next_x = next_x.saturating_add(padded_w);
    }

    let sheet_height = u32::max(next_y.saturating_add(next_y_adv), 1);
    let mut outbuf = RgbaImage::new(u32::max(used_width, 1), sheet_height);

    for (glyph, &(left, top)) in font.glyphs.iter().zip(&placements) {
        for y in 0..glyph.height {
            for x in 0..glyph.width {
                let index = glyph.color_index(usize::from(x), usize::from(y));
                if index == 0 {
                    continue;
                }
                let [r, g, b] = font.color(index).unwrap_or([255; 3]);
                outbuf.put_pixel(left + u32::from(x), top + u32::from(y), Rgba([r, g, b, 255]));
            }
        }
    }

    outbuf
}

/// Renders the preview sheet and saves it; the image format follows the extension of `path`.
pub fn write_preview(font: &Font, path: &Path, sheet_width: u32, padding: u32) -> Result<(), ExportError> {
    font_to_image(font, sheet_width, padding).save(path)?;
    Ok(())
}
