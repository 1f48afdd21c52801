//! Decoder for BMF bitmap fonts and converter to the BDF text format.
//!
//! # Usage
//! ## Converting
//! ```
//! # fn test() -> Result<(), bmf_fonts::Error> {
//! use bmf_fonts::{convert_bytes, ConvertOptions};
//!
//! let mut bmf = vec![0xe1, 0xe6, 0xd5, 0x1a, 0x11];
//! bmf.extend_from_slice(&[8, 7, 1, 1, 7, 1, 1, 0, 0, 0, 0]); // metrics, reserved
//! bmf.extend_from_slice(&[1, 63, 63, 63]); // one palette color
//! bmf.extend_from_slice(&[4, b'D', b'e', b'm', b'o']); // title
//! bmf.extend_from_slice(&[1, 0]); // one glyph
//! bmf.extend_from_slice(&[b'!', 1, 2, 0, 0, 2, 1, 1]);
//!
//! let mut bdf = Vec::new();
//! convert_bytes(&bmf, ConvertOptions::default(), &mut bdf)?;
//! let bdf = String::from_utf8(bdf).unwrap();
//! assert!(bdf.starts_with("STARTFONT 2.1\nFONT \"Demo\"\n"));
//! assert!(bdf.contains("BBX 1 2 0 -9\nBITMAP\n80\n80\nENDCHAR\n"));
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```
//!
//! ## Inspecting
//! ```
//! # fn test() -> Result<(), bmf_fonts::Error> {
//! # let mut bytes = vec![0xe1, 0xe6, 0xd5, 0x1a, 0x11, 8, 7, 1, 1, 7, 1, 1, 0, 0, 0, 0, 1, 63, 63, 63];
//! # bytes.extend_from_slice(&[4, b'D', b'e', b'm', b'o', 1, 0, b'!', 1, 2, 0, 0, 2, 1, 1]);
//! let font = bmf_fonts::Font::from_bytes(&bytes)?;
//! for glyph in &font.glyphs {
//!     println!("{:?}: {}x{}", glyph.encoding as char, glyph.width, glyph.height);
//! }
//! assert_eq!(font.title(), b"Demo");
//! assert_eq!(font.palette, vec![[252, 252, 252]]);
//! # Ok(())
//! # }
//! # test().unwrap();
//! ```
//!
//! A conversion runs two passes over the source: an analysis pass that only
//! estimates the typical letter width, and an emission pass that decodes the whole
//! font before writing any text. Zero-width glyphs under
//! [`AdvancePolicy::Proportional`] take their advance from the analysis result.

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod bdf;
mod bitmap;
pub mod decode;
mod error;
mod font;
pub mod reader;
mod width;

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

pub use bdf::{advance_width, bbx_y_offset, AdvancePolicy, BdfWriter, ConvertOptions};
pub use bitmap::{pack_row, packed_rows, row_bytes};
pub use error::Error;
pub use font::{Font, FontHeader, Glyph, Rgb, Version};
pub use width::WidthEstimator;

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::{font_to_image, write_metadata, write_preview, Args, ExportError};

/// Runs both passes, opening a fresh source for each.
///
/// A failed analysis pass is logged and the emission pass still runs, with whatever
/// average the analysis reached. Nothing is written unless the emission pass decodes
/// the complete glyph table.
pub fn convert_with<R, F, W>(mut open: F, options: ConvertOptions, out: W) -> Result<Font, Error>
where
    R: Read,
    F: FnMut() -> io::Result<R>,
    W: Write,
{
    let mut estimator = WidthEstimator::new();
    if let Err(err) = open().map_err(Error::from).and_then(|source| estimator.analyze(source)) {
        debug!(%err, "analysis pass failed");
    }
    debug!(
        letters = estimator.count(),
        average_width = estimator.average_width(),
        "analysis pass done"
    );

    let font = Font::decode(open()?)?;
    BdfWriter::new(out, options, estimator.average_width()).write_font(&font)?;
    Ok(font)
}

/// Converts a BMF font held in memory.
pub fn convert_bytes<W: Write>(bytes: &[u8], options: ConvertOptions, out: W) -> Result<Font, Error> {
    convert_with(|| Ok(bytes), options, out)
}

/// Converts the BMF file at `path`, reading it once per pass.
pub fn convert_file<P: AsRef<Path>, W: Write>(path: P, options: ConvertOptions, out: W) -> Result<Font, Error> {
    let path = path.as_ref();
    convert_with(|| File::open(path).map(BufReader::new), options, out)
}
