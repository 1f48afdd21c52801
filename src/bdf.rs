//! BDF text output.

use std::io::{self, Write};

use tracing::trace;

use crate::bitmap::packed_rows;
use crate::{Error, Font, FontHeader, Glyph};

const COPYRIGHT: &str = "http://bmf.php5.cz";

/// How the horizontal advance (`DWIDTH`) of a glyph is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Use the glyph's stored shift plus the font's `add_space`.
    #[default]
    Shift,
    /// Recompute from the glyph geometry: `width + rel_x + add_space`, with the
    /// estimated letter width standing in for zero-width glyphs.
    Proportional,
}

/// Settings for one conversion, fixed for its whole duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Advance width policy.
    pub advance: AdvancePolicy,
    /// Add one pixel to every advance.
    pub extra_space: bool,
}

/// Advance width of `glyph` under `options`.
///
/// `average_width` only matters for zero-width glyphs under [`AdvancePolicy::Proportional`].
#[must_use]
pub fn advance_width(glyph: &Glyph, add_space: i8, options: ConvertOptions, average_width: i32) -> i32 {
    let add_space = i32::from(add_space);
    let mut dwidth = match options.advance {
        AdvancePolicy::Shift => i32::from(glyph.shift_x) + add_space,
        AdvancePolicy::Proportional if glyph.width == 0 => average_width + i32::from(glyph.rel_x) + add_space,
        AdvancePolicy::Proportional => i32::from(glyph.width) + i32::from(glyph.rel_x) + add_space,
    };
    if options.extra_space {
        dwidth += 1;
    }
    dwidth
}

/// BDF bounding box y offset. BMF measures `rel_y` downwards from the top of
/// `size_over`; BDF measures the box bottom upwards from the baseline.
#[must_use]
pub fn bbx_y_offset(glyph: &Glyph, size_over: i8) -> i32 {
    -(i32::from(size_over) + i32::from(glyph.height) + i32::from(glyph.rel_y))
}

/// Writes BDF text for a decoded font.
pub struct BdfWriter<W> {
    out: W,
    options: ConvertOptions,
    average_width: i32,
}

impl<W: Write> BdfWriter<W> {
    /// `average_width` is the letter width estimate carried over from the analysis pass.
    pub fn new(out: W, options: ConvertOptions, average_width: i32) -> Self {
        Self { out, options, average_width }
    }

    /// Writes the header, every glyph in table order, and the closing `ENDFONT`.
    pub fn write_font(&mut self, font: &Font) -> Result<(), Error> {
        self.write_header(font)?;
        for glyph in &font.glyphs {
            self.write_glyph(&font.header, glyph)?;
        }
        writeln!(self.out, "ENDFONT")?;
        self.out.flush()?;
        Ok(())
    }

    /// Font-wide lines up to and including `CHARS`.
    ///
    /// Size and bounding box are fixed values; `CHARS` is the raw glyph table length.
    pub fn write_header(&mut self, font: &Font) -> io::Result<()> {
        writeln!(self.out, "STARTFONT 2.1")?;
        write!(self.out, "FONT \"")?;
        self.out.write_all(font.title())?;
        writeln!(self.out, "\"")?;
        writeln!(self.out, "SIZE 16 75 75")?;
        writeln!(self.out, "FONTBOUNDINGBOX 16 16 0 0")?;
        writeln!(self.out, "STARTPROPERTIES 3")?;
        writeln!(self.out, "COPYRIGHT \"{COPYRIGHT}\"")?;
        writeln!(self.out, "FONT_ASCENT 0")?;
        writeln!(self.out, "FONT_DESCENT 0")?;
        writeln!(self.out, "ENDPROPERTIES")?;
        writeln!(self.out, "CHARS {}", font.header.glyph_count)
    }

    /// One `STARTCHAR` .. `ENDCHAR` record.
    pub fn write_glyph(&mut self, header: &FontHeader, glyph: &Glyph) -> io::Result<()> {
        let dwidth = advance_width(glyph, header.add_space, self.options, self.average_width);
        trace!(encoding = glyph.encoding, dwidth, "writing glyph");

        writeln!(self.out, "STARTCHAR {}", glyph.encoding)?;
        writeln!(self.out, "ENCODING {}", glyph.encoding)?;
        writeln!(self.out, "DWIDTH {dwidth} 0")?;
        writeln!(
            self.out,
            "BBX {} {} {} {}",
            glyph.width,
            glyph.height,
            glyph.rel_x,
            bbx_y_offset(glyph, header.size_over)
        )?;
        writeln!(self.out, "BITMAP")?;
        for row in packed_rows(glyph) {
            writeln!(self.out, "{row}")?;
        }
        writeln!(self.out, "ENDCHAR")
    }
}
