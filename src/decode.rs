//! BMF decoding: header, palette, title and the glyph table.
//!
//! Layout (all single bytes unless noted):
//!
//! | offset | field |
//! |--------|-------|
//! | 0..4   | magic `E1 E6 D5 1A` |
//! | 4      | version, `0x11` or `0x12` |
//! | 5..14  | line height, size over, size under, add space, size inner, used colors, highest color, alpha bits, extra palettes (signed) |
//! | 14..16 | reserved |
//! | 16     | number of palette colors |
//!
//! followed by `3 * colors` palette bytes, a length-prefixed title, a little-endian `u16`
//! glyph count and the glyph records themselves.

use std::io::Read;

use tracing::{debug, trace};

use crate::reader::ByteReader;
use crate::{Error, Font, FontHeader, Glyph, Rgb, Version};

/// Signature at the start of every BMF file.
pub const MAGIC: [u8; 4] = [0xe1, 0xe6, 0xd5, 0x1a];

const HEADER_LEN: usize = 17;

/// Decodes everything up to and including the glyph count.
///
/// The returned font has an empty glyph table; `header.glyph_count` says how many
/// records follow in `reader`.
pub fn read_preamble<R: Read>(reader: &mut ByteReader<R>) -> Result<Font, Error> {
    let block: [u8; HEADER_LEN] = reader.read_array("header")?;

    let magic = [block[0], block[1], block[2], block[3]];
    if magic != MAGIC {
        return Err(Error::BadMagic(magic));
    }
    let version = Version::from_byte(block[4]).ok_or(Error::UnsupportedVersion(block[4]))?;

    let signed = |offset: usize| i8::from_le_bytes([block[offset]]);
    let num_colors = block[16];

    // Source channels are 6 bit; the stretch wraps for out-of-range bytes.
    let palette: Vec<Rgb> = reader
        .read_fixed(usize::from(num_colors) * 3, "palette")?
        .chunks_exact(3)
        .map(|c| -> Rgb { [c[0].wrapping_mul(4), c[1].wrapping_mul(4), c[2].wrapping_mul(4)] })
        .collect();

    let title_len = reader.read_byte("title length")?;
    let title = reader.read_fixed(usize::from(title_len), "title")?;
    let glyph_count = reader.read_le16("glyph count")?;

    let header = FontHeader {
        version,
        line_height: signed(5),
        size_over: signed(6),
        size_under: signed(7),
        add_space: signed(8),
        size_inner: signed(9),
        used_colors: signed(10),
        highest_color: signed(11),
        alpha_bits: signed(12),
        extra_palettes: signed(13),
        reserved: [block[14], block[15]],
        num_colors,
        glyph_count,
    };
    debug!(?version, num_colors, glyph_count, "decoded BMF header");

    Ok(Font {
        header,
        palette,
        title,
        glyphs: Vec::with_capacity(usize::from(glyph_count)),
    })
}

/// Reads one glyph record: encoding byte, five metric bytes, then `width * height` bitmap bytes.
pub fn read_glyph<R: Read>(reader: &mut ByteReader<R>) -> Result<Glyph, Error> {
    let encoding = reader.read_byte("glyph encoding")?;
    let [width, height, rel_x, rel_y, shift_x] = reader.read_array::<5>("glyph metrics")?;

    let size = usize::from(width) * usize::from(height);
    let bitmap = if size > 0 {
        reader.read_fixed(size, "glyph bitmap")?
    } else {
        Vec::new()
    };

    let glyph = Glyph {
        encoding,
        width,
        height,
        rel_x: i8::from_le_bytes([rel_x]),
        rel_y: i8::from_le_bytes([rel_y]),
        shift_x: i8::from_le_bytes([shift_x]),
        bitmap,
    };
    trace!(encoding, width, height, "decoded glyph");
    Ok(glyph)
}

/// Streams the glyph table following a preamble.
///
/// Yields at most `count` records; the first error ends the iteration.
pub struct GlyphRecords<'a, R> {
    reader: &'a mut ByteReader<R>,
    remaining: u16,
}

impl<'a, R: Read> GlyphRecords<'a, R> {
    /// Iterates over the next `count` glyph records of `reader`.
    pub fn new(reader: &'a mut ByteReader<R>, count: u16) -> Self {
        Self { reader, remaining: count }
    }
}

impl<R: Read> Iterator for GlyphRecords<'_, R> {
    type Item = Result<Glyph, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let glyph = read_glyph(self.reader);
        self.remaining = if glyph.is_ok() { self.remaining - 1 } else { 0 };
        Some(glyph)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(self.remaining)))
    }
}

impl Font {
    /// Decodes a complete font. Either the whole glyph table is read or an error is returned.
    ///
    /// The unicode/kerning section that 1.2 files carry after the glyph table is left unread.
    pub fn decode<R: Read>(source: R) -> Result<Font, Error> {
        let mut reader = ByteReader::new(source);
        let mut font = read_preamble(&mut reader)?;

        for glyph in GlyphRecords::new(&mut reader, font.header.glyph_count) {
            font.glyphs.push(glyph?);
        }

        if font.header.version == Version::V1_2 {
            debug!("ignoring unicode/kerning section of a 1.2 file");
        }
        Ok(font)
    }

    /// Decodes a font held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Font, Error> {
        Font::decode(bytes)
    }
}
