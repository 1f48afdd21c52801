/// One palette color, each channel already stretched from `0..=63` to `0..=252`.
pub type Rgb = [u8; 3];

/// BMF format revision. Both revisions share the layout of every field decoded here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub enum Version {
    /// Version byte `0x11`.
    V1_1,
    /// Version byte `0x12`. Adds a unicode/kerning section after the glyph table, which is not decoded.
    V1_2,
}

impl Version {
    /// Maps the raw version byte, if it names a supported revision.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x11 => Some(Version::V1_1),
            0x12 => Some(Version::V1_2),
            _ => None,
        }
    }
}

/// Fixed header fields of a BMF file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct FontHeader {
    /// Format revision.
    pub version: Version,
    /// Distance between baselines.
    pub line_height: i8,
    /// Pixels above the baseline; used to flip glyph offsets into BDF coordinates.
    pub size_over: i8,
    /// Pixels below the baseline.
    pub size_under: i8,
    /// Extra horizontal advance added to every glyph.
    pub add_space: i8,
    /// Inner size of the font.
    pub size_inner: i8,
    /// Number of colors actually used by glyph bitmaps.
    pub used_colors: i8,
    /// Highest palette index used by glyph bitmaps.
    pub highest_color: i8,
    /// Alpha channel depth.
    pub alpha_bits: i8,
    /// Number of additional palettes.
    pub extra_palettes: i8,
    /// Reserved bytes, kept verbatim.
    pub reserved: [u8; 2],
    /// Number of palette entries that follow the header.
    pub num_colors: u8,
    /// Number of glyph records in the table.
    pub glyph_count: u16,
}

/// A single glyph record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct Glyph {
    /// Character code, used verbatim as the BDF glyph name and encoding.
    pub encoding: u8,
    /// Bitmap width in pixels.
    pub width: u8,
    /// Bitmap height in pixels.
    pub height: u8,
    /// Horizontal placement offset.
    pub rel_x: i8,
    /// Vertical placement offset, measured downwards from the top of `size_over`.
    pub rel_y: i8,
    /// Stored advance width.
    pub shift_x: i8,
    /// Row-major palette indices, `width * height` of them. Index 0 is transparent.
    pub bitmap: Vec<u8>,
}

impl Glyph {
    /// Whether the glyph encodes an ASCII letter (`A-Z` or `a-z`).
    #[must_use]
    pub fn is_letter(&self) -> bool {
        self.encoding.is_ascii_alphabetic()
    }

    /// Palette index at `(x, y)`, or 0 for anything outside the bitmap.
    #[must_use]
    pub fn color_index(&self, x: usize, y: usize) -> u8 {
        let (width, height) = (usize::from(self.width), usize::from(self.height));
        if x >= width || y >= height {
            return 0;
        }
        self.bitmap.get(y * width + x).copied().unwrap_or(0)
    }

    /// Whether the pixel at `(x, y)` is set, i.e. not transparent.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.color_index(x, y) != 0
    }
}

/// A decoded BMF font.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serde-deserialize", derive(serde::Deserialize))]
#[cfg_attr(any(feature = "rkyv-serialize", feature = "rkyv-deserialize"), derive(rkyv::Archive))]
#[cfg_attr(feature = "rkyv-serialize", derive(rkyv::Serialize))]
#[cfg_attr(feature = "rkyv-deserialize", derive(rkyv::Deserialize))]
pub struct Font {
    /// Fixed header fields.
    pub header: FontHeader,
    /// Scaled palette, `num_colors` entries.
    pub palette: Vec<Rgb>,
    /// Raw title bytes as stored in the file.
    pub title: Vec<u8>,
    /// Glyph records in file order. Duplicate encodings are kept.
    pub glyphs: Vec<Glyph>,
}

impl Font {
    /// Title bytes up to the first NUL.
    #[must_use]
    pub fn title(&self) -> &[u8] {
        match self.title.iter().position(|&b| b == 0) {
            Some(end) => &self.title[..end],
            None => &self.title,
        }
    }

    /// Color for a bitmap palette index. Index 0 is transparent; index `i` maps to entry `i - 1`.
    #[must_use]
    pub fn color(&self, index: u8) -> Option<Rgb> {
        let entry = usize::from(index).checked_sub(1)?;
        self.palette.get(entry).copied()
    }
}
