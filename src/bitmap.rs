use crate::Glyph;

/// Bytes per packed row: one bit per pixel, rows padded to a whole byte.
#[must_use]
pub fn row_bytes(width: u8) -> usize {
    usize::from(width).div_ceil(8)
}

/// Packs one bitmap row, most significant bit first. Pixels past the glyph width are 0.
#[must_use]
pub fn pack_row(glyph: &Glyph, y: usize) -> Vec<u8> {
    (0..row_bytes(glyph.width))
        .map(|byte| {
            (0..8).fold(0u8, |acc, bit| (acc << 1) | u8::from(glyph.pixel(byte * 8 + bit, y)))
        })
        .collect()
}

/// Every row of the glyph as lowercase hex, top to bottom.
pub fn packed_rows(glyph: &Glyph) -> impl Iterator<Item = String> + '_ {
    (0..usize::from(glyph.height)).map(move |y| hex::encode(pack_row(glyph, y)))
}
