use std::io::Read;

use tracing::trace;

use crate::decode::{read_preamble, GlyphRecords};
use crate::reader::ByteReader;
use crate::{Error, Glyph};

/// Running estimate of a typical letter width, used as the advance of
/// zero-width glyphs under [`AdvancePolicy::Proportional`](crate::AdvancePolicy::Proportional).
///
/// After every letter glyph the estimate is recomputed as
/// `floor(2 * total_width / (3 * count))` with integer arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidthEstimator {
    total_width: u32,
    count: u32,
    average_width: i32,
}

impl WidthEstimator {
    /// An estimator that has seen no letters; its average is 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one glyph. Only `A-Z` and `a-z` contribute.
    pub fn observe(&mut self, glyph: &Glyph) {
        if !glyph.is_letter() {
            return;
        }
        self.total_width += u32::from(glyph.width);
        self.count += 1;
        self.average_width = i32::try_from((self.total_width * 2) / (self.count * 3)).unwrap_or(i32::MAX);
        trace!(encoding = glyph.encoding, average = self.average_width, "letter width");
    }

    /// The current estimate.
    #[must_use]
    pub fn average_width(&self) -> i32 {
        self.average_width
    }

    /// Number of letter glyphs seen so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Analysis pass: decodes `source` glyph by glyph, feeding every record to the estimator.
    ///
    /// On error the estimator keeps whatever the records before the failure contributed.
    pub fn analyze<R: Read>(&mut self, source: R) -> Result<(), Error> {
        let mut reader = ByteReader::new(source);
        let font = read_preamble(&mut reader)?;
        for glyph in GlyphRecords::new(&mut reader, font.header.glyph_count) {
            self.observe(&glyph?);
        }
        Ok(())
    }
}
