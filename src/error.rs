use thiserror::Error;

/// Everything that can go wrong while decoding a BMF file or writing BDF text.
#[derive(Error, Debug)]
pub enum Error {
    /// The first four bytes are not the BMF signature.
    #[error("not a BMF file (magic {0:02x?})")]
    BadMagic([u8; 4]),

    /// The version byte names a revision other than 1.1 or 1.2.
    #[error("unsupported BMF version {0:#04x}")]
    UnsupportedVersion(u8),

    /// The source ended before a field was complete.
    #[error("truncated {field}: needed {needed} bytes, got {available}")]
    Truncated {
        /// The field being read when the input ran out.
        field: &'static str,
        /// Bytes the field requires.
        needed: usize,
        /// Bytes that were actually left.
        available: usize,
    },

    /// Opening the source or writing the output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the input was rejected by the magic/version check, as opposed to running short.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::BadMagic(_) | Error::UnsupportedVersion(_))
    }
}
