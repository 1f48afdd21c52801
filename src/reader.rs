//! Sequential byte reader used by the decoder.

use std::io::{ErrorKind, Read};

use crate::Error;

/// Forward-only cursor over a byte source.
///
/// Every read either yields exactly the requested number of bytes or fails with
/// [`Error::Truncated`], naming the field that was being read.
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read> ByteReader<R> {
    /// Wraps a byte source. Pass a `BufReader` for files; every field is a tiny read.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads exactly `n` bytes.
    pub fn read_fixed(&mut self, n: usize, field: &'static str) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; n];
        self.fill(&mut buf, field)?;
        Ok(buf)
    }

    /// Reads a fixed-size block into an array.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], Error> {
        let mut buf = [0; N];
        self.fill(&mut buf, field)?;
        Ok(buf)
    }

    /// Reads one unsigned byte.
    pub fn read_byte(&mut self, field: &'static str) -> Result<u8, Error> {
        let [b] = self.read_array::<1>(field)?;
        Ok(b)
    }

    /// Reads a little-endian `u16`.
    pub fn read_le16(&mut self, field: &'static str) -> Result<u16, Error> {
        Ok(u16::from_le_bytes(self.read_array(field)?))
    }

    fn fill(&mut self, buf: &mut [u8], field: &'static str) -> Result<(), Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(Error::Truncated {
                        field,
                        needed: buf.len(),
                        available: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fields_in_order() {
        let data = [0x2a, 0x34, 0x12, 1, 2, 3];
        let mut reader = ByteReader::new(&data[..]);

        assert_eq!(reader.read_byte("a").unwrap(), 0x2a);
        assert_eq!(reader.read_le16("b").unwrap(), 0x1234);
        assert_eq!(reader.read_fixed(3, "c").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn short_read_reports_field_and_counts() {
        let data = [1, 2];
        let mut reader = ByteReader::new(&data[..]);

        match reader.read_fixed(5, "bitmap") {
            Err(Error::Truncated { field, needed, available }) => {
                assert_eq!(field, "bitmap");
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn le16_needs_both_bytes() {
        let data = [0xff];
        let mut reader = ByteReader::new(&data[..]);
        assert!(matches!(
            reader.read_le16("glyph count"),
            Err(Error::Truncated { needed: 2, available: 1, .. })
        ));
    }

    #[test]
    fn zero_length_read_succeeds_on_empty_source() {
        let mut reader = ByteReader::new(&[][..]);
        assert!(reader.read_fixed(0, "title").unwrap().is_empty());
    }
}
