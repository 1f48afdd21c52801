//! Builds BMF byte streams for tests.

pub const MAGIC: [u8; 4] = [0xe1, 0xe6, 0xd5, 0x1a];

pub struct TestGlyph {
    pub encoding: u8,
    pub width: u8,
    pub height: u8,
    pub rel_x: i8,
    pub rel_y: i8,
    pub shift_x: i8,
    pub bitmap: Vec<u8>,
}

pub fn glyph(encoding: u8, width: u8, height: u8, rel_x: i8, rel_y: i8, shift_x: i8, bitmap: &[u8]) -> TestGlyph {
    assert_eq!(bitmap.len(), usize::from(width) * usize::from(height));
    TestGlyph { encoding, width, height, rel_x, rel_y, shift_x, bitmap: bitmap.to_vec() }
}

pub struct BmfBuilder {
    pub version: u8,
    pub size_over: i8,
    pub add_space: i8,
    pub palette: Vec<[u8; 3]>,
    pub title: Vec<u8>,
    pub glyphs: Vec<TestGlyph>,
}

impl BmfBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            version: 0x11,
            size_over: 10,
            add_space: 1,
            palette: vec![[0, 0, 0], [63, 63, 63]],
            title: title.as_bytes().to_vec(),
            glyphs: Vec::new(),
        }
    }

    pub fn glyph(mut self, glyph: TestGlyph) -> Self {
        self.glyphs.push(glyph);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = MAGIC.to_vec();
        out.push(self.version);
        out.extend_from_slice(&[12, self.size_over as u8, 2, self.add_space as u8, 9, 2, 1, 0, 0, 0, 0]);
        out.push(u8::try_from(self.palette.len()).unwrap());
        for color in &self.palette {
            out.extend_from_slice(color);
        }
        out.push(u8::try_from(self.title.len()).unwrap());
        out.extend_from_slice(&self.title);
        out.extend_from_slice(&u16::try_from(self.glyphs.len()).unwrap().to_le_bytes());
        for g in &self.glyphs {
            out.push(g.encoding);
            out.extend_from_slice(&[g.width, g.height, g.rel_x as u8, g.rel_y as u8, g.shift_x as u8]);
            out.extend_from_slice(&g.bitmap);
        }
        out
    }
}

/// Space, `A` (10 wide) and `B` (8 wide): average letter width 6 after both.
pub fn sample_font() -> BmfBuilder {
    BmfBuilder::new("Sample")
        .glyph(glyph(b' ', 0, 0, 0, 0, 4, &[]))
        .glyph(glyph(b'A', 10, 1, 0, -1, 11, &[1, 0, 0, 0, 0, 0, 0, 0, 0, 1]))
        .glyph(glyph(b'B', 8, 2, 1, 0, 9, &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1]))
}
