mod common;

use std::io::Write;

use bmf_fonts::{convert_bytes, convert_file, convert_with, AdvancePolicy, ConvertOptions, Error};
use common::{glyph, sample_font, BmfBuilder};
use pretty_assertions::assert_eq;

const PROPORTIONAL: ConvertOptions = ConvertOptions { advance: AdvancePolicy::Proportional, extra_space: false };

fn convert_to_string(bytes: &[u8], options: ConvertOptions) -> String {
    let mut out = Vec::new();
    convert_bytes(bytes, options, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn dwidths(bdf: &str) -> Vec<&str> {
    bdf.lines().filter(|line| line.starts_with("DWIDTH")).collect()
}

#[test]
fn converts_sample_font() {
    let bdf = convert_to_string(&sample_font().build(), ConvertOptions::default());

    let expected = "\
STARTFONT 2.1
FONT \"Sample\"
SIZE 16 75 75
FONTBOUNDINGBOX 16 16 0 0
STARTPROPERTIES 3
COPYRIGHT \"http://bmf.php5.cz\"
FONT_ASCENT 0
FONT_DESCENT 0
ENDPROPERTIES
CHARS 3
STARTCHAR 32
ENCODING 32
DWIDTH 5 0
BBX 0 0 0 -10
BITMAP
ENDCHAR
STARTCHAR 65
ENCODING 65
DWIDTH 12 0
BBX 10 1 0 -10
BITMAP
8040
ENDCHAR
STARTCHAR 66
ENCODING 66
DWIDTH 10 0
BBX 8 2 1 -12
BITMAP
f0
0f
ENDCHAR
ENDFONT
";
    assert_eq!(bdf, expected);
}

#[test]
fn proportional_space_uses_average_from_analysis() {
    // The space comes first, before any letter, yet gets the average of A and B.
    let bdf = convert_to_string(&sample_font().build(), PROPORTIONAL);
    assert_eq!(dwidths(&bdf), vec!["DWIDTH 7 0", "DWIDTH 11 0", "DWIDTH 10 0"]);

    let extra = ConvertOptions { extra_space: true, ..PROPORTIONAL };
    let bdf = convert_to_string(&sample_font().build(), extra);
    assert_eq!(dwidths(&bdf), vec!["DWIDTH 8 0", "DWIDTH 12 0", "DWIDTH 11 0"]);
}

#[test]
fn proportional_without_letters_uses_zero_average() {
    let bmf = BmfBuilder::new("digits")
        .glyph(glyph(b' ', 0, 0, 2, 0, 4, &[]))
        .glyph(glyph(b'1', 3, 1, 0, 0, 4, &[1, 1, 1]))
        .build();
    let bdf = convert_to_string(&bmf, PROPORTIONAL);
    assert_eq!(dwidths(&bdf), vec!["DWIDTH 3 0", "DWIDTH 4 0"]);
}

#[test]
fn extra_space_applies_to_default_policy() {
    let extra = ConvertOptions { extra_space: true, ..ConvertOptions::default() };
    let bdf = convert_to_string(&sample_font().build(), extra);
    assert_eq!(dwidths(&bdf), vec!["DWIDTH 6 0", "DWIDTH 13 0", "DWIDTH 11 0"]);
}

#[test]
fn duplicate_and_non_letter_encodings_are_all_emitted() {
    let bmf = BmfBuilder::new("dups")
        .glyph(glyph(b'a', 1, 1, 0, 0, 2, &[1]))
        .glyph(glyph(b'a', 1, 1, 0, 0, 3, &[0]))
        .glyph(glyph(0xff, 0, 0, 0, 0, 2, &[]))
        .build();
    let bdf = convert_to_string(&bmf, ConvertOptions::default());

    assert!(bdf.contains("\nCHARS 3\n"));
    assert_eq!(bdf.matches("STARTCHAR 97\n").count(), 2);
    assert!(bdf.contains("STARTCHAR 255\nENCODING 255\n"));
    assert_eq!(bdf.matches("ENDCHAR\n").count(), 3);
}

#[test]
fn version_1_2_decodes_like_1_1() {
    let mut v12 = sample_font();
    v12.version = 0x12;
    let mut bytes = v12.build();
    // trailing unicode/kerning section is ignored
    bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);

    assert_eq!(
        convert_to_string(&bytes, ConvertOptions::default()),
        convert_to_string(&sample_font().build(), ConvertOptions::default())
    );
}

#[test]
fn rejected_input_writes_nothing() {
    let mut bad_magic = sample_font().build();
    bad_magic[1] = 0;
    let mut bad_version = sample_font().build();
    bad_version[4] = 0x10;

    for bytes in [bad_magic, bad_version] {
        let mut out = Vec::new();
        let err = convert_bytes(&bytes, ConvertOptions::default(), &mut out).unwrap_err();
        assert!(err.is_format_error(), "{err}");
        assert!(out.is_empty());
    }
}

#[test]
fn truncated_input_writes_nothing() {
    let full = sample_font().build();
    for len in [0, 3, 16, 20, full.len() - 1] {
        let mut out = Vec::new();
        let err = convert_bytes(&full[..len], ConvertOptions::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }), "len {len}: {err}");
        assert!(out.is_empty(), "len {len}");
    }
}

#[test]
fn failed_analysis_still_attempts_emission() {
    let full = sample_font().build();
    let mut opened = 0;
    let mut out = Vec::new();
    let font = convert_with(
        || {
            opened += 1;
            if opened == 1 {
                Ok(&full[..20])
            } else {
                Ok(&full[..])
            }
        },
        PROPORTIONAL,
        &mut out,
    )
    .unwrap();

    assert_eq!(opened, 2);
    assert_eq!(font.glyphs.len(), 3);
    // analysis never reached a letter, so the space falls back to a zero average
    let bdf = String::from_utf8(out).unwrap();
    assert_eq!(dwidths(&bdf)[0], "DWIDTH 1 0");
}

#[test]
fn conversion_is_repeatable() {
    let bytes = sample_font().build();
    let first = convert_to_string(&bytes, PROPORTIONAL);
    let second = convert_to_string(&bytes, PROPORTIONAL);
    assert_eq!(first, second);
}

#[test]
fn converts_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&sample_font().build()).unwrap();

    let mut from_file = Vec::new();
    let font = convert_file(file.path(), ConvertOptions::default(), &mut from_file).unwrap();
    assert_eq!(font.title(), b"Sample");
    assert_eq!(String::from_utf8(from_file).unwrap(), convert_to_string(&sample_font().build(), ConvertOptions::default()));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = convert_file(dir.path().join("absent.bmf"), ConvertOptions::default(), Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
