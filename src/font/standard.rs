//! Metrics for the built-in PDF base-14 Helvetica faces.
//!
//! Base-14 fonts are never embedded: every conforming reader ships them. Text drawn with
//! them is encoded as WinAnsi (Windows-1252) bytes, so only characters representable in
//! that encoding survive; anything else is drawn (and measured) as `?`.

use crate::units::Pt;

/// The standard faces a document can use without embedding any font data
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

// advance widths at 1000 units/em for WinAnsi 32..=126, straight from the Adobe AFM files
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// WinAnsi 0x80..=0xFF from the same AFM files; codes WinAnsi leaves undefined are 0
#[rustfmt::skip]
const HELVETICA_HIGH: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

const ASCENDER: f32 = 718.0;
const DESCENDER: f32 = -207.0;
/// Baseline-to-baseline distance as a multiple of the font size
const LINE_HEIGHT_FACTOR: f32 = 1.15;

impl StandardFont {
    /// The PostScript name written into the PDF font dictionary
    pub fn base_font(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_ASCII,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_ASCII,
        }
    }

    fn high_widths(&self) -> &'static [u16; 128] {
        match self {
            StandardFont::Helvetica => &HELVETICA_HIGH,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_HIGH,
        }
    }

    /// Advance width of a WinAnsi byte at 1000 units/em
    fn byte_width(&self, byte: u8) -> u16 {
        match byte {
            32..=126 => self.ascii_widths()[(byte - 32) as usize],
            0x80..=0xFF => self.high_widths()[(byte - 0x80) as usize],
            _ => 0,
        }
    }

    /// Advance of a single character at the given size
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        size * (self.byte_width(winansi_byte(ch)) as f32 / 1000.0)
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        size * (ASCENDER / 1000.0)
    }

    pub fn descent(&self, size: Pt) -> Pt {
        size * (DESCENDER / 1000.0)
    }

    pub fn line_height(&self, size: Pt) -> Pt {
        size * LINE_HEIGHT_FACTOR
    }
}

/// Map a character to its Windows-1252 byte, substituting `?` for anything unmappable
pub(crate) fn winansi_byte(ch: char) -> u8 {
    match ch as u32 {
        0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

/// Encode text as a PDF literal string body in WinAnsi, escaping delimiters
pub(crate) fn encode_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match winansi_byte(ch) {
            b @ (b'(' | b')' | b'\\') => {
                out.push(b'\\');
                out.push(b);
            }
            b @ 0x20..=0x7E => out.push(b),
            b => out.extend_from_slice(format!("\\{b:03o}").as_bytes()),
        }
    }
    out
}
