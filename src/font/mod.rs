//! Fonts available to a document, and the metrics layout needs from them.
//!
//! A [`FontBook`] always carries exactly two faces, a regular one for values and body
//! text and a bold one for labels and headings. Both are either the built-in Helvetica
//! pair (nothing embedded, WinAnsi text) or a pair of embedded TrueType/OpenType fonts.

mod embedded;
mod standard;

pub use embedded::*;
pub use standard::StandardFont;
pub(crate) use standard::encode_literal;

use crate::colour::Colour;
use crate::refs::{ObjectReferences, RefType};
use crate::{ComposeError, Pt};
use id_arena::{Arena, Id};
use pdf_writer::{Name, Pdf};
use serde::Deserialize;
use std::path::PathBuf;

/// Either a built-in face or an embedded font program
#[derive(Debug)]
pub enum FontFace {
    Standard(StandardFont),
    Embedded(Font),
}

pub type FontId = Id<FontFace>;

impl FontFace {
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        match self {
            FontFace::Standard(font) => font.advance(ch, size),
            FontFace::Embedded(font) => font.advance(ch, size),
        }
    }

    /// Width of a run of text on a single line; newlines are not interpreted
    pub fn width_of(&self, text: &str, size: Pt) -> Pt {
        text.chars().map(|ch| self.advance(ch, size)).sum()
    }

    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            FontFace::Standard(font) => font.ascent(size),
            FontFace::Embedded(font) => font.ascent(size),
        }
    }

    pub fn line_height(&self, size: Pt) -> Pt {
        match self {
            FontFace::Standard(font) => font.line_height(size),
            FontFace::Embedded(font) => font.line_height(size),
        }
    }

    /// The text-showing operand for `text`: a literal string for standard faces,
    /// a hex string of glyph ids for embedded ones
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            FontFace::Standard(_) => {
                let mut out = vec![b'('];
                out.extend(encode_literal(text));
                out.push(b')');
                out
            }
            FontFace::Embedded(font) => {
                let mut out = vec![b'<'];
                for ch in text.chars() {
                    out.extend(format!("{:04x}", font.glyph_or_replacement(ch)).into_bytes());
                }
                out.push(b'>');
                out
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            FontFace::Standard(font) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontFace::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

/// Which font family documents are set in
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FontFamily {
    /// The base-14 Helvetica / Helvetica-Bold pair
    #[default]
    Helvetica,
    /// A regular and a bold font file to embed
    Embedded { regular: PathBuf, bold: PathBuf },
}

/// The regular + bold faces used by a document
#[derive(Debug)]
pub struct FontBook {
    faces: Arena<FontFace>,
    regular: FontId,
    bold: FontId,
}

impl Default for FontBook {
    fn default() -> Self {
        FontBook::helvetica()
    }
}

impl FontBook {
    pub fn helvetica() -> FontBook {
        let mut faces = Arena::new();
        let regular = faces.alloc(FontFace::Standard(StandardFont::Helvetica));
        let bold = faces.alloc(FontFace::Standard(StandardFont::HelveticaBold));
        FontBook {
            faces,
            regular,
            bold,
        }
    }

    pub fn embedded(regular: Font, bold: Font) -> FontBook {
        let mut faces = Arena::new();
        let regular = faces.alloc(FontFace::Embedded(regular));
        let bold = faces.alloc(FontFace::Embedded(bold));
        FontBook {
            faces,
            regular,
            bold,
        }
    }

    pub fn from_family(family: &FontFamily) -> Result<FontBook, ComposeError> {
        match family {
            FontFamily::Helvetica => Ok(FontBook::helvetica()),
            FontFamily::Embedded { regular, bold } => Ok(FontBook::embedded(
                Font::load_path(regular)?,
                Font::load_path(bold)?,
            )),
        }
    }

    pub fn regular(&self) -> FontId {
        self.regular
    }

    pub fn bold(&self) -> FontId {
        self.bold
    }

    pub fn get(&self, id: FontId) -> Result<&FontFace, ComposeError> {
        self.faces.get(id).ok_or(ComposeError::UnknownFont(id.index()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FontId, &FontFace)> {
        self.faces.iter()
    }
}

impl std::ops::Index<FontId> for FontBook {
    type Output = FontFace;

    fn index(&self, id: FontId) -> &FontFace {
        &self.faces[id]
    }
}

/// A font at a given size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: FontId,
    pub size: Pt,
}

/// Everything needed to draw a run of text
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextStyle {
    pub font: SpanFont,
    pub colour: Colour,
}

impl TextStyle {
    pub fn new(id: FontId, size: Pt, colour: Colour) -> TextStyle {
        TextStyle {
            font: SpanFont { id, size },
            colour,
        }
    }
}
