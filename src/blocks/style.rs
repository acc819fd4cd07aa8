use crate::colour::{colours, Colour};
use crate::font::{FontBook, FontId, TextStyle};
use crate::units::{mm, Pt};
use serde::Deserialize;

// block geometry, in millimetres
pub(crate) const SECTION_BAND_HEIGHT: f32 = 8.0;
pub(crate) const SECTION_HEIGHT: f32 = 15.0;
pub(crate) const SECTION_TITLE_INSET: f32 = 2.0;
pub(crate) const SECTION_TITLE_BASELINE: f32 = 5.5;
pub(crate) const SECTION_GAP: f32 = 7.0;
pub(crate) const LINE_STEP: f32 = 4.0;
pub(crate) const INLINE_VALUE_OFFSET: f32 = 60.0;
pub(crate) const INLINE_ROW_HEIGHT: f32 = 8.0;
pub(crate) const STACKED_TRAILING_GAP: f32 = 6.0;
pub(crate) const STACKED_WRAP_SHRINK: f32 = 20.0;
pub(crate) const TABLE_STRIP_HEIGHT: f32 = 6.0;
pub(crate) const TABLE_STRIP_ADVANCE: f32 = 10.0;
pub(crate) const TABLE_BASELINE: f32 = 4.0;
pub(crate) const TABLE_CELL_INSET: f32 = 2.0;
pub(crate) const TABLE_ROW_PADDING: f32 = 2.0;
pub(crate) const TABLE_WRAP_SHRINK: f32 = 4.0;
pub(crate) const RULE_WIDTH: f32 = 0.2;

/// Font sizes in points, per role
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub section: f32,
    pub body: f32,
    pub table_header: f32,
    pub table_body: f32,
    pub footer: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        FontSizes {
            title: 16.0,
            subtitle: 10.0,
            section: 14.0,
            body: 10.0,
            table_header: 9.0,
            table_body: 8.0,
            footer: 8.0,
        }
    }
}

/// Fonts and sizes the block renderers draw with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub regular: FontId,
    pub bold: FontId,
    pub section_size: Pt,
    pub body_size: Pt,
    pub table_header_size: Pt,
    pub table_body_size: Pt,
    pub text_colour: Colour,
}

impl BlockStyle {
    pub fn new(fonts: &FontBook, sizes: &FontSizes) -> BlockStyle {
        BlockStyle {
            regular: fonts.regular(),
            bold: fonts.bold(),
            section_size: Pt(sizes.section),
            body_size: Pt(sizes.body),
            table_header_size: Pt(sizes.table_header),
            table_body_size: Pt(sizes.table_body),
            text_colour: colours::BLACK,
        }
    }

    pub fn bold(&self, size: Pt) -> TextStyle {
        TextStyle::new(self.bold, size, self.text_colour)
    }

    pub fn regular(&self, size: Pt) -> TextStyle {
        TextStyle::new(self.regular, size, self.text_colour)
    }

    /// Distance between consecutive wrapped lines
    pub fn line_step(&self) -> Pt {
        mm(LINE_STEP)
    }

    /// Space left below the last block of a section
    pub fn section_gap(&self) -> Pt {
        mm(SECTION_GAP)
    }
}
