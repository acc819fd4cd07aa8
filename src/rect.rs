use crate::units::Pt;

/// An axis-aligned box in PDF user space (origin bottom-left), given by its lower-left
/// and upper-right corners
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

impl Rect {
    /// The box of a whole page
    pub fn page(width: Pt, height: Pt) -> Rect {
        Rect {
            x1: Pt(0.0),
            y1: Pt(0.0),
            x2: width,
            y2: height,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect::new(r.x1.0, r.y1.0, r.x2.0, r.y2.0)
    }
}
