//! Paper formats business documents are printed on.
//!
//! Sizes are (width, height) in points and portrait unless turned with
//! [`PageOrientation`](crate::pagesize::PageOrientation):
//!
//! ```
//! use freight_docs::pagesize::{PageOrientation, A4};
//!
//! let (width, height) = A4.landscape();
//! assert!(width > height);
//! ```

use crate::units::Pt;
use serde::Deserialize;

pub type PageSize = (Pt, Pt);

const MM: f32 = 72.0 / 25.4;
const INCH: f32 = 72.0;

pub const A4: PageSize = (Pt(210.0 * MM), Pt(297.0 * MM));
pub const A5: PageSize = (Pt(148.0 * MM), Pt(210.0 * MM));
pub const LETTER: PageSize = (Pt(8.5 * INCH), Pt(11.0 * INCH));
pub const LEGAL: PageSize = (Pt(8.5 * INCH), Pt(14.0 * INCH));

/// Paper formats selectable from configuration
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperFormat {
    pub fn size(self) -> PageSize {
        match self {
            PaperFormat::A4 => A4,
            PaperFormat::A5 => A5,
            PaperFormat::Letter => LETTER,
            PaperFormat::Legal => LEGAL,
        }
    }
}

/// Turning a page size between portrait and landscape
pub trait PageOrientation {
    /// Narrow side first
    fn portrait(self) -> Self;
    /// Wide side first
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> PageSize {
        let (width, height) = self;
        if width > height {
            (height, width)
        } else {
            self
        }
    }

    fn landscape(self) -> PageSize {
        let (width, height) = self;
        if width < height {
            (height, width)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_is_idempotent() {
        assert_eq!(A4.portrait(), A4);
        assert_eq!(A4.landscape().landscape(), A4.landscape());
        assert_eq!(LETTER.landscape().portrait(), LETTER);
        assert_eq!(PaperFormat::Legal.size().1, Pt(1008.0));
    }
}
