use crate::units::Pt;
use serde::Deserialize;

/// Margins are the blank border around the content area of every page. The page
/// break policy and the block renderers keep content inside them; the footer lives
/// in its own reserved zone just above the bottom margin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on every side
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }
}

/// Margins as they appear in configuration files, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarginsMm {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for MarginsMm {
    fn default() -> Self {
        MarginsMm {
            top: 20.0,
            right: 20.0,
            bottom: 10.0,
            left: 20.0,
        }
    }
}

impl From<MarginsMm> for Margins {
    fn from(m: MarginsMm) -> Self {
        use crate::units::mm;
        Margins::trbl(mm(m.top), mm(m.right), mm(m.bottom), mm(m.left))
    }
}
