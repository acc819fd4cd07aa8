//! Length units used throughout layout.
//!
//! Everything is laid out in [`Pt`] (1/72 inch, the native PDF unit). The business
//! layout constants are naturally expressed in millimetres, so [`Mm`] converts into
//! points with `.into()`.

use derive_more::{Add, AddAssign, Display, From, Into, Neg, Sub, SubAssign, Sum};
use std::ops::{Div, Mul};

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Neg,
    Sum,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

const PT_PER_INCH: f32 = 72.0;
const MM_PER_INCH: f32 = 25.4;

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 * MM_PER_INCH / PT_PER_INCH)
    }
}

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Ratio of two lengths
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

/// Shorthand for converting millimetres into points, used for layout constants
pub fn mm(value: f32) -> Pt {
    Mm(value).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_width_in_points() {
        let width: Pt = Mm(210.0).into();
        assert!((width.0 - 595.2756).abs() < 0.001);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let a = Pt(10.0) + Pt(5.0) * 2.0 - Pt(4.0) / 2.0;
        assert_eq!(a, Pt(18.0));
        assert_eq!(Pt(9.0) / Pt(3.0), 3.0);
        let total: Pt = [Pt(1.0), Pt(2.0), Pt(3.5)].into_iter().sum();
        assert_eq!(total, Pt(6.5));
    }
}
