use super::Margins;
use crate::pagesize::{self, PageSize};
use crate::units::{mm, Pt};
use crate::ComposeError;

/// The fixed frame every page of a document shares: its size, the margins around the
/// content area, and the strip above the bottom margin kept free for the footer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
    pub margins: Margins,
    pub footer_reserved: Pt,
}

impl PageGeometry {
    /// Fails if the page is not taller than its vertical margins plus the footer zone
    pub fn new(
        size: PageSize,
        margins: Margins,
        footer_reserved: Pt,
    ) -> Result<PageGeometry, ComposeError> {
        let (width, height) = size;
        if height <= margins.top + margins.bottom + footer_reserved
            || width <= margins.left + margins.right
        {
            return Err(ComposeError::InvalidGeometry {
                height,
                top: margins.top,
                bottom: margins.bottom,
                footer: footer_reserved,
            });
        }
        Ok(PageGeometry {
            width,
            height,
            margins,
            footer_reserved,
        })
    }

    /// A4 with 20 mm side and top margins, a 10 mm bottom margin and a 20 mm footer zone
    pub fn a4() -> PageGeometry {
        PageGeometry {
            width: pagesize::A4.0,
            height: pagesize::A4.1,
            margins: Margins::trbl(mm(20.0), mm(20.0), mm(10.0), mm(20.0)),
            footer_reserved: mm(20.0),
        }
    }

    /// Lowest y (measured from the top of the page) that block content may reach
    pub fn content_limit(&self) -> Pt {
        self.height - self.margins.bottom - self.footer_reserved
    }

    /// Lowest y at which the canvas accepts a draw at all
    pub fn draw_limit(&self) -> Pt {
        self.height - self.footer_reserved
    }

    pub fn content_left(&self) -> Pt {
        self.margins.left
    }

    pub fn content_right(&self) -> Pt {
        self.width - self.margins.right
    }

    pub fn content_width(&self) -> Pt {
        self.width - self.margins.left - self.margins.right
    }

    /// Vertical space available to content on an empty page
    pub fn fresh_page_capacity(&self) -> Pt {
        self.content_limit() - self.margins.top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_limits_match_the_millimetre_layout() {
        let geometry = PageGeometry::a4();
        assert!((geometry.content_limit().0 - mm(267.0).0).abs() < 1e-3);
        assert!((geometry.content_width().0 - mm(170.0).0).abs() < 1e-3);
        assert!((geometry.draw_limit().0 - mm(277.0).0).abs() < 1e-3);
    }

    #[test]
    fn rejects_pages_without_room_for_content() {
        let result = PageGeometry::new(
            (mm(100.0), mm(50.0)),
            Margins::all(mm(20.0)),
            mm(10.0),
        );
        assert!(matches!(result, Err(ComposeError::InvalidGeometry { .. })));
    }
}
