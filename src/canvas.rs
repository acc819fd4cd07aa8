//! The page-relative drawing surface block renderers draw on.

use crate::colour::Colour;
use crate::font::TextStyle;
use crate::image::{Image, ImageId};
use crate::layout::{fits_fresh_page, must_break, PageGeometry};
use crate::outline::Outline;
use crate::units::Pt;
use crate::ComposeError;
use id_arena::Arena;
use log::debug;

/// Where the next block goes: the page being drawn on and the distance from its top edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page_index: usize,
    pub y: Pt,
}

/// A single recorded drawing operation. All coordinates are measured from the top left
/// corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A run of text whose baseline starts at `(x, y)`
    Text {
        text: String,
        x: Pt,
        y: Pt,
        style: TextStyle,
    },
    /// A filled rectangle whose top left corner is `(x, y)`
    Rect {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        fill: Colour,
    },
    /// A stroked straight line
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        width: Pt,
    },
    /// An image scaled into the box whose top left corner is `(x, y)`
    Image {
        image: ImageId,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
}

impl DrawOp {
    /// Lowest point (largest y) the operation touches
    fn bottom(&self) -> Pt {
        match self {
            DrawOp::Text { y, .. } => *y,
            DrawOp::Rect { y, height, .. } | DrawOp::Image { y, height, .. } => *y + *height,
            DrawOp::Line { from, to, .. } => from.1.max(to.1),
        }
    }
}

/// Everything drawn on one page, in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub ops: Vec<DrawOp>,
    /// Furthest the cursor travelled down this page
    pub content_height: Pt,
}

/// The result of the content pass: every page with its content, but no footers yet
#[derive(Debug)]
pub struct PageSet {
    pub geometry: PageGeometry,
    pub pages: Vec<RenderedPage>,
    pub images: Arena<Image>,
    pub outline: Outline,
}

impl PageSet {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// A drawing surface that owns the pages of one document while its content is laid out.
///
/// The canvas never breaks pages on its own: renderers ask [`Canvas::must_break`] before
/// drawing, and a draw that lands in the footer zone or below is rejected with
/// [`ComposeError::ContentOverflow`].
#[derive(Debug)]
pub struct Canvas {
    geometry: PageGeometry,
    pages: Vec<RenderedPage>,
    cursor: Cursor,
    images: Arena<Image>,
    outline: Outline,
    running_header: Vec<DrawOp>,
}

impl Canvas {
    /// A canvas with a single empty page and the cursor at the top margin
    pub fn new(geometry: PageGeometry) -> Canvas {
        Canvas {
            geometry,
            pages: vec![RenderedPage {
                ops: Vec::new(),
                content_height: geometry.margins.top,
            }],
            cursor: Cursor {
                page_index: 0,
                y: geometry.margins.top,
            },
            images: Arena::new(),
            outline: Outline::default(),
            running_header: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }

    /// Whether a block `needed` tall must go on a fresh page
    pub fn must_break(&self, needed: Pt) -> bool {
        must_break(self.cursor.y, needed, &self.geometry)
    }

    /// Start a new page if a block `needed` tall does not fit; returns whether it did.
    /// A block that would not fit on an empty page either is an error, not a break.
    pub fn ensure_room(&mut self, needed: Pt) -> Result<bool, ComposeError> {
        if !self.must_break(needed) {
            return Ok(false);
        }
        if !fits_fresh_page(needed, &self.geometry) {
            return Err(ComposeError::BlockTooTall {
                page: self.cursor.page_index,
                height: needed,
                capacity: self.geometry.fresh_page_capacity(),
            });
        }
        debug!(
            "page break before block of {needed}pt at y = {} on page {}",
            self.cursor.y,
            self.cursor.page_index + 1
        );
        self.begin_new_page();
        Ok(true)
    }

    /// Append a page, move the cursor to its top margin and redraw the running header
    pub fn begin_new_page(&mut self) {
        self.pages.push(RenderedPage {
            ops: self.running_header.clone(),
            content_height: self.geometry.margins.top,
        });
        self.cursor = Cursor {
            page_index: self.cursor.page_index + 1,
            y: self.geometry.margins.top,
        };
    }

    /// Move the cursor down by `dy`
    pub fn advance_cursor(&mut self, dy: Pt) {
        self.cursor.y += dy.max(Pt(0.0));
        self.track_height();
    }

    /// Move the cursor down to `y`, if it is not already past it
    pub fn advance_to(&mut self, y: Pt) {
        self.cursor.y = self.cursor.y.max(y);
        self.track_height();
    }

    fn track_height(&mut self) {
        let y = self.cursor.y;
        if let Some(page) = self.pages.last_mut() {
            page.content_height = page.content_height.max(y);
        }
    }

    /// Operations drawn at the top of every page after the first
    pub fn set_running_header(&mut self, ops: Vec<DrawOp>) {
        self.running_header = ops;
    }

    pub fn add_image(&mut self, image: Image) -> ImageId {
        self.images.alloc(image)
    }

    /// Record an outline entry pointing at the current page
    pub fn add_bookmark<S: ToString>(&mut self, title: S) {
        self.outline
            .add_bookmark(self.cursor.page_index, title.to_string());
    }

    pub fn draw_text<S: Into<String>>(
        &mut self,
        text: S,
        x: Pt,
        y: Pt,
        style: TextStyle,
    ) -> Result<(), ComposeError> {
        self.push(DrawOp::Text {
            text: text.into(),
            x,
            y,
            style,
        })
    }

    pub fn draw_rect(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        fill: Colour,
    ) -> Result<(), ComposeError> {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        })
    }

    pub fn draw_line(
        &mut self,
        from: (Pt, Pt),
        to: (Pt, Pt),
        colour: Colour,
        width: Pt,
    ) -> Result<(), ComposeError> {
        self.push(DrawOp::Line {
            from,
            to,
            colour,
            width,
        })
    }

    pub fn draw_image(
        &mut self,
        image: ImageId,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    ) -> Result<(), ComposeError> {
        self.push(DrawOp::Image {
            image,
            x,
            y,
            width,
            height,
        })
    }

    fn push(&mut self, op: DrawOp) -> Result<(), ComposeError> {
        let limit = self.geometry.draw_limit();
        let bottom = op.bottom();
        if bottom > limit {
            return Err(ComposeError::ContentOverflow {
                page: self.cursor.page_index,
                y: bottom,
                limit,
            });
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
        Ok(())
    }

    /// End the content pass
    pub fn finish(self) -> PageSet {
        PageSet {
            geometry: self.geometry,
            pages: self.pages,
            images: self.images,
            outline: self.outline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::font::FontBook;
    use crate::units::mm;

    #[test]
    fn starts_at_the_top_margin_of_page_zero() {
        let canvas = Canvas::new(PageGeometry::a4());
        assert_eq!(
            canvas.cursor(),
            Cursor {
                page_index: 0,
                y: mm(20.0)
            }
        );
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn new_pages_reset_the_cursor() {
        let mut canvas = Canvas::new(PageGeometry::a4());
        canvas.advance_cursor(mm(100.0));
        canvas.begin_new_page();
        assert_eq!(canvas.cursor().page_index, 1);
        assert_eq!(canvas.cursor().y, mm(20.0));
        assert_eq!(canvas.page_count(), 2);
        assert!(canvas.pages()[0].content_height > mm(119.0));
    }

    #[test]
    fn draws_in_the_footer_zone_are_rejected() {
        let fonts = FontBook::helvetica();
        let style = TextStyle::new(fonts.regular(), Pt(10.0), colours::BLACK);
        let mut canvas = Canvas::new(PageGeometry::a4());
        let limit = canvas.geometry().draw_limit();
        canvas
            .draw_text("fits", mm(20.0), limit, style)
            .expect("on the limit is allowed");
        let err = canvas
            .draw_rect(mm(20.0), limit - mm(2.0), mm(10.0), mm(5.0), colours::RULE)
            .expect_err("rect crosses into the footer");
        assert!(matches!(err, ComposeError::ContentOverflow { page: 0, .. }));
        assert_eq!(canvas.pages()[0].ops.len(), 1);
    }

    #[test]
    fn blocks_taller_than_an_empty_page_are_rejected() {
        let geometry = PageGeometry::new(
            crate::pagesize::A4,
            crate::layout::Margins::trbl(mm(20.0), mm(20.0), mm(10.0), mm(20.0)),
            mm(255.0),
        )
        .expect("valid geometry");
        let mut canvas = Canvas::new(geometry);
        let err = canvas
            .ensure_room(mm(15.0))
            .expect_err("a section header cannot fit anywhere");
        assert!(matches!(err, ComposeError::BlockTooTall { page: 0, .. }));
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn running_header_is_copied_onto_later_pages() {
        let mut canvas = Canvas::new(PageGeometry::a4());
        canvas.set_running_header(vec![DrawOp::Line {
            from: (mm(20.0), mm(15.0)),
            to: (mm(190.0), mm(15.0)),
            colour: colours::RULE,
            width: Pt(0.5),
        }]);
        canvas.begin_new_page();
        assert!(canvas.pages()[0].ops.is_empty());
        assert_eq!(canvas.pages()[1].ops.len(), 1);
    }
}
