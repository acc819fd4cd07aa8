use super::PageGeometry;
use crate::units::Pt;

/// Whether a block `needed` tall, placed at `cursor_y`, would cross the content limit
/// and must therefore start on a new page. Content ending exactly on the limit fits.
pub fn must_break(cursor_y: Pt, needed: Pt, geometry: &PageGeometry) -> bool {
    cursor_y + needed > geometry.content_limit()
}

/// Whether a block `needed` tall could be placed on an empty page at all
pub fn fits_fresh_page(needed: Pt, geometry: &PageGeometry) -> bool {
    !must_break(geometry.margins.top, needed, geometry)
}
