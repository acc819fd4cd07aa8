//! Page geometry, the page break rule, and text measurement.
//!
//! All coordinates used during layout are measured in [`Pt`](crate::Pt) from the top
//! left corner of the page, growing downwards; they are flipped into PDF's bottom-up
//! space only when the page content streams are written.
//!
//! # Example
//!
//! ```
//! use freight_docs::font::{FontBook, SpanFont};
//! use freight_docs::layout::{must_break, PageGeometry, TextMeasurer};
//! use freight_docs::Pt;
//!
//! let fonts = FontBook::helvetica();
//! let geometry = PageGeometry::a4();
//! let measurer = TextMeasurer::new(&fonts, SpanFont { id: fonts.regular(), size: Pt(10.0) })
//!     .expect("font belongs to the book");
//!
//! let lines = measurer.wrap("Pallets must be shrink-wrapped before pickup", Pt(100.0));
//! let needed = Pt(12.0) * lines.len() as f32;
//! assert!(!must_break(geometry.margins.top, needed, &geometry));
//! ```

mod geometry;
mod margins;
mod policy;
mod text;

pub use geometry::*;
pub use margins::*;
pub use policy::*;
pub use text::*;
