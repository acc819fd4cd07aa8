//! Paginated PDF documents for logistics business records.
//!
//! A [`compose::DocumentComposer`] turns a record (an invoice, a transportation or
//! warehousing request, a logistics report) into titled sections of blocks. The
//! [`engine::Engine`] lays those blocks out on fixed-size pages in a first pass, then
//! stamps every page with a footer carrying "Page i of N" once the page count is known,
//! and writes the result with [pdf_writer].

mod colour;
pub use colour::*;

mod document;
pub use document::*;

/// Base-14 and embedded fonts, and the font book a document draws with
pub mod font;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Page geometry, the page break rule and text wrapping
pub mod layout;

mod outline;
pub use outline::*;

pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

pub mod blocks;
pub mod canvas;
mod content;
mod decorate;
pub use decorate::Decorator;

pub mod compose;
pub mod config;
pub mod engine;
pub mod format;
pub mod logo;
pub mod sink;

/// Re-export PDF-writer functionality
pub use pdf_writer;
