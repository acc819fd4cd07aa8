use crate::units::Pt;
use thiserror::Error;

/// All errors that composing or writing a document can generate
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse a configured font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the logo
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// A configuration file or record could not be deserialized
    Json(#[from] serde_json::Error),

    /// The page is too short to hold its margins and the footer zone
    #[error("invalid page geometry: height {height} leaves no room for margins ({top} + {bottom}) and footer ({footer})")]
    InvalidGeometry {
        height: Pt,
        top: Pt,
        bottom: Pt,
        footer: Pt,
    },

    /// A table's columns or rows are inconsistent
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Something was drawn below the content area; the renderer skipped the break check
    #[error("content overflow on page {page}: y = {y} is past the limit {limit}")]
    ContentOverflow { page: usize, y: Pt, limit: Pt },

    /// A table row is taller than an entire empty page
    #[error("table row {row} is {height} tall but a fresh page only holds {capacity}")]
    RowTooTall { row: usize, height: Pt, capacity: Pt },

    /// A block is taller than an entire empty page, so no page break can make room
    #[error("block of {height} on page {page} does not fit even on a fresh page ({capacity})")]
    BlockTooTall { page: usize, height: Pt, capacity: Pt },

    /// The footer needs more room than the bottom margin and footer zone leave
    #[error("footer needs {needed} below the content area but only {available} is reserved")]
    FooterTooTall { needed: Pt, available: Pt },

    /// The header logo could not be obtained
    #[error("logo unavailable: {0}")]
    LogoUnavailable(String),

    #[cfg(feature = "remote-logo")]
    #[error(transparent)]
    /// [reqwest] failed to download the logo
    Http(#[from] reqwest::Error),

    /// A font id that does not belong to the document's font book
    #[error("unknown font #{0}")]
    UnknownFont(usize),
}
