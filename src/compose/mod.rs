//! One composer per kind of business record.
//!
//! A composer only decides *which* blocks a document contains and in what order; the
//! engine lays them out. Sections are emitted in a fixed sequence, and optional values
//! that are absent simply produce no block.

mod invoice;
mod report;
mod transport;
mod warehousing;

pub use invoice::*;
pub use report::*;
pub use transport::*;
pub use warehousing::*;

use crate::blocks::{Block, Field};
use crate::config::TableWidths;
use crate::format::{humanize, DateInput, LabelCatalog, Locale};
use crate::units::{mm, Pt};
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;

/// The kinds of document the engine produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Invoice,
    TransportationRequest,
    WarehousingRequest,
    LogisticsReport,
}

impl DocumentKind {
    /// Printed in the letterhead
    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::TransportationRequest => "Transportation Request",
            DocumentKind::WarehousingRequest => "Warehousing Request",
            DocumentKind::LogisticsReport => "Logistics Report",
        }
    }

    /// Prefix of generated file names
    pub fn file_stem(self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::TransportationRequest => "Transportation_Request",
            DocumentKind::WarehousingRequest => "Warehousing_Request",
            DocumentKind::LogisticsReport => "Logistics_Report",
        }
    }

    /// `{Kind}_{naturalId}.pdf`, or `{Kind}_{YYYY-MM-DD}.pdf` when the record has no
    /// usable identifier. Characters outside `[A-Za-z0-9._-]` become underscores.
    pub fn file_name(self, natural_id: Option<&str>, fallback_date: NaiveDate) -> String {
        let id = natural_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.chars()
                    .map(|c| {
                        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                            c
                        } else {
                            '_'
                        }
                    })
                    .collect::<String>()
            });
        match id {
            Some(id) => format!("{}_{id}.pdf", self.file_stem()),
            None => format!("{}_{}.pdf", self.file_stem(), fallback_date.format("%Y-%m-%d")),
        }
    }
}

/// A titled group of blocks
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new<S: Into<String>>(title: S) -> Section {
        Section {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn block<B: Into<Block>>(mut self, block: B) -> Section {
        self.blocks.push(block.into());
        self
    }

    pub fn push<B: Into<Block>>(&mut self, block: B) {
        self.blocks.push(block.into());
    }

    /// Whether any block in the section would draw something
    pub fn has_content(&self) -> bool {
        self.blocks.iter().any(|block| match block {
            Block::Field(field) => !field.is_skipped(),
            _ => true,
        })
    }
}

/// Read-only services composers format values with
#[derive(Debug, Clone, Copy)]
pub struct ComposeContext<'a> {
    pub locale: &'a Locale,
    pub labels: &'a LabelCatalog,
    pub tables: &'a TableWidths,
    /// Width of the page's content area, which every table must fit in
    pub content_width: Pt,
}

impl<'a> ComposeContext<'a> {
    pub fn date(&self, date: Option<&DateInput>) -> String {
        self.locale.format_date(date)
    }

    /// Display name of an enum-like code
    pub fn label(&self, code: &str) -> String {
        self.labels.label(code)
    }

    pub fn money(&self, amount: f64, currency: &str) -> String {
        self.locale.format_currency(amount, currency, None)
    }

    /// Column widths for `table`: the configured ones when there is one per column,
    /// otherwise `fallback` (in mm). Widths that add up to more than the content area
    /// are scaled down proportionally.
    pub fn table_widths(&self, table: &str, fallback: &[f32]) -> Vec<Pt> {
        let widths = self
            .tables
            .widths(table)
            .filter(|widths| widths.len() == fallback.len())
            .unwrap_or_else(|| fallback.iter().map(|w| mm(*w)).collect());
        let total: Pt = widths.iter().copied().sum();
        if total <= self.content_width || total <= Pt(0.0) {
            return widths;
        }
        let scale = self.content_width / total;
        debug!("scaling {table} columns by {scale:.3} to fit {}pt", self.content_width);
        widths.into_iter().map(|width| width * scale).collect()
    }
}

/// Declares the sections of one kind of document
pub trait DocumentComposer: Sync {
    fn kind(&self) -> DocumentKind;

    /// The record's own identifier (invoice number, request number, ...), if it has one
    fn natural_id(&self) -> Option<String>;

    fn title(&self) -> String {
        self.kind().title().to_string()
    }

    /// Every section of the document, in print order
    fn sections(&self, ctx: &ComposeContext<'_>) -> Vec<Section>;
}

/// Postal address, printed on a single line
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: String,
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = [
            self.street.as_str(),
            self.city.as_str(),
            self.postal_code.as_deref().unwrap_or_default(),
            self.country.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub unit: String,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} × {} × {} {}",
            self.length, self.width, self.height, self.unit
        )
    }
}

/// Inline field for an optional enum-like code
pub(crate) fn optional_code(ctx: &ComposeContext<'_>, label: &str, code: Option<&str>) -> Field {
    Field::optional(label, code.filter(|c| !c.trim().is_empty()).map(|c| ctx.label(c)))
}

/// `"12 pallets"`
pub(crate) fn quantity(quantity: u32, unit: &str) -> String {
    format!("{quantity} {}", humanize(unit).to_lowercase())
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_use_the_natural_id() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        assert_eq!(
            DocumentKind::Invoice.file_name(Some("INV-2024-001"), date),
            "Invoice_INV-2024-001.pdf"
        );
        assert_eq!(
            DocumentKind::TransportationRequest.file_name(Some("TR/9 a"), date),
            "Transportation_Request_TR_9_a.pdf"
        );
    }

    #[test]
    fn file_names_fall_back_to_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        assert_eq!(
            DocumentKind::WarehousingRequest.file_name(None, date),
            "Warehousing_Request_2024-05-01.pdf"
        );
        assert_eq!(
            DocumentKind::WarehousingRequest.file_name(Some("  "), date),
            "Warehousing_Request_2024-05-01.pdf"
        );
    }

    #[test]
    fn addresses_skip_blank_parts() {
        let address = Address {
            street: "ul. Logistyczna 123".into(),
            city: "Warsaw".into(),
            postal_code: Some("00-001".into()),
            country: "Poland".into(),
        };
        assert_eq!(address.to_string(), "ul. Logistyczna 123, Warsaw, 00-001, Poland");
        let partial = Address {
            city: "Gdańsk".into(),
            ..Address::default()
        };
        assert_eq!(partial.to_string(), "Gdańsk");
    }

    #[test]
    fn table_widths_shrink_to_the_content_area() {
        let (locale, labels) = (Locale::default(), LabelCatalog::default());
        let tables = TableWidths::default();
        let mut ctx = ComposeContext {
            locale: &locale,
            labels: &labels,
            tables: &tables,
            content_width: mm(170.0),
        };
        let fallback = [56.0, 28.0, 28.0, 28.0, 28.0];
        assert_eq!(
            ctx.table_widths(crate::config::ROUTE_PERFORMANCE_TABLE, &fallback)[0],
            mm(56.0)
        );

        // A5 portrait leaves 108 mm between the default margins
        ctx.content_width = mm(108.0);
        let widths = ctx.table_widths(crate::config::ROUTE_PERFORMANCE_TABLE, &fallback);
        let total: Pt = widths.iter().copied().sum();
        assert!(total <= mm(108.0) + Pt(0.01));
        assert!((widths[0] / widths[1] - 2.0).abs() < 1e-4);
    }

    #[test]
    fn sections_with_only_skipped_fields_have_no_content() {
        let section = Section::new("Pricing").block(Field::optional("Final Cost", None::<String>));
        assert!(!section.has_content());
        assert!(Section::new("Notes")
            .block(Block::TextBlock(String::new()))
            .has_content());
    }
}
