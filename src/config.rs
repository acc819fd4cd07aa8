//! Engine configuration, loadable from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration that produces A4 pages
//! with Helvetica text:
//!
//! ```
//! use freight_docs::config::{EngineConfig, HeaderPolicy};
//!
//! let config = EngineConfig::from_json_str(r#"{
//!     "page": { "margins": { "left": 25, "right": 25 } },
//!     "header": "every_page",
//!     "tables": { "route_performance": [60, 27, 27, 27, 27] }
//! }"#).expect("valid configuration");
//!
//! assert_eq!(config.header, HeaderPolicy::EveryPage);
//! assert_eq!(config.page.margins.top, 20.0);
//! ```

use crate::blocks::FontSizes;
use crate::font::FontFamily;
use crate::format::{LabelCatalog, Locale};
use crate::layout::{MarginsMm, PageGeometry};
use crate::logo::LogoSource;
use crate::pagesize::{PageOrientation, PaperFormat};
use crate::units::{mm, Pt};
use crate::ComposeError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub size: PaperFormat,
    pub landscape: bool,
    pub margins: MarginsMm,
    pub footer_reserved_mm: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            size: PaperFormat::A4,
            landscape: false,
            margins: MarginsMm::default(),
            footer_reserved_mm: 20.0,
        }
    }
}

impl PageConfig {
    pub fn geometry(&self) -> Result<PageGeometry, ComposeError> {
        let size = if self.landscape {
            self.size.size().landscape()
        } else {
            self.size.size().portrait()
        };
        PageGeometry::new(size, self.margins.into(), mm(self.footer_reserved_mm))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub family: FontFamily,
    pub sizes: FontSizes,
}

/// Company identity printed in the letterhead and footer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub company_name: String,
    pub contact_lines: Vec<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            company_name: "Deliveroo Logistics".to_string(),
            contact_lines: vec![
                "Deliveroo Logistics | ul. Logistyczna 123, 00-001 Warsaw, Poland".to_string(),
                "Phone: +48 123 456 789 | Email: contact@deliveroo.pl".to_string(),
            ],
        }
    }
}

/// Which pages carry a header
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Full letterhead on the first page only
    #[default]
    FirstPage,
    /// Letterhead on the first page, plus the document title in the top margin of
    /// every later page
    EveryPage,
}

/// Column widths in millimetres, per table id
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TableWidths(BTreeMap<String, Vec<f32>>);

pub const ROUTE_PERFORMANCE_TABLE: &str = "route_performance";

impl Default for TableWidths {
    fn default() -> Self {
        let mut widths = BTreeMap::new();
        widths.insert(
            ROUTE_PERFORMANCE_TABLE.to_string(),
            vec![56.0, 28.0, 28.0, 28.0, 28.0],
        );
        TableWidths(widths)
    }
}

impl TableWidths {
    pub fn widths(&self, table: &str) -> Option<Vec<Pt>> {
        self.0
            .get(table)
            .map(|widths| widths.iter().map(|w| mm(*w)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub page: PageConfig,
    pub typography: Typography,
    pub logo: Option<LogoSource>,
    pub locale: Locale,
    pub branding: Branding,
    pub header: HeaderPolicy,
    pub tables: TableWidths,
    /// Add an outline entry for every section
    pub bookmarks: bool,
    pub labels: LabelCatalog,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            page: PageConfig::default(),
            typography: Typography::default(),
            logo: None,
            locale: Locale::default(),
            branding: Branding::default(),
            header: HeaderPolicy::default(),
            tables: TableWidths::default(),
            bookmarks: true,
            labels: LabelCatalog::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<EngineConfig, ComposeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ComposeError> {
        let json = std::fs::read_to_string(path)?;
        EngineConfig::from_json_str(&json)
    }
}
