//! Drives a composer through both passes and serializes the result.
//!
//! ```
//! use freight_docs::compose::Invoice;
//! use freight_docs::config::EngineConfig;
//! use freight_docs::engine::Engine;
//!
//! let invoice: Invoice = serde_json::from_str(r#"{
//!     "id": "1", "number": "INV-7", "description": "Pallet storage, March",
//!     "date": "2024-03-01", "amount": 420, "status": "Paid", "dueDate": "2024-03-15"
//! }"#).expect("valid invoice");
//!
//! let engine = Engine::new(EngineConfig::default()).expect("default configuration");
//! let output = engine.generate(&invoice).expect("invoice renders");
//! assert_eq!(output.file_name, "Invoice_INV-7.pdf");
//! assert_eq!(output.page_count, 1);
//! assert!(output.bytes.starts_with(b"%PDF"));
//! ```

use crate::blocks::{Block, BlockRenderer, BlockStyle};
use crate::canvas::{Canvas, PageSet};
use crate::compose::{ComposeContext, DocumentComposer, Section};
use crate::config::{EngineConfig, HeaderPolicy};
use crate::decorate::Decorator;
use crate::document::FinalDocument;
use crate::font::FontBook;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{fits_fresh_page, PageGeometry};
use crate::logo::fetch_logo;
use crate::sink::OutputSink;
use crate::ComposeError;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::time::Instant;

/// A finished document, ready for a sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Where the content pass is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Letterhead,
    Section(usize),
    Finalized,
}

/// Renders business records into paginated PDF documents.
///
/// An engine is immutable once built and can be shared between threads; every call
/// works on a canvas of its own.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    fonts: FontBook,
    geometry: PageGeometry,
    style: BlockStyle,
    date: Option<NaiveDate>,
}

impl Engine {
    /// Load the configured fonts and validate the page geometry
    pub fn new(config: EngineConfig) -> Result<Engine, ComposeError> {
        let fonts = FontBook::from_family(&config.typography.family)?;
        let geometry = config.page.geometry()?;
        let style = BlockStyle::new(&fonts, &config.typography.sizes);
        Decorator::new(&fonts, config.typography.sizes, &config.branding).check_footer(&geometry)?;
        Ok(Engine {
            config,
            fonts,
            geometry,
            style,
            date: None,
        })
    }

    /// Fix the date used in fallback file names instead of reading the local clock
    pub fn with_date(mut self, date: NaiveDate) -> Engine {
        self.date = Some(date);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    fn decorator(&self) -> Decorator<'_> {
        Decorator::new(
            &self.fonts,
            self.config.typography.sizes,
            &self.config.branding,
        )
    }

    /// First pass: letterhead and every section, paginated. No footers yet.
    pub fn render_content(
        &self,
        composer: &dyn DocumentComposer,
        logo: Option<Image>,
    ) -> Result<PageSet, ComposeError> {
        let ctx = ComposeContext {
            locale: &self.config.locale,
            labels: &self.config.labels,
            tables: &self.config.tables,
            content_width: self.geometry.content_width(),
        };
        let sections = composer.sections(&ctx);
        let title = composer.title();
        let renderer = BlockRenderer::new(&self.fonts, self.style);
        let decorator = self.decorator();

        let mut canvas = Canvas::new(self.geometry);
        let logo = logo.map(|image| canvas.add_image(image));
        let mut phase = Phase::Letterhead;
        loop {
            phase = match phase {
                Phase::Letterhead => {
                    decorator.draw_letterhead(&mut canvas, &title, logo)?;
                    if self.config.header == HeaderPolicy::EveryPage {
                        canvas.set_running_header(decorator.running_header(&title, &self.geometry));
                    }
                    Phase::Section(0)
                }
                Phase::Section(i) => match sections.get(i) {
                    Some(section) => {
                        self.render_section(&mut canvas, &renderer, section)?;
                        Phase::Section(i + 1)
                    }
                    None => Phase::Finalized,
                },
                Phase::Finalized => break,
            };
        }

        debug!(
            "content pass for {:?} produced {} pages",
            composer.kind(),
            canvas.page_count()
        );
        Ok(canvas.finish())
    }

    fn render_section(
        &self,
        canvas: &mut Canvas,
        renderer: &BlockRenderer<'_>,
        section: &Section,
    ) -> Result<(), ComposeError> {
        if !section.has_content() {
            debug!("skipping empty section {:?}", section.title);
            return Ok(());
        }

        // keep the header with the start of its first block
        let header = Block::SectionHeader(section.title.clone());
        let first = section
            .blocks
            .iter()
            .find(|block| !matches!(block, Block::Field(field) if field.is_skipped()));
        let mut lead = renderer.needed_height(&header, &self.geometry)?;
        if let Some(first) = first {
            lead += renderer.lead_height(first, &self.geometry)?;
        }
        if fits_fresh_page(lead, &self.geometry) {
            canvas.ensure_room(lead)?;
        } else {
            canvas.ensure_room(renderer.needed_height(&header, &self.geometry)?)?;
        }

        if self.config.bookmarks {
            canvas.add_bookmark(&section.title);
        }
        renderer.render(canvas, &header)?;
        for block in section.blocks.iter() {
            renderer.render(canvas, block)?;
        }
        canvas.advance_cursor(renderer.style().section_gap());
        Ok(())
    }

    /// Second pass: stamp the footer with the final page count onto every page
    pub fn stamp_footers(&self, pages: PageSet, info: Info) -> Result<FinalDocument, ComposeError> {
        self.decorator().stamp_footers(pages, info)
    }

    fn info_for(&self, composer: &dyn DocumentComposer) -> Info {
        let mut info = Info::new();
        let title = match composer.natural_id() {
            Some(id) if !id.trim().is_empty() => format!("{} {}", composer.title(), id.trim()),
            _ => composer.title(),
        };
        info.title(title)
            .author(&self.config.branding.company_name)
            .subject(composer.kind().title());
        info
    }

    /// Render `composer` without a logo
    pub fn generate(&self, composer: &dyn DocumentComposer) -> Result<Output, ComposeError> {
        self.generate_with(composer, None)
    }

    /// Fetch the configured logo, then render. Only the fetch awaits; a logo that
    /// cannot be loaded is left out.
    pub async fn generate_with_logo(
        &self,
        composer: &dyn DocumentComposer,
    ) -> Result<Output, ComposeError> {
        let logo = match &self.config.logo {
            Some(source) => fetch_logo(source).await,
            None => None,
        };
        self.generate_with(composer, logo)
    }

    /// Render both passes and serialize the document
    pub fn generate_with(
        &self,
        composer: &dyn DocumentComposer,
        logo: Option<Image>,
    ) -> Result<Output, ComposeError> {
        let started = Instant::now();
        let pages = self.render_content(composer, logo)?;
        let document = self.stamp_footers(pages, self.info_for(composer))?;
        let bytes = document.to_bytes(&self.fonts)?;
        let file_name = composer
            .kind()
            .file_name(composer.natural_id().as_deref(), self.today());

        info!(
            "generated {file_name}: {} pages, {} bytes in {}ms",
            document.page_count(),
            bytes.len(),
            started.elapsed().as_millis()
        );
        Ok(Output {
            file_name,
            bytes,
            page_count: document.page_count(),
        })
    }

    /// Render and hand the result to `sink`. Nothing reaches the sink if rendering fails.
    pub fn generate_into<S: OutputSink + ?Sized>(
        &self,
        composer: &dyn DocumentComposer,
        sink: &mut S,
    ) -> Result<Output, ComposeError> {
        let output = self.generate(composer)?;
        sink.deliver(&output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Field;
    use crate::compose::DocumentKind;

    struct Notes(Vec<Section>);

    impl DocumentComposer for Notes {
        fn kind(&self) -> DocumentKind {
            DocumentKind::WarehousingRequest
        }

        fn natural_id(&self) -> Option<String> {
            None
        }

        fn sections(&self, _ctx: &ComposeContext<'_>) -> Vec<Section> {
            self.0.clone()
        }
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
            .expect("default configuration")
            .with_date(NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date"))
    }

    #[test]
    fn empty_sections_are_left_out() {
        let composer = Notes(vec![
            Section::new("Pricing").block(Field::optional("Final Cost", None::<String>)),
            Section::new("Notes").block(Field::new("Remark", "Fragile")),
        ]);
        let pages = engine().render_content(&composer, None).expect("renders");
        let titles: Vec<&str> = pages
            .outline
            .entries
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Notes"]);
    }

    #[test]
    fn fallback_file_name_uses_the_engine_date() {
        let output = engine().generate(&Notes(Vec::new())).expect("renders");
        assert_eq!(output.file_name, "Warehousing_Request_2024-02-29.pdf");
        assert_eq!(output.page_count, 1);
    }

    #[test]
    fn header_is_kept_with_its_first_block() {
        // 42 filler lines leave 16mm on the first page: room for the 15mm header band
        // but not for the band and the 8mm field below it
        let filler = vec!["line"; 42].join("\n");
        let composer = Notes(vec![
            Section::new("Filler").block(Block::TextBlock(filler)),
            Section::new("Tail").block(Field::new("Remark", "kept together")),
        ]);
        let pages = engine().render_content(&composer, None).expect("renders");
        assert_eq!(pages.page_count(), 2);
        let tail = pages
            .outline
            .entries
            .iter()
            .find(|entry| entry.title == "Tail")
            .expect("bookmark for the tail section");
        assert_eq!(tail.page_index, 1);
        assert!(pages.pages[1].ops.iter().any(|op| {
            matches!(op, crate::canvas::DrawOp::Text { text, .. } if text == "Remark:")
        }));
    }

    #[test]
    fn sections_that_fit_no_page_are_an_error() {
        let mut config = EngineConfig::default();
        config.page.footer_reserved_mm = 255.0;
        let engine = Engine::new(config).expect("footer fits the enlarged zone");
        let composer = Notes(vec![
            Section::new("First").block(Field::new("Remark", "one")),
            Section::new("Second").block(Field::new("Remark", "two")),
        ]);
        let err = engine
            .render_content(&composer, None)
            .expect_err("a 15mm header cannot fit in 12mm");
        assert!(matches!(err, ComposeError::BlockTooTall { .. }));
    }

    #[test]
    fn too_many_contact_lines_are_rejected_up_front() {
        let mut config = EngineConfig::default();
        config.branding.contact_lines = vec!["Deliveroo Logistics".to_string(); 5];
        let err = Engine::new(config).expect_err("footer overlaps the content area");
        assert!(matches!(err, ComposeError::FooterTooTall { .. }));
    }
}
