//! Page furniture: the letterhead drawn during the content pass, and the footer stamped
//! onto every page once the page count is known.

use crate::blocks::FontSizes;
use crate::canvas::{Canvas, DrawOp, PageSet};
use crate::colour::colours;
use crate::config::Branding;
use crate::document::FinalDocument;
use crate::font::{FontBook, TextStyle};
use crate::image::ImageId;
use crate::info::Info;
use crate::layout::{PageGeometry, TextMeasurer};
use crate::units::{mm, Pt};
use crate::ComposeError;
use log::debug;

// letterhead and footer placement, in millimetres
const LOGO_POSITION: f32 = 15.0;
const LOGO_SIZE: f32 = 15.0;
const TITLE_BASELINE: f32 = 35.0;
const COMPANY_BASELINE: f32 = 42.0;
const CONTENT_START: f32 = 55.0;
const RUNNING_TITLE_ABOVE_MARGIN: f32 = 8.0;
const RUNNING_RULE_ABOVE_MARGIN: f32 = 4.0;
// the footer is laid out upwards from the bottom edge of the page
const FOOTER_BASELINE_ABOVE_EDGE: f32 = 12.0;
const FOOTER_LINE_SPACING: f32 = 6.0;
const FOOTER_RULE_ABOVE_TEXT: f32 = 7.0;

/// Draws headers and footers with the configured fonts and branding
#[derive(Debug, Clone, Copy)]
pub struct Decorator<'a> {
    fonts: &'a FontBook,
    sizes: FontSizes,
    branding: &'a Branding,
}

impl<'a> Decorator<'a> {
    pub fn new(fonts: &'a FontBook, sizes: FontSizes, branding: &'a Branding) -> Decorator<'a> {
        Decorator {
            fonts,
            sizes,
            branding,
        }
    }

    fn style(&self, bold: bool, size: f32) -> TextStyle {
        let id = if bold {
            self.fonts.bold()
        } else {
            self.fonts.regular()
        };
        TextStyle::new(id, Pt(size), colours::BLACK)
    }

    /// First-page header: optional logo, document title and company name. Leaves the
    /// cursor where the body content starts.
    pub fn draw_letterhead(
        &self,
        canvas: &mut Canvas,
        title: &str,
        logo: Option<ImageId>,
    ) -> Result<(), ComposeError> {
        let left = canvas.geometry().content_left();
        if let Some(logo) = logo {
            canvas.draw_image(
                logo,
                mm(LOGO_POSITION),
                mm(LOGO_POSITION),
                mm(LOGO_SIZE),
                mm(LOGO_SIZE),
            )?;
        }
        canvas.draw_text(
            title,
            left,
            mm(TITLE_BASELINE),
            self.style(true, self.sizes.title),
        )?;
        canvas.draw_text(
            self.branding.company_name.as_str(),
            left,
            mm(COMPANY_BASELINE),
            self.style(false, self.sizes.subtitle),
        )?;
        canvas.advance_to(mm(CONTENT_START));
        Ok(())
    }

    /// Distance from the bottom edge of the page up to the footer rule
    pub fn footer_height(&self) -> Pt {
        let extra_lines = self.branding.contact_lines.len().saturating_sub(1);
        mm(FOOTER_BASELINE_ABOVE_EDGE)
            + mm(FOOTER_LINE_SPACING) * extra_lines as f32
            + mm(FOOTER_RULE_ABOVE_TEXT)
    }

    /// Fails if the footer would reach into the content area
    pub fn check_footer(&self, geometry: &PageGeometry) -> Result<(), ComposeError> {
        let needed = self.footer_height();
        let available = geometry.height - geometry.content_limit();
        if needed > available + Pt(0.01) {
            return Err(ComposeError::FooterTooTall { needed, available });
        }
        Ok(())
    }

    /// Title and rule drawn in the top margin of every page after the first
    pub fn running_header(&self, title: &str, geometry: &PageGeometry) -> Vec<DrawOp> {
        let top = geometry.margins.top;
        let rule_y = top - mm(RUNNING_RULE_ABOVE_MARGIN);
        vec![
            DrawOp::Text {
                text: title.to_string(),
                x: geometry.content_left(),
                y: top - mm(RUNNING_TITLE_ABOVE_MARGIN),
                style: TextStyle::new(
                    self.fonts.bold(),
                    Pt(self.sizes.footer),
                    colours::MUTED_TEXT,
                ),
            },
            DrawOp::Line {
                from: (geometry.content_left(), rule_y),
                to: (geometry.content_right(), rule_y),
                colour: colours::RULE,
                width: mm(0.2),
            },
        ]
    }

    /// Second pass: with the final page count known, add the footer rule, the contact
    /// lines and "Page i of N" to every page. Never adds or removes pages.
    pub fn stamp_footers(&self, pages: PageSet, info: Info) -> Result<FinalDocument, ComposeError> {
        let PageSet {
            geometry,
            pages: mut rendered,
            images,
            outline,
        } = pages;

        self.check_footer(&geometry)?;
        let total = rendered.len();
        let footer_style = TextStyle::new(
            self.fonts.regular(),
            Pt(self.sizes.footer),
            colours::MUTED_TEXT,
        );
        let measurer = TextMeasurer::new(self.fonts, footer_style.font)?;
        let line_count = self.branding.contact_lines.len();
        let last_baseline = geometry.height - mm(FOOTER_BASELINE_ABOVE_EDGE);
        let first_baseline =
            last_baseline - mm(FOOTER_LINE_SPACING) * line_count.saturating_sub(1) as f32;
        let rule_y = first_baseline - mm(FOOTER_RULE_ABOVE_TEXT);

        for (i, page) in rendered.iter_mut().enumerate() {
            page.ops.push(DrawOp::Line {
                from: (geometry.content_left(), rule_y),
                to: (geometry.content_right(), rule_y),
                colour: colours::RULE,
                width: mm(0.2),
            });
            for (n, line) in self.branding.contact_lines.iter().enumerate() {
                page.ops.push(DrawOp::Text {
                    text: line.clone(),
                    x: geometry.content_left(),
                    y: first_baseline + mm(FOOTER_LINE_SPACING) * n as f32,
                    style: footer_style,
                });
            }
            let page_number = format!("Page {} of {}", i + 1, total);
            page.ops.push(DrawOp::Text {
                x: geometry.content_right() - measurer.width_of(&page_number),
                y: last_baseline,
                text: page_number,
                style: footer_style,
            });
        }
        debug!("stamped footers on {total} pages");

        Ok(FinalDocument::new(geometry, rendered, images, outline, info))
    }
}
