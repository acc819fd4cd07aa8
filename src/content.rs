//! Turns the recorded draw operations of a page into a PDF content stream.

use crate::canvas::{DrawOp, RenderedPage};
use crate::colour::Colour;
use crate::font::{FontBook, SpanFont};
use crate::units::Pt;
use crate::ComposeError;
use std::io::Write;

/// Fixed-precision number formatting, so the same layout always yields the same bytes
fn num(value: Pt) -> String {
    let formatted = format!("{:.3}", value.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Renders a page's operations into an uncompressed content stream.
///
/// Layout coordinates grow downwards from the top of the page; PDF user space grows
/// upwards from the bottom, so every y is flipped against `page_height` here.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_page(
    page: &RenderedPage,
    page_height: Pt,
    fonts: &FontBook,
) -> Result<Vec<u8>, ComposeError> {
    let mut content: Vec<u8> = Vec::default();
    if page.ops.is_empty() {
        return Ok(content);
    }

    let mut current_font: Option<SpanFont> = None;
    let mut current_fill: Option<Colour> = None;

    write!(&mut content, "q\n")?;
    for op in page.ops.iter() {
        match op {
            DrawOp::Text { text, x, y, style } => {
                let face = fonts.get(style.font.id)?;
                if current_fill != Some(style.colour) {
                    write_fill(&mut content, style.colour)?;
                    current_fill = Some(style.colour);
                }
                write!(&mut content, "BT\n")?;
                if current_font != Some(style.font) {
                    // Tf is part of the text state and survives BT/ET
                    write!(
                        &mut content,
                        "/F{} {} Tf\n",
                        style.font.id.index(),
                        num(style.font.size)
                    )?;
                    current_font = Some(style.font);
                }
                write!(&mut content, "{} {} Td\n", num(*x), num(page_height - *y))?;
                content.write_all(&face.encode(text))?;
                write!(&mut content, " Tj\nET\n")?;
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                if current_fill != Some(*fill) {
                    write_fill(&mut content, *fill)?;
                    current_fill = Some(*fill);
                }
                write!(
                    &mut content,
                    "{} {} {} {} re\nf\n",
                    num(*x),
                    num(page_height - *y - *height),
                    num(*width),
                    num(*height)
                )?;
            }
            DrawOp::Line {
                from,
                to,
                colour,
                width,
            } => {
                write_stroke(&mut content, *colour)?;
                write!(
                    &mut content,
                    "{} w\n{} {} m\n{} {} l\nS\n",
                    num(*width),
                    num(from.0),
                    num(page_height - from.1),
                    num(to.0),
                    num(page_height - to.1)
                )?;
            }
            DrawOp::Image {
                image,
                x,
                y,
                width,
                height,
            } => {
                write!(
                    &mut content,
                    "q\n{} 0 0 {} {} {} cm\n/I{} Do\nQ\n",
                    num(*width),
                    num(*height),
                    num(*x),
                    num(page_height - *y - *height),
                    image.index()
                )?;
            }
        }
    }
    write!(&mut content, "Q\n")?;

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn write_fill(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::Rgb { r, g, b } => write!(
            content,
            "{} {} {} rg\n",
            num(Pt(r)),
            num(Pt(g)),
            num(Pt(b))
        ),
        Colour::Grey { g } => write!(content, "{} g\n", num(Pt(g))),
    }
}

#[allow(clippy::write_with_newline)]
fn write_stroke(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::Rgb { r, g, b } => write!(
            content,
            "{} {} {} RG\n",
            num(Pt(r)),
            num(Pt(g)),
            num(Pt(b))
        ),
        Colour::Grey { g } => write!(content, "{} G\n", num(Pt(g))),
    }
}
