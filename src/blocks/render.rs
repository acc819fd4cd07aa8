use super::style::*;
use super::{Block, Emphasis, Field, FieldLayout, Table};
use crate::canvas::Canvas;
use crate::colour::colours;
use crate::font::{FontBook, FontId, TextStyle};
use crate::layout::{fits_fresh_page, Line, PageGeometry, TextMeasurer};
use crate::units::{mm, Pt};
use crate::ComposeError;

/// A piece of text positioned horizontally within a row
struct Run {
    text: String,
    x: Pt,
    style: TextStyle,
}

/// Measures blocks and draws them onto a canvas
#[derive(Debug, Clone, Copy)]
pub struct BlockRenderer<'a> {
    fonts: &'a FontBook,
    style: BlockStyle,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(fonts: &'a FontBook, style: BlockStyle) -> BlockRenderer<'a> {
        BlockRenderer { fonts, style }
    }

    pub fn style(&self) -> &BlockStyle {
        &self.style
    }

    fn measurer(&self, font: FontId, size: Pt) -> Result<TextMeasurer<'a>, ComposeError> {
        let fonts: &'a FontBook = self.fonts;
        Ok(TextMeasurer::for_face(fonts.get(font)?, size))
    }

    /// Height of `row_count` text rows spaced one line apart, the last one followed by `tail`
    fn rows_height(&self, row_count: usize, tail: Pt) -> Pt {
        self.style.line_step() * row_count.saturating_sub(1) as f32 + tail
    }

    fn value_style(&self, field: &Field) -> TextStyle {
        match field.emphasis {
            Emphasis::Normal => self.style.regular(self.style.body_size),
            Emphasis::Strong => self.style.bold(self.style.body_size),
        }
    }

    fn field_lines(&self, field: &Field, geometry: &PageGeometry) -> Result<Vec<Line>, ComposeError> {
        let width = match field.layout {
            FieldLayout::Inline => {
                geometry.content_right() - geometry.content_left() - mm(INLINE_VALUE_OFFSET)
            }
            FieldLayout::Stacked { wrap_width } => {
                wrap_width.unwrap_or(geometry.content_width() - mm(STACKED_WRAP_SHRINK))
            }
        };
        let style = self.value_style(field);
        let measurer = self.measurer(style.font.id, style.font.size)?;
        Ok(measurer.wrap(field.value_text(), width))
    }

    fn text_lines(&self, text: &str, geometry: &PageGeometry) -> Result<Vec<Line>, ComposeError> {
        let measurer = self.measurer(self.style.regular, self.style.body_size)?;
        Ok(measurer.wrap(text, geometry.content_width()))
    }

    fn first_column_lines(&self, table: &Table, row: &[String]) -> Result<Vec<Line>, ComposeError> {
        let width = table
            .columns
            .first()
            .map(|c| c.width - mm(TABLE_WRAP_SHRINK))
            .unwrap_or_default();
        let measurer = self.measurer(self.style.regular, self.style.table_body_size)?;
        let first = row.first().map(String::as_str).unwrap_or_default();
        Ok(measurer.wrap(first, width))
    }

    /// Below the last line of a paragraph: one line step plus the trailing gap, so a
    /// paragraph of n lines is as tall as a stacked field with n value lines
    fn text_block_tail(&self) -> Pt {
        self.style.line_step() + mm(STACKED_TRAILING_GAP)
    }

    fn row_height(&self, lines: usize) -> Pt {
        self.style.line_step() * lines as f32 + mm(TABLE_ROW_PADDING)
    }

    /// Vertical space the block takes when drawn in one piece
    pub fn needed_height(&self, block: &Block, geometry: &PageGeometry) -> Result<Pt, ComposeError> {
        Ok(match block {
            Block::SectionHeader(_) => mm(SECTION_HEIGHT),
            Block::Field(field) if field.is_skipped() => Pt(0.0),
            Block::Field(field) => {
                let lines = self.field_lines(field, geometry)?.len();
                match field.layout {
                    FieldLayout::Inline => self.rows_height(lines, mm(INLINE_ROW_HEIGHT)),
                    FieldLayout::Stacked { .. } => {
                        self.rows_height(lines + 1, mm(STACKED_TRAILING_GAP))
                    }
                }
            }
            Block::TextBlock(text) => {
                let lines = self.text_lines(text, geometry)?.len();
                self.rows_height(lines, self.text_block_tail())
            }
            Block::Table(table) => {
                let mut height = mm(TABLE_STRIP_ADVANCE);
                for row in table.rows.iter() {
                    height += self.row_height(self.first_column_lines(table, row)?.len());
                }
                height
            }
        })
    }

    /// Space that must be free for the block to start on the current page: the whole
    /// block when it fits on a page, otherwise its first unbreakable piece
    pub fn lead_height(&self, block: &Block, geometry: &PageGeometry) -> Result<Pt, ComposeError> {
        let needed = self.needed_height(block, geometry)?;
        if fits_fresh_page(needed, geometry) {
            return Ok(needed);
        }
        Ok(match block {
            Block::SectionHeader(_) => needed,
            Block::Field(_) => mm(INLINE_ROW_HEIGHT),
            Block::TextBlock(_) => self.style.line_step() * 2.0,
            Block::Table(table) => {
                let first_row = match table.rows.first() {
                    Some(row) => self.row_height(self.first_column_lines(table, row)?.len()),
                    None => Pt(0.0),
                };
                mm(TABLE_STRIP_ADVANCE) + first_row
            }
        })
    }

    /// Draw `block` at the cursor, starting a new page first if it does not fit
    pub fn render(&self, canvas: &mut Canvas, block: &Block) -> Result<(), ComposeError> {
        match block {
            Block::SectionHeader(title) => self.render_section_header(canvas, title),
            Block::Field(field) => self.render_field(canvas, field),
            Block::TextBlock(text) => self.render_text_block(canvas, text),
            Block::Table(table) => self.render_table(canvas, table),
        }
    }

    fn render_section_header(&self, canvas: &mut Canvas, title: &str) -> Result<(), ComposeError> {
        canvas.ensure_room(mm(SECTION_HEIGHT))?;
        let geometry = *canvas.geometry();
        let y = canvas.cursor().y;
        canvas.draw_rect(
            geometry.content_left(),
            y,
            geometry.content_width(),
            mm(SECTION_BAND_HEIGHT),
            colours::SECTION_BAND,
        )?;
        canvas.draw_text(
            title,
            geometry.content_left() + mm(SECTION_TITLE_INSET),
            y + mm(SECTION_TITLE_BASELINE),
            self.style.bold(self.style.section_size),
        )?;
        canvas.advance_cursor(mm(SECTION_HEIGHT));
        Ok(())
    }

    fn render_field(&self, canvas: &mut Canvas, field: &Field) -> Result<(), ComposeError> {
        if field.is_skipped() {
            return Ok(());
        }
        let geometry = *canvas.geometry();
        let left = geometry.content_left();
        let label = Run {
            text: format!("{}:", field.label),
            x: left,
            style: self.style.bold(self.style.body_size),
        };
        let value_style = self.value_style(field);
        let lines = self.field_lines(field, &geometry)?;

        match field.layout {
            FieldLayout::Inline => {
                let x = left + mm(INLINE_VALUE_OFFSET);
                let mut rows: Vec<Vec<Run>> = lines
                    .into_iter()
                    .map(|line| {
                        vec![Run {
                            text: line.text,
                            x,
                            style: value_style,
                        }]
                    })
                    .collect();
                if let Some(first) = rows.first_mut() {
                    first.insert(0, label);
                }
                self.place_rows(canvas, rows, mm(INLINE_ROW_HEIGHT))
            }
            FieldLayout::Stacked { .. } => {
                let mut rows = vec![vec![label]];
                rows.extend(lines.into_iter().map(|line| {
                    vec![Run {
                        text: line.text,
                        x: left,
                        style: value_style,
                    }]
                }));
                self.place_rows(canvas, rows, mm(STACKED_TRAILING_GAP))
            }
        }
    }

    fn render_text_block(&self, canvas: &mut Canvas, text: &str) -> Result<(), ComposeError> {
        let geometry = *canvas.geometry();
        let style = self.style.regular(self.style.body_size);
        let rows = self
            .text_lines(text, &geometry)?
            .into_iter()
            .map(|line| {
                vec![Run {
                    text: line.text,
                    x: geometry.content_left(),
                    style,
                }]
            })
            .collect();
        self.place_rows(canvas, rows, self.text_block_tail())
    }

    /// Draws rows of text one line apart. A block that fits on a page is kept in one
    /// piece; a taller one flows across pages a row at a time, its first two rows kept
    /// together so a label never ends a page alone.
    fn place_rows(&self, canvas: &mut Canvas, rows: Vec<Vec<Run>>, tail: Pt) -> Result<(), ComposeError> {
        let step = self.style.line_step();
        let total = self.rows_height(rows.len(), tail);

        if fits_fresh_page(total, canvas.geometry()) {
            canvas.ensure_room(total)?;
            let top = canvas.cursor().y;
            for (i, row) in rows.into_iter().enumerate() {
                let y = top + step * i as f32;
                for run in row {
                    draw_run(canvas, run, y)?;
                }
            }
            canvas.advance_cursor(total);
            return Ok(());
        }

        let count = rows.len();
        let slot_of = |i: usize| if i + 1 == count { tail } else { step };
        for (i, row) in rows.into_iter().enumerate() {
            let slot = slot_of(i);
            let keep = if i == 0 && count > 1 {
                slot + slot_of(1)
            } else {
                slot
            };
            canvas.ensure_room(keep)?;
            let y = canvas.cursor().y;
            for run in row {
                draw_run(canvas, run, y)?;
            }
            canvas.advance_cursor(slot);
        }
        Ok(())
    }

    fn validate_table(&self, table: &Table, geometry: &PageGeometry) -> Result<(), ComposeError> {
        if table.columns.is_empty() {
            return Err(ComposeError::InvalidTable("a table needs at least one column".into()));
        }
        let total: Pt = table.columns.iter().map(|c| c.width).sum();
        if total > geometry.content_width() + Pt(0.01) {
            return Err(ComposeError::InvalidTable(format!(
                "columns are {total}pt wide but the content area is only {}pt",
                geometry.content_width()
            )));
        }
        if let Some((i, row)) = table
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != table.columns.len())
        {
            return Err(ComposeError::InvalidTable(format!(
                "row {i} has {} cells for {} columns",
                row.len(),
                table.columns.len()
            )));
        }
        Ok(())
    }

    fn render_table(&self, canvas: &mut Canvas, table: &Table) -> Result<(), ComposeError> {
        let geometry = *canvas.geometry();
        self.validate_table(table, &geometry)?;
        let left = geometry.content_left();
        let inset = mm(TABLE_CELL_INSET);
        let baseline = mm(TABLE_BASELINE);
        let step = self.style.line_step();

        canvas.ensure_room(mm(TABLE_STRIP_ADVANCE))?;
        let y = canvas.cursor().y;
        canvas.draw_rect(
            left,
            y,
            geometry.content_width(),
            mm(TABLE_STRIP_HEIGHT),
            colours::TABLE_HEADER,
        )?;
        let column_x: Vec<Pt> = table
            .columns
            .iter()
            .scan(left, |x, column| {
                let start = *x;
                *x += column.width;
                Some(start)
            })
            .collect();

        let header_style = self.style.bold(self.style.table_header_size);
        for (column, x) in table.columns.iter().zip(column_x.iter()) {
            let run = Run {
                text: column.header.clone(),
                x: *x + inset,
                style: header_style,
            };
            draw_run(canvas, run, y + baseline)?;
        }
        canvas.advance_cursor(mm(TABLE_STRIP_ADVANCE));

        let cell_style = self.style.regular(self.style.table_body_size);
        for (i, row) in table.rows.iter().enumerate() {
            let lines = self.first_column_lines(table, row)?;
            let height = self.row_height(lines.len());
            if !fits_fresh_page(height, &geometry) {
                return Err(ComposeError::RowTooTall {
                    row: i,
                    height,
                    capacity: geometry.fresh_page_capacity(),
                });
            }
            canvas.ensure_room(height)?;
            let y = canvas.cursor().y;

            for (n, line) in lines.into_iter().enumerate() {
                let run = Run {
                    text: line.text,
                    x: left + inset,
                    style: cell_style,
                };
                draw_run(canvas, run, y + baseline + step * n as f32)?;
            }
            for (cell, x) in row.iter().zip(column_x.iter()).skip(1) {
                let run = Run {
                    text: cell.clone(),
                    x: *x + inset,
                    style: cell_style,
                };
                draw_run(canvas, run, y + baseline)?;
            }

            canvas.advance_cursor(height);
            let rule_y = y + height - mm(1.0);
            canvas.draw_line(
                (left, rule_y),
                (geometry.content_right(), rule_y),
                colours::RULE,
                mm(RULE_WIDTH),
            )?;
        }
        Ok(())
    }
}

fn draw_run(canvas: &mut Canvas, run: Run, y: Pt) -> Result<(), ComposeError> {
    if run.text.is_empty() {
        return Ok(());
    }
    canvas.draw_text(run.text, run.x, y, run.style)
}
