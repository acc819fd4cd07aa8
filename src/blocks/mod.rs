//! The atomic units a document is built from, and how each one is drawn.
//!
//! Blocks are plain immutable values; a [`BlockRenderer`] measures them, consults the
//! page break rule, draws them onto a [`Canvas`](crate::canvas::Canvas) and moves its
//! cursor past them.

mod render;
mod style;

pub use render::*;
pub use style::*;

use crate::units::Pt;

/// One renderable unit of a document
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A shaded band carrying a section title
    SectionHeader(String),
    /// A bold label followed by its value
    Field(Field),
    /// A paragraph spanning the whole content width
    TextBlock(String),
    Table(Table),
}

/// How much weight a field's value carries
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    #[default]
    Normal,
    /// Value is set in bold, e.g. amounts due
    Strong,
}

/// Where a field's value goes relative to its label
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum FieldLayout {
    /// Value on the label's line, in a column of its own
    #[default]
    Inline,
    /// Value wrapped below the label; `None` uses the style's default width
    Stacked { wrap_width: Option<Pt> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: Option<String>,
    pub emphasis: Emphasis,
    /// Optional fields without a value are left out entirely
    pub optional: bool,
    pub layout: FieldLayout,
}

impl Field {
    /// A required field; an empty value still renders its label
    pub fn new<L: Into<String>, V: Into<String>>(label: L, value: V) -> Field {
        Field {
            label: label.into(),
            value: Some(value.into()),
            emphasis: Emphasis::Normal,
            optional: false,
            layout: FieldLayout::Inline,
        }
    }

    /// A field that is skipped when `value` is missing or blank
    pub fn optional<L: Into<String>, V: Into<String>>(label: L, value: Option<V>) -> Field {
        Field {
            label: label.into(),
            value: value.map(Into::into),
            emphasis: Emphasis::Normal,
            optional: true,
            layout: FieldLayout::Inline,
        }
    }

    pub fn strong(mut self) -> Field {
        self.emphasis = Emphasis::Strong;
        self
    }

    pub fn stacked(mut self) -> Field {
        self.layout = FieldLayout::Stacked { wrap_width: None };
        self
    }

    pub fn stacked_within(mut self, wrap_width: Pt) -> Field {
        self.layout = FieldLayout::Stacked {
            wrap_width: Some(wrap_width),
        };
        self
    }

    /// Whether the field produces no output at all
    pub fn is_skipped(&self) -> bool {
        self.optional
            && self
                .value
                .as_deref()
                .map_or(true, |value| value.trim().is_empty())
    }

    pub(crate) fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

impl From<Field> for Block {
    fn from(field: Field) -> Self {
        Block::Field(field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: Pt,
}

impl Column {
    pub fn new<S: Into<String>>(header: S, width: Pt) -> Column {
        Column {
            header: header.into(),
            width,
        }
    }
}

/// A table with fixed column widths. Only the first column wraps; the others hold a
/// single line each.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Table {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(mut self, cells: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_without_content_are_skipped() {
        assert!(Field::optional("Email", None::<String>).is_skipped());
        assert!(Field::optional("Email", Some("   ")).is_skipped());
        assert!(!Field::optional("Email", Some("ops@example.com")).is_skipped());
        assert!(!Field::new("Email", "").is_skipped());
    }
}
