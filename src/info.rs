use crate::refs::{ObjectReferences, RefType};
use pdf_writer::{Pdf, TextStr};

/// Entries of the PDF document information dictionary.
///
/// Dates are deliberately absent: the same record always serializes to the same bytes.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    /// The issuing company
    pub author: Option<String>,
    /// The kind of business record
    pub subject: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut dict = writer.document_info(refs.gen(RefType::Info));

        if let Some(title) = text(&self.title) {
            dict.title(title);
        }
        if let Some(author) = text(&self.author) {
            dict.author(author);
        }
        if let Some(subject) = text(&self.subject) {
            dict.subject(subject);
        }
        dict.producer(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " ",
            env!("CARGO_PKG_VERSION")
        )));
    }
}

fn text(value: &Option<String>) -> Option<TextStr<'_>> {
    value.as_deref().map(TextStr)
}
