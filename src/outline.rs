use crate::refs::{ObjectReferences, RefType};
use pdf_writer::{Finish, Pdf, Ref, TextStr};

/// Flat document outline: one bookmark per section, in document order
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub page_index: usize,
    pub title: String,
}

impl Outline {
    pub fn add_bookmark(&mut self, page_index: usize, title: String) {
        self.entries.push(OutlineEntry { page_index, title });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the outline root and its items; page refs must already be generated.
    /// Returns the root's id, or [None] when there is nothing to write.
    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) -> Option<Ref> {
        if self.entries.is_empty() {
            return None;
        }

        let outlines_id = refs.gen(RefType::Outlines);
        let item_ids: Vec<Ref> = (0..self.entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        let mut outline = writer.outline(outlines_id);
        outline.first(item_ids[0]);
        outline.last(item_ids[item_ids.len() - 1]);
        outline.count(item_ids.len() as i32);
        outline.finish();

        for (i, entry) in self.entries.iter().enumerate() {
            let Some(page_id) = refs.get(RefType::Page(entry.page_index)) else {
                continue;
            };
            let mut item = writer.outline_item(item_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(item_ids[i - 1]);
            }
            if let Some(next) = item_ids.get(i + 1) {
                item.next(*next);
            }
            item.dest().page(page_id).fit();
        }

        Some(outlines_id)
    }
}
