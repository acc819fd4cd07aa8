//! Destinations for finished documents.

use crate::engine::Output;
use crate::ComposeError;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Receives finished documents. A sink only ever sees complete documents.
pub trait OutputSink {
    fn deliver(&mut self, output: &Output) -> Result<(), ComposeError>;
}

/// Keeps documents in memory, in delivery order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    documents: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> MemorySink {
        MemorySink::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The most recent document delivered under `file_name`
    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.documents
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_documents(self) -> Vec<(String, Vec<u8>)> {
        self.documents
    }
}

impl OutputSink for MemorySink {
    fn deliver(&mut self, output: &Output) -> Result<(), ComposeError> {
        self.documents
            .push((output.file_name.clone(), output.bytes.clone()));
        Ok(())
    }
}

/// Writes each document into a directory under its file name.
///
/// The bytes go to a temporary file in the same directory first, which is then renamed
/// into place, so readers never observe a partially written document.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> DirectorySink {
        DirectorySink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where a document named `file_name` ends up
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl OutputSink for DirectorySink {
    fn deliver(&mut self, output: &Output) -> Result<(), ComposeError> {
        std::fs::create_dir_all(&self.dir)?;
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(&output.bytes)?;
        file.as_file().sync_all()?;

        let path = self.path_for(&output.file_name);
        file.persist(&path).map_err(|e| e.error)?;
        debug!("wrote {} bytes to {}", output.bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(name: &str, bytes: &[u8]) -> Output {
        Output {
            file_name: name.to_string(),
            bytes: bytes.to_vec(),
            page_count: 1,
        }
    }

    #[test]
    fn memory_sink_returns_the_latest_delivery() {
        let mut sink = MemorySink::new();
        sink.deliver(&output("Invoice_1.pdf", b"first")).expect("delivers");
        sink.deliver(&output("Invoice_2.pdf", b"other")).expect("delivers");
        sink.deliver(&output("Invoice_1.pdf", b"second")).expect("delivers");
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.get("Invoice_1.pdf"), Some(&b"second"[..]));
        assert_eq!(sink.get("Invoice_3.pdf"), None);
    }

    #[test]
    fn directory_sink_leaves_only_the_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = DirectorySink::new(dir.path().join("out"));
        sink.deliver(&output("Invoice_1.pdf", b"%PDF-1.7")).expect("delivers");

        let names: Vec<String> = std::fs::read_dir(sink.dir())
            .expect("readable")
            .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Invoice_1.pdf"]);
        assert_eq!(
            std::fs::read(sink.path_for("Invoice_1.pdf")).expect("written"),
            b"%PDF-1.7"
        );
    }
}
