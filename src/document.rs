use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::IndexError;

/// A single input file: its assigned doc-id, basename, and byte size.
#[derive(Debug, Clone)]
pub struct Document {
    pub doc_id: u32,
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Enumeration of an input directory: doc-ids form a contiguous `[0, N)`
/// range assigned in sorted-filename order. Immutable after construction.
#[derive(Debug)]
pub struct DocumentTable {
    documents: Vec<Document>,
}

impl DocumentTable {
    /// Scans `input_dir` non-recursively in sorted filename order, skipping
    /// symbolic links, assigning doc-ids in enumeration order. Fatal if any
    /// file is at or over `block_budget_bytes`, or if any basename contains
    /// whitespace.
    pub fn enumerate(input_dir: &Path, block_budget_bytes: u64) -> Result<Self, IndexError> {
        if !input_dir.is_dir() {
            return Err(IndexError::MissingInputDir(input_dir.to_path_buf()));
        }

        let mut entries: Vec<PathBuf> = WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.path_is_symlink() && e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        entries.sort();

        let mut documents = Vec::with_capacity(entries.len());
        for (doc_id, path) in entries.into_iter().enumerate() {
            let name = path
                .file_name()
                .expect("enumerated entry always has a file name")
                .to_string_lossy()
                .into_owned();

            if name.chars().any(|c| c.is_ascii_whitespace()) {
                return Err(IndexError::WhitespaceDocumentName { name });
            }

            let size = fs::metadata(&path)
                .map_err(|e| IndexError::io(&path, e))?
                .len();
            if size >= block_budget_bytes {
                return Err(IndexError::OversizedDocument {
                    path,
                    size,
                    budget: block_budget_bytes,
                });
            }

            documents.push(Document {
                doc_id: doc_id as u32,
                name,
                path,
                size,
            });
        }

        Ok(DocumentTable { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn total_size_bytes(&self) -> u64 {
        self.documents.iter().map(|d| d.size).sum()
    }

    /// Looks up a document's basename by doc-id. Every doc-id produced by a
    /// successful `enumerate` resolves here; a miss is an internal bug.
    pub fn name_of(&self, doc_id: u32) -> Result<&str, IndexError> {
        self.documents
            .get(doc_id as usize)
            .map(|d| d.name.as_str())
            .ok_or_else(|| {
                IndexError::Internal(format!("doc_id {} has no entry in the document table", doc_id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn assigns_contiguous_ids_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "b.txt", "b");
        write_file(dir.path(), "a.txt", "a");
        let table = DocumentTable::enumerate(dir.path(), 1024).unwrap();
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(table.iter().map(|d| d.doc_id).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn rejects_oversized_document() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "big.txt", "0123456789");
        let err = DocumentTable::enumerate(dir.path(), 5).unwrap_err();
        assert!(matches!(err, IndexError::OversizedDocument { .. }));
    }

    #[test]
    fn rejects_whitespace_in_name() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "has space.txt", "x");
        let err = DocumentTable::enumerate(dir.path(), 1024).unwrap_err();
        assert!(matches!(err, IndexError::WhitespaceDocumentName { .. }));
    }

    #[test]
    fn rejects_missing_input_dir() {
        let err = DocumentTable::enumerate(Path::new("/no/such/dir"), 1024).unwrap_err();
        assert!(matches!(err, IndexError::MissingInputDir(_)));
    }
}
