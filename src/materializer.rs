use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::document::DocumentTable;
use crate::error::IndexError;

/// Rewrites the final merged run, replacing each numeric doc-id with the
/// document's original basename, producing `output.txt`.
pub fn materialize(
    merged_run_path: &Path,
    documents: &DocumentTable,
    output_path: &Path,
) -> Result<(), IndexError> {
    let in_file = File::open(merged_run_path).map_err(|e| IndexError::io(merged_run_path, e))?;
    let reader = BufReader::new(in_file);

    let out_file = File::create(output_path).map_err(|e| IndexError::io(output_path, e))?;
    let mut writer = BufWriter::new(out_file);

    for line in reader.lines() {
        let line = line.map_err(|e| IndexError::io(merged_run_path, e))?;
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, ' ');
        let term = parts.next().ok_or_else(|| IndexError::MalformedRunLine {
            line: line.clone(),
            reason: "missing term field".to_string(),
        })?;
        let doc_id_raw = parts.next().ok_or_else(|| IndexError::MalformedRunLine {
            line: line.clone(),
            reason: "missing doc-id field".to_string(),
        })?;
        let doc_id: u32 = doc_id_raw
            .parse()
            .map_err(|_| IndexError::MalformedRunLine {
                line: line.clone(),
                reason: format!("doc-id {:?} is not a decimal integer", doc_id_raw),
            })?;
        let name = documents.name_of(doc_id)?;
        writeln!(writer, "{} {}", term, name).map_err(|e| IndexError::io(output_path, e))?;
    }

    writer.flush().map_err(|e| IndexError::io(output_path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn replaces_doc_ids_with_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(dir.path().join("b.txt"), "y").unwrap();
        let documents = DocumentTable::enumerate(dir.path(), 1024).unwrap();

        let run_path = dir.path().join("merged.txt");
        fs::write(&run_path, "cat 0\ndog 1\n").unwrap();

        let output_path = dir.path().join("output.txt");
        materialize(&run_path, &documents, &output_path).unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents, "cat a.txt\ndog b.txt\n");
    }

    #[test]
    fn empty_run_produces_empty_output() {
        let dir = TempDir::new().unwrap();
        let documents = DocumentTable::enumerate(dir.path(), 1024).unwrap();

        let run_path = dir.path().join("merged.txt");
        fs::write(&run_path, "").unwrap();

        let output_path = dir.path().join("output.txt");
        materialize(&run_path, &documents, &output_path).unwrap();

        let contents = fs::read_to_string(&output_path).unwrap();
        assert_eq!(contents, "");
    }
}
