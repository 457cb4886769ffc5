use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::IndexError;

/// Writes a drained, sorted block to `{output_dir}/block{index}.txt`: one
/// `"<term> <doc_id>\n"` line per posting, UTF-8, LF-terminated. The file
/// is flushed and closed before returning.
pub fn write_run_file(
    output_dir: &Path,
    index: usize,
    postings: &[(String, Vec<u32>)],
) -> Result<PathBuf, IndexError> {
    let path = output_dir.join(format!("block{}.txt", index));
    let file = File::create(&path).map_err(|e| IndexError::io(&path, e))?;
    let mut writer = BufWriter::new(file);

    for (term, doc_ids) in postings {
        for doc_id in doc_ids {
            writeln!(writer, "{} {}", term, doc_id).map_err(|e| IndexError::io(&path, e))?;
        }
    }

    writer.flush().map_err(|e| IndexError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_one_line_per_posting() {
        let dir = TempDir::new().unwrap();
        let postings = vec![
            ("cat".to_string(), vec![0, 2]),
            ("dog".to_string(), vec![1]),
        ];
        let path = write_run_file(dir.path(), 0, &postings).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "cat 0\ncat 2\ndog 1\n");
    }

    #[test]
    fn names_file_by_block_index() {
        let dir = TempDir::new().unwrap();
        let path = write_run_file(dir.path(), 7, &[]).unwrap();
        assert_eq!(path.file_name().unwrap(), "block7.txt");
    }
}
