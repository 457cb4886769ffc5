use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::IndexError;

/// A parsed `(term, doc_id)` posting line, used only as the merge's
/// comparison key; the original line text is re-emitted verbatim through
/// the same parse-then-write path on both sides of a merge.
fn parse_line(line: &str) -> Result<(&str, u64), IndexError> {
    let mut parts = line.splitn(2, ' ');
    let term = parts.next().filter(|s| !s.is_empty()).ok_or_else(|| {
        IndexError::MalformedRunLine {
            line: line.to_string(),
            reason: "missing term field".to_string(),
        }
    })?;
    let doc_id_raw = parts.next().ok_or_else(|| IndexError::MalformedRunLine {
        line: line.to_string(),
        reason: "missing doc-id field".to_string(),
    })?;
    let doc_id = doc_id_raw
        .parse::<u64>()
        .map_err(|_| IndexError::MalformedRunLine {
            line: line.to_string(),
            reason: format!("doc-id {:?} is not a decimal integer", doc_id_raw),
        })?;
    Ok((term, doc_id))
}

/// One line read from an open run file, buffered one at a time so the
/// merge's working set per input is O(1).
struct RunReader {
    lines: std::io::Lines<BufReader<File>>,
    current: Option<String>,
}

impl RunReader {
    fn open(path: &Path) -> Result<Self, IndexError> {
        let file = File::open(path).map_err(|e| IndexError::io(path, e))?;
        let mut lines = BufReader::new(file).lines();
        let current = lines.next().transpose().map_err(|e| IndexError::io(path, e))?;
        Ok(RunReader { lines, current })
    }

    fn advance(&mut self, path: &Path) -> Result<(), IndexError> {
        self.current = self
            .lines
            .next()
            .transpose()
            .map_err(|e| IndexError::io(path, e))?;
        Ok(())
    }
}

/// Repeatedly merges pairs of run files from a FIFO queue until one final
/// sorted run remains. Binary pairwise merge, O(log B) passes over B
/// initial blocks.
pub struct ExternalMerger {
    output_dir: PathBuf,
    next_merge_index: usize,
}

impl ExternalMerger {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ExternalMerger {
            output_dir: output_dir.into(),
            next_merge_index: 0,
        }
    }

    /// Drains `queue` to a single path. If the queue starts with zero or
    /// one entries, returns that entry (or an empty run file) unchanged.
    pub fn run(&mut self, mut queue: VecDeque<PathBuf>) -> Result<PathBuf, IndexError> {
        if queue.is_empty() {
            let path = self.output_dir.join("empty.txt");
            File::create(&path).map_err(|e| IndexError::io(&path, e))?;
            return Ok(path);
        }

        while queue.len() > 1 {
            let a = queue.pop_front().expect("len > 1");
            let b = queue.pop_front().expect("len > 1");
            let merged = self.merge_pair(&a, &b)?;
            queue.push_back(merged);
        }

        Ok(queue.pop_front().expect("non-empty queue"))
    }

    fn next_merged_path(&mut self) -> PathBuf {
        let path = self
            .output_dir
            .join(format!("merged{}.txt", self.next_merge_index));
        self.next_merge_index += 1;
        path
    }

    /// Pairwise merge of two run files into a new `merged{i}.txt`. Reads
    /// one line at a time from each input; the smaller `(term, doc_id)`
    /// key is written first, ties write both (no dedup); the remainder of
    /// whichever input outlasts the other is copied verbatim.
    fn merge_pair(&mut self, a: &Path, b: &Path) -> Result<PathBuf, IndexError> {
        let merged_path = self.next_merged_path();

        let mut reader_a = RunReader::open(a)?;
        let mut reader_b = RunReader::open(b)?;

        if reader_a.current.is_none() || reader_b.current.is_none() {
            let survivor = if reader_a.current.is_none() { b } else { a };
            fs::rename(survivor, &merged_path).map_err(|e| IndexError::io(survivor, e))?;
            return Ok(merged_path);
        }

        let out_file = File::create(&merged_path).map_err(|e| IndexError::io(&merged_path, e))?;
        let mut writer = BufWriter::new(out_file);

        loop {
            let (line_a, line_b) = match (&reader_a.current, &reader_b.current) {
                (Some(la), Some(lb)) => (la.clone(), lb.clone()),
                _ => break,
            };
            let key_a = parse_line(&line_a)?;
            let key_b = parse_line(&line_b)?;

            if (key_a.0, key_a.1) <= (key_b.0, key_b.1) {
                writeln!(writer, "{} {}", key_a.0, key_a.1).map_err(|e| IndexError::io(&merged_path, e))?;
                reader_a.advance(a)?;
            } else {
                writeln!(writer, "{} {}", key_b.0, key_b.1).map_err(|e| IndexError::io(&merged_path, e))?;
                reader_b.advance(b)?;
            }
        }

        let (remaining_reader, remaining_path) = if reader_a.current.is_some() {
            (&mut reader_a, a)
        } else {
            (&mut reader_b, b)
        };
        while let Some(line) = remaining_reader.current.clone() {
            let (term, doc_id) = parse_line(&line)?;
            writeln!(writer, "{} {}", term, doc_id).map_err(|e| IndexError::io(&merged_path, e))?;
            remaining_reader.advance(remaining_path)?;
        }

        writer.flush().map_err(|e| IndexError::io(&merged_path, e))?;
        drop(writer);

        // Intermediates are left on disk until the Materializer completes;
        // the driver's end-of-run cleanup removes them.
        Ok(merged_path)
    }
}
