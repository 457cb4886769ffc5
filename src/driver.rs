use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::accumulator::BlockAccumulator;
use crate::block;
use crate::config::Config;
use crate::document::DocumentTable;
use crate::error::IndexError;
use crate::materializer;
use crate::merge::ExternalMerger;
use crate::normalizer::normalize_document;

const OUTPUT_FILE_NAME: &str = "output.txt";

/// Top-level orchestration: enumerate, prepare the output directory, fill
/// and flush blocks document by document, merge, materialize, clean up.
pub fn run(config: &Config) -> Result<(), IndexError> {
    let overall_start = Instant::now();

    let documents = DocumentTable::enumerate(&config.input_dir, config.block_budget_bytes)?;
    print_enumeration_summary(config, &documents);

    prepare_output_dir(&config.output_dir)?;

    let run_paths = build_blocks(config, &documents)?;

    println!("\nMerging {} block(s)...", run_paths.len());
    let merge_start = Instant::now();
    let mut merger = ExternalMerger::new(&config.output_dir);
    let queue: VecDeque<PathBuf> = run_paths.into_iter().collect();
    let merged_path = merger.run(queue)?;
    log::debug!("merge phase took {:?}", merge_start.elapsed());

    let output_path = config.output_dir.join(OUTPUT_FILE_NAME);
    materializer::materialize(&merged_path, &documents, &output_path)?;

    clean_output_dir(&config.output_dir, &output_path)?;

    println!(
        "Done in {:?}. Output written to {}",
        overall_start.elapsed(),
        output_path.display()
    );
    Ok(())
}

fn print_enumeration_summary(config: &Config, documents: &DocumentTable) {
    println!("Input directory: {}", config.input_dir.display());
    println!("Output directory: {}", config.output_dir.display());
    println!("Total number of documents: {}", documents.len());
    println!(
        "Total size of documents: {} bytes ({:.2} KB)",
        documents.total_size_bytes(),
        documents.total_size_bytes() as f64 / 1024.0
    );
    println!(
        "Block size: {} bytes ({:.2} KB)",
        config.block_budget_bytes,
        config.block_budget_bytes as f64 / 1024.0
    );
    println!("Verbose mode: {}", config.verbose);
}

fn prepare_output_dir(output_dir: &Path) -> Result<(), IndexError> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            fs::remove_file(output_dir).map_err(|e| IndexError::OutputDirConflict {
                path: output_dir.to_path_buf(),
                source: e,
            })?;
            fs::create_dir_all(output_dir).map_err(|e| IndexError::OutputDirConflict {
                path: output_dir.to_path_buf(),
                source: e,
            })?;
        } else {
            for entry in fs::read_dir(output_dir).map_err(|e| IndexError::io(output_dir, e))? {
                let entry = entry.map_err(|e| IndexError::io(output_dir, e))?;
                if entry.path().is_file() {
                    fs::remove_file(entry.path()).map_err(|e| IndexError::io(entry.path(), e))?;
                }
            }
        }
    } else {
        fs::create_dir_all(output_dir).map_err(|e| IndexError::io(output_dir, e))?;
    }
    Ok(())
}

/// Fills the accumulator document by document; flushes a block whenever the
/// accumulator reports full, and always flushes a final non-empty block.
fn build_blocks(config: &Config, documents: &DocumentTable) -> Result<Vec<PathBuf>, IndexError> {
    let mut accumulator = BlockAccumulator::new();
    let mut run_paths = Vec::new();
    let mut block_index = 0usize;

    let progress = if documents.is_empty() {
        None
    } else {
        let pb = ProgressBar::new(documents.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    };

    for document in documents.iter() {
        let text = fs::read_to_string(&document.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                IndexError::EncodingError {
                    path: document.path.clone(),
                }
            } else {
                IndexError::io(&document.path, e)
            }
        })?;
        let terms = normalize_document(&text);
        accumulator.add_document(document.doc_id, &terms);

        if let Some(pb) = &progress {
            pb.set_position(document.doc_id as u64 + 1);
            pb.set_message(format!(
                "block {} doc {}",
                block_index, document.doc_id
            ));
        }

        let is_last_document = document.doc_id as usize + 1 == documents.len();
        if accumulator.is_full(config.block_budget_bytes) || is_last_document {
            if !accumulator.is_empty() {
                if config.verbose {
                    println!(
                        "Current block: {}  Current doc ID: {}  block size: {} bytes",
                        block_index,
                        document.doc_id,
                        accumulator.byte_cost()
                    );
                } else {
                    println!("Current block: {}  Current doc ID: {}", block_index, document.doc_id);
                }
                let sorted = accumulator.drain_sorted();
                let path = block::write_run_file(&config.output_dir, block_index, &sorted)?;
                run_paths.push(path);
                block_index += 1;
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("indexing complete");
    }

    Ok(run_paths)
}

fn clean_output_dir(output_dir: &Path, keep: &Path) -> Result<(), IndexError> {
    for entry in fs::read_dir(output_dir).map_err(|e| IndexError::io(output_dir, e))? {
        let entry = entry.map_err(|e| IndexError::io(output_dir, e))?;
        let path = entry.path();
        if path == keep {
            continue;
        }
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| IndexError::io(&path, e))?;
        }
    }
    Ok(())
}
