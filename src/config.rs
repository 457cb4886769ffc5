use std::path::PathBuf;

use crate::error::IndexError;

/// Block size unit, parsed case-insensitively from the CLI's `-u` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSizeUnit {
    Kilo,
    Mega,
    Giga,
}

impl BlockSizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            BlockSizeUnit::Kilo => 1024,
            BlockSizeUnit::Mega => 1024 * 1024,
            BlockSizeUnit::Giga => 1024 * 1024 * 1024,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "K" => Some(BlockSizeUnit::Kilo),
            "M" => Some(BlockSizeUnit::Mega),
            "G" => Some(BlockSizeUnit::Giga),
            _ => None,
        }
    }
}

/// Source-agnostic, validated pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub block_budget_bytes: u64,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub verbose: bool,
}

impl Config {
    pub fn new(
        size: u64,
        unit: BlockSizeUnit,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        verbose: bool,
    ) -> Result<Self, IndexError> {
        if size == 0 {
            return Err(IndexError::InvalidConfig(size));
        }
        Ok(Config {
            block_budget_bytes: size * unit.multiplier(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            verbose,
        })
    }
}
