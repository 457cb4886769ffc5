pub mod accumulator;
pub mod block;
pub mod config;
pub mod document;
pub mod driver;
pub mod error;
pub mod materializer;
pub mod merge;
pub mod normalizer;

pub use config::{BlockSizeUnit, Config};
pub use error::IndexError;
