//! Convert CrazyStone "Record Analysis List" printouts (XPS/OXPS archives)
//! into annotated SGF game records.

pub mod board;
pub mod calibration;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod reader;
pub mod record;
pub mod relevance;
pub mod sgf;
pub mod types;

pub use config::ConvertOptions;
pub use convert::{Converter, output_path};
pub use error::ConvertError;
pub use types::{GameMetadata, MoveRecord, MoveToken};
