//! Core of a CSS compressor: rule block merging and colour literal
//! normalization.
//!
//! Parsing CSS into rule blocks and printing them back out happen elsewhere;
//! this crate takes the parser's selector/declaration pairs, merges
//! redundant blocks, and rewrites colour literals into their shortest form.
//!
//! # Example
//!
//! ```
//! use csscompress_lib::{CompressOptions, Compressor, RuleBlock, RuleBlocks};
//!
//! let blocks: RuleBlocks = vec![
//!     RuleBlock::new("p", "color:rgb(255,255,255);"),
//!     RuleBlock::new("a", "color:rgb(255,255,255);"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let compressor = Compressor::new(CompressOptions::default())?;
//! let out = compressor.compress(blocks)?;
//! assert_eq!(out.to_string(), "p,a{color:#fff;}");
//! # Ok::<(), csscompress_lib::Error>(())
//! ```

pub mod color;
pub mod compress;
pub mod details;
pub mod options;
pub mod organize;
pub mod rules;

mod error;

pub use color::{ColorNormalizer, ColorStage, ColorTables, SharedColorTables, TableSource};
pub use compress::Compressor;
pub use error::{Error, Result};
pub use options::{ColorOptions, CompressOptions};
pub use organize::{organize, organize_parts};
pub use rules::{RuleBlock, RuleBlocks};
