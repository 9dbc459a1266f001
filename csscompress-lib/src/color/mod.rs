//! Colour literal normalization.
//!
//! A literal runs through the enabled [`ColorStage`]s in their fixed order,
//! then any hex code is lowercased. Values that do not look like colours
//! come back unchanged.

mod patterns;
pub mod stages;
pub mod tables;

use std::sync::Arc;

use rayon::prelude::*;

use crate::error::Result;
use crate::options::ColorOptions;

pub use stages::ColorStage;
pub use tables::{ColorTables, SharedColorTables, TableSource};

#[derive(Debug, Clone)]
pub struct ColorNormalizer {
    options: ColorOptions,
    tables: Arc<SharedColorTables>,
}

impl ColorNormalizer {
    pub fn new(options: ColorOptions, tables: Arc<SharedColorTables>) -> Self {
        ColorNormalizer { options, tables }
    }

    /// Normalizer over the process-wide bundled tables.
    pub fn with_global_tables(options: ColorOptions) -> Self {
        Self::new(options, SharedColorTables::global())
    }

    pub fn options(&self) -> ColorOptions {
        self.options
    }

    /// Load the tables now if any enabled stage needs them.
    pub fn preload(&self) -> Result<()> {
        if self.options.needs_tables() {
            self.tables.get()?;
        }
        Ok(())
    }

    /// Shortest form of `value` the enabled stages produce.
    ///
    /// Fails only when a table stage is enabled and the tables cannot be
    /// loaded.
    pub fn normalize(&self, value: &str) -> Result<String> {
        let tables = if self.options.needs_tables() {
            Some(self.tables.get()?)
        } else {
            None
        };

        let mut current = value.to_string();
        for stage in ColorStage::ORDER {
            if !stage.is_enabled(&self.options) {
                continue;
            }
            if let Some(next) = stage.apply(&current, tables.as_deref()) {
                log::trace!("{}: {} -> {}", stage.name(), current, next);
                current = next;
            }
        }

        Ok(stages::lowercase_hex(current))
    }

    pub fn normalize_batch(&self, values: &[&str]) -> Result<Vec<String>> {
        values.par_iter().map(|value| self.normalize(value)).collect()
    }
}
