use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::color::{ColorNormalizer, SharedColorTables};
use crate::details::{normalize_colors, remove_multiple_definitions};
use crate::error::Result;
use crate::options::CompressOptions;
use crate::organize::reduce_until_stable;
use crate::rules::RuleBlocks;

/// One configured compression run over parsed rule blocks.
#[derive(Debug, Clone)]
pub struct Compressor {
    options: CompressOptions,
    normalizer: ColorNormalizer,
}

impl Compressor {
    /// Compressor over the bundled colour tables.
    ///
    /// Loads the tables up front when a colour option needs them, so a
    /// resource failure aborts the run before anything is converted.
    pub fn new(options: CompressOptions) -> Result<Self> {
        Self::with_tables(options, SharedColorTables::global())
    }

    pub fn with_tables(options: CompressOptions, tables: Arc<SharedColorTables>) -> Result<Self> {
        let normalizer = ColorNormalizer::new(options.color(), tables);
        normalizer.preload()?;
        Ok(Compressor {
            options,
            normalizer,
        })
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    pub fn normalizer(&self) -> &ColorNormalizer {
        &self.normalizer
    }

    pub fn compress(&self, mut blocks: RuleBlocks) -> Result<RuleBlocks> {
        let before = blocks.len();

        if !self.options.order_important {
            reduce_until_stable(
                &mut blocks,
                self.options.multiple_selectors,
                self.options.multiple_details,
            );
        }

        let rm_multi_define = self.options.rm_multi_define;
        blocks
            .slots_mut()
            .par_iter_mut()
            .filter_map(|slot| slot.block.as_mut())
            .try_for_each(|block| -> Result<()> {
                if rm_multi_define {
                    block.details = remove_multiple_definitions(&block.details);
                }
                block.details = normalize_colors(&block.details, &self.normalizer)?;
                Ok(())
            })?;

        log::debug!("compressed {} rule blocks into {}", before, blocks.len());
        Ok(blocks)
    }

    /// [`Compressor::compress`] over the parser's index-aligned mappings.
    pub fn compress_parts(
        &self,
        selectors: BTreeMap<usize, String>,
        details: BTreeMap<usize, String>,
    ) -> Result<(BTreeMap<usize, String>, BTreeMap<usize, String>)> {
        let blocks = self.compress(RuleBlocks::from_parts(selectors, details))?;
        Ok(blocks.into_parts())
    }
}
