use std::collections::BTreeMap;
use std::fmt;

/// One parsed rule: selector text plus its declaration body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleBlock {
    /// e.g. "div", ".red,#header"
    pub selector: String,
    /// e.g. "color:red;margin:0;"
    pub details: String,
}

impl RuleBlock {
    pub fn new(selector: impl Into<String>, details: impl Into<String>) -> Self {
        RuleBlock {
            selector: selector.into(),
            details: details.into(),
        }
    }
}

/// A block position together with the parser index it was created under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slot {
    pub(crate) index: usize,
    pub(crate) block: Option<RuleBlock>,
}

/// Rule blocks in source order, addressed by their original index.
///
/// A removed block leaves a hole at its slot. Slots are never compacted, so
/// an index handed out by the parser keeps naming the same block for the
/// whole run and selector/details can never drift apart.
///
/// Slots are kept in ascending index order and only exist for indices the
/// parser actually supplied, so sparse or very large indices cost nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleBlocks {
    slots: Vec<Slot>,
}

impl RuleBlocks {
    pub fn new() -> Self {
        RuleBlocks { slots: Vec::new() }
    }

    /// Build the arena from the parser's two index-aligned mappings.
    ///
    /// An index present on one side only gets an empty string for the other
    /// side. Indices present on neither side get no slot.
    pub fn from_parts(
        selectors: BTreeMap<usize, String>,
        mut details: BTreeMap<usize, String>,
    ) -> Self {
        let mut blocks: BTreeMap<usize, RuleBlock> = selectors
            .into_iter()
            .map(|(index, selector)| {
                let body = details.remove(&index).unwrap_or_default();
                (index, RuleBlock::new(selector, body))
            })
            .collect();
        for (index, body) in details {
            blocks.insert(index, RuleBlock::new(String::new(), body));
        }

        RuleBlocks {
            slots: blocks
                .into_iter()
                .map(|(index, block)| Slot {
                    index,
                    block: Some(block),
                })
                .collect(),
        }
    }

    /// Split back into the two mappings. Holes stay absent from both.
    pub fn into_parts(self) -> (BTreeMap<usize, String>, BTreeMap<usize, String>) {
        let mut selectors = BTreeMap::new();
        let mut details = BTreeMap::new();
        for Slot { index, block } in self.slots {
            if let Some(block) = block {
                selectors.insert(index, block.selector);
                details.insert(index, block.details);
            }
        }
        (selectors, details)
    }

    /// Append a block one index past the last slot and return that index.
    ///
    /// Returns `None`, leaving the arena untouched, once the last slot sits
    /// at `usize::MAX`.
    pub fn push(&mut self, block: RuleBlock) -> Option<usize> {
        let index = match self.slots.last() {
            Some(last) => last.index.checked_add(1)?,
            None => 0,
        };
        self.slots.push(Slot {
            index,
            block: Some(block),
        });
        Some(index)
    }

    fn position(&self, index: usize) -> Option<usize> {
        self.slots.binary_search_by_key(&index, |slot| slot.index).ok()
    }

    pub fn get(&self, index: usize) -> Option<&RuleBlock> {
        self.position(index).and_then(|pos| self.at(pos))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RuleBlock> {
        self.position(index).and_then(|pos| self.at_mut(pos))
    }

    /// Remove the block at `index`, leaving a hole.
    pub fn remove(&mut self, index: usize) -> Option<RuleBlock> {
        self.position(index).and_then(|pos| self.take_at(pos))
    }

    /// Number of slots, holes included.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.block.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live blocks in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RuleBlock)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.block.as_ref().map(|block| (slot.index, block)))
    }

    pub(crate) fn at(&self, pos: usize) -> Option<&RuleBlock> {
        self.slots.get(pos).and_then(|slot| slot.block.as_ref())
    }

    pub(crate) fn at_mut(&mut self, pos: usize) -> Option<&mut RuleBlock> {
        self.slots.get_mut(pos).and_then(|slot| slot.block.as_mut())
    }

    pub(crate) fn take_at(&mut self, pos: usize) -> Option<RuleBlock> {
        self.slots.get_mut(pos).and_then(|slot| slot.block.take())
    }

    /// Parser index of the slot at `pos`.
    pub(crate) fn index_at(&self, pos: usize) -> Option<usize> {
        self.slots.get(pos).map(|slot| slot.index)
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }
}

impl FromIterator<RuleBlock> for RuleBlocks {
    fn from_iter<I: IntoIterator<Item = RuleBlock>>(iter: I) -> Self {
        RuleBlocks {
            slots: iter
                .into_iter()
                .enumerate()
                .map(|(index, block)| Slot {
                    index,
                    block: Some(block),
                })
                .collect(),
        }
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.selector, self.details)
    }
}

impl fmt::Display for RuleBlocks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, block) in self.iter() {
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
