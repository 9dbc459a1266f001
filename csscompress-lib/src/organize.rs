//! Rule block merging.
//!
//! Two passes over the slot range, each pairwise in source order: blocks with
//! byte-identical selectors pool their declarations, then blocks with equal
//! declaration sets pool their selectors. Holes left by earlier merges are
//! skipped, never compacted.
//!
//! A selector list joined by the second pass can equal a selector the first
//! pass already walked past (`a{x:1}` `b{x:1}` `a,b{y:2}`), so [`organize`]
//! repeats both passes until a round merges nothing.

use std::collections::{BTreeMap, HashMap};

use crate::details::split_declarations;
use crate::rules::RuleBlocks;

/// Declarations of one body, counted.
///
/// Two bodies compare equal when every declaration occurs the same number
/// of times in both, whatever the order.
#[derive(Debug, PartialEq, Eq)]
struct DeclarationSet<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> DeclarationSet<'a> {
    fn new(body: &'a str) -> Self {
        let mut counts = HashMap::new();
        for declaration in split_declarations(body) {
            *counts.entry(declaration).or_insert(0) += 1;
        }
        DeclarationSet { counts }
    }
}

/// Run both merge passes until the result is stable. Returns the number of
/// blocks removed.
pub fn organize(blocks: &mut RuleBlocks) -> usize {
    reduce_until_stable(blocks, true, true)
}

/// Repeat the enabled passes until a round removes nothing.
///
/// Every productive round removes at least one block, so this ends after at
/// most as many rounds as there are live blocks.
pub fn reduce_until_stable(blocks: &mut RuleBlocks, selectors: bool, details: bool) -> usize {
    let mut removed = 0;
    loop {
        let mut round = 0;
        if selectors {
            round += reduce_selectors(blocks);
        }
        if details {
            round += reduce_details(blocks);
        }
        if round == 0 {
            return removed;
        }
        removed += round;
    }
}

/// [`organize`] over the parser's index-aligned selector/details mappings.
pub fn organize_parts(
    selectors: BTreeMap<usize, String>,
    details: BTreeMap<usize, String>,
) -> (BTreeMap<usize, String>, BTreeMap<usize, String>) {
    let mut blocks = RuleBlocks::from_parts(selectors, details);
    organize(&mut blocks);
    blocks.into_parts()
}

/// Merge blocks whose selectors are byte-identical.
///
/// The later block's declarations are appended after the earlier block's,
/// so a later declaration of a property still comes last. Returns the number
/// of blocks removed.
pub fn reduce_selectors(blocks: &mut RuleBlocks) -> usize {
    let max = blocks.slot_count();
    let mut removed = 0;

    for i in 0..max {
        if blocks.at(i).is_none() {
            continue;
        }

        for k in (i + 1)..max {
            let same = match (blocks.at(i), blocks.at(k)) {
                (Some(earlier), Some(later)) => earlier.selector == later.selector,
                _ => false,
            };
            if !same {
                continue;
            }

            if let Some(later) = blocks.take_at(k) {
                log::debug!(
                    "merging repeated selector '{}' (block {:?} into {:?})",
                    later.selector,
                    blocks.index_at(k),
                    blocks.index_at(i)
                );
                if let Some(earlier) = blocks.at_mut(i) {
                    earlier.details.push_str(&later.details);
                }
                removed += 1;
            }
        }
    }

    removed
}

/// Merge blocks whose declaration sets are equal into one comma-separated
/// selector list, earlier selector first. Returns the number of blocks
/// removed.
pub fn reduce_details(blocks: &mut RuleBlocks) -> usize {
    let max = blocks.slot_count();
    let mut removed = 0;

    for i in 0..max {
        let Some(current) = blocks.at(i) else {
            continue;
        };
        let body = current.details.clone();
        let declarations = DeclarationSet::new(&body);

        for k in (i + 1)..max {
            let same = blocks
                .at(k)
                .is_some_and(|later| DeclarationSet::new(&later.details) == declarations);
            if !same {
                continue;
            }

            if let Some(later) = blocks.take_at(k) {
                log::debug!(
                    "merging selector '{}' into block {:?} (identical declarations)",
                    later.selector,
                    blocks.index_at(i)
                );
                if let Some(earlier) = blocks.at_mut(i) {
                    earlier.selector.push(',');
                    earlier.selector.push_str(&later.selector);
                }
                removed += 1;
            }
        }
    }

    removed
}
