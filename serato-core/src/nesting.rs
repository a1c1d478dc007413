//! Subcrate reconstruction
//!
//! Serato stores every crate as its own file in a flat directory. Nesting is
//! encoded in the file name: `Top%%Mid%%Leaf.crate` is the crate `Leaf`
//! inside `Mid` inside `Top`. The pieces of a split name form the crate's
//! path-key.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::Crate;

/// Separator between nesting levels in a crate name
pub const NESTING_DELIMITER: &str = "%%";

/// Split a crate name into its path-key.
///
/// Splits on every non-overlapping `%%`, left to right. Leading or trailing
/// delimiters give empty pieces, which are kept.
pub fn path_key(name: &str) -> Vec<String> {
    name.split(NESTING_DELIMITER).map(str::to_string).collect()
}

/// Rebuild the crate forest from a flat list of crates.
///
/// Crates are visited in descending path-key order, so every child is attached
/// to its parent before the parent itself is moved. A nested crate whose parent
/// is absent from `crates` is dropped together with its own subcrates.
/// If two crates share a path-key, the later one in `crates` wins.
///
/// Top-level crates and every subcrate list come out in ascending path-key
/// order.
pub fn rebuild_nesting(crates: Vec<Crate>) -> Vec<Crate> {
    let mut by_key: BTreeMap<Vec<String>, Crate> = BTreeMap::new();
    for c in crates {
        let key = path_key(&c.name);
        if let Some(replaced) = by_key.insert(key, c) {
            debug!("Duplicate crate {:?}: keeping the later one", replaced.name);
        }
    }

    let nested: Vec<Vec<String>> = by_key
        .keys()
        .rev()
        .filter(|key| key.len() > 1)
        .cloned()
        .collect();

    for key in nested {
        let Some(mut child) = by_key.remove(&key) else {
            continue;
        };
        let Some((leaf, parent_key)) = key.split_last() else {
            continue;
        };

        match by_key.get_mut(parent_key) {
            Some(parent) => {
                child.name = leaf.clone();
                parent.subcrates.push(child);
            }
            None => debug!(
                "Dropping crate {:?}: parent {:?} does not exist",
                child.name,
                parent_key.join(NESTING_DELIMITER)
            ),
        }
    }

    by_key.into_values().map(into_ascending).collect()
}

// Children were attached in descending order
fn into_ascending(mut c: Crate) -> Crate {
    c.subcrates.reverse();
    c.subcrates = c.subcrates.into_iter().map(into_ascending).collect();
    c
}
