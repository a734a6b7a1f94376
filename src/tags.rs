//! Tag set resolution for the "Other tags..." sub-menu

use std::collections::{BTreeSet, HashSet};

/// Every known tag that isn't a quick tag, in ordinal order, capped at `limit`
///
/// Tag identity is the exact name: no case folding, no trimming. The result depends
/// only on the contents of the two inputs, never on the order they are given in.
pub fn other_tags<'a, A, Q>(all_known: A, quick: Q, limit: usize) -> Vec<String>
where
    A: IntoIterator<Item = &'a str>,
    Q: IntoIterator<Item = &'a str>,
{
    if limit == 0 {
        return Vec::new();
    }

    let quick: HashSet<&str> = quick.into_iter().collect();

    all_known
        .into_iter()
        .filter(|name| !quick.contains(name))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .take(limit)
        .map(str::to_owned)
        .collect()
}
