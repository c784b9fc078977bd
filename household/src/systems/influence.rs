//! Influence Scorer
//!
//! Flags roots heading a large family tree.

use crate::components::NodeId;
use crate::tree::Household;

/// Flag every root whose tree size reaches `threshold`; returns how many
/// were flagged. Spouses and descendants are never flagged themselves.
pub fn score_household(household: &mut Household, threshold: u32) -> usize {
    let sizes: Vec<(NodeId, u32)> = household
        .tree
        .iter()
        .map(|root| (*root, tree_size(household, *root)))
        .collect();

    let mut flagged = 0;
    for (root, size) in sizes {
        let node = &mut household.nodes[root.0];
        if size >= threshold {
            node.is_influencer = true;
            node.influence_score = Some(size);
            flagged += 1;
        } else {
            node.is_influencer = false;
            node.influence_score = None;
        }
    }
    flagged
}

/// `1 + (spouse ? 1 : 0) + Σ tree_size(child)`. A spouse counts once; the
/// spouse's own children and in-laws do not.
pub fn tree_size(household: &Household, root: NodeId) -> u32 {
    let mut size: u32 = 0;
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = household.node(id) else {
            continue;
        };
        size = size.saturating_add(if node.spouse.is_some() { 2 } else { 1 });
        stack.extend(node.children.iter().copied());
    }
    size
}
