//! Relationship Resolver
//!
//! Links each record to the relative it declares, within one household.

use serde::Serialize;
use tracing::warn;

use crate::components::{Gender, NodeId, Relation};
use crate::names::normalize_name;
use crate::tree::FamilyNode;

/// Outcome counts for one resolution pass. Diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub spouses_linked: usize,
    pub children_linked: usize,
    /// Declared relative not found in the household.
    pub unmatched: usize,
    /// Matched spouse already had one; the declaring record stays a root.
    pub spouse_taken: usize,
    /// Link would have closed a loop of relatives and was dropped.
    pub cycles_rejected: usize,
    /// Relative name present but relationship label not recognized.
    pub unresolvable_type: usize,
}

impl ResolutionReport {
    pub fn absorb(&mut self, other: &ResolutionReport) {
        self.spouses_linked += other.spouses_linked;
        self.children_linked += other.children_linked;
        self.unmatched += other.unmatched;
        self.spouse_taken += other.spouse_taken;
        self.cycles_rejected += other.cycles_rejected;
        self.unresolvable_type += other.unresolvable_type;
    }

    pub fn linked(&self) -> usize {
        self.spouses_linked + self.children_linked
    }
}

/// Resolve declared relatives for one household's nodes, in place.
///
/// The first candidate in scan order whose normalized name equals the
/// declared one, and whose gender the relationship admits, wins. Each
/// record gets at most one owner (the node it attaches to), and a link is
/// refused when the target already sits below the declaring record.
pub fn resolve_household(nodes: &mut [FamilyNode], report: &mut ResolutionReport) {
    let keys: Vec<String> = nodes.iter().map(|n| normalize_name(&n.record.name)).collect();
    let genders: Vec<Gender> = nodes.iter().map(|n| n.record.gender()).collect();
    let mut owner: Vec<Option<NodeId>> = vec![None; nodes.len()];

    for member in 0..nodes.len() {
        let record = &nodes[member].record;
        let Some(relative_name) = record.relative_name() else {
            continue;
        };
        let Some(relative_type) = record.relative_type() else {
            report.unresolvable_type += 1;
            continue;
        };

        let wanted = normalize_name(relative_name);
        let target = (0..nodes.len()).find(|&candidate| {
            candidate != member
                && relative_type.admits(genders[candidate])
                && !wanted.is_empty()
                && keys[candidate] == wanted
        });
        let Some(target) = target else {
            report.unmatched += 1;
            continue;
        };

        let relation = relative_type.relation();
        if relation == Relation::Spousal && nodes[target].spouse.is_some() {
            report.spouse_taken += 1;
            continue;
        }

        if closes_cycle(&owner, NodeId(target), NodeId(member)) {
            warn!(
                record = %nodes[member].record.id,
                relative = %nodes[target].record.id,
                "dropping relative link that would form a cycle"
            );
            report.cycles_rejected += 1;
            continue;
        }

        match relation {
            Relation::Spousal => {
                nodes[target].spouse = Some(NodeId(member));
                report.spouses_linked += 1;
            }
            Relation::ParentChild => {
                nodes[target].children.push(NodeId(member));
                report.children_linked += 1;
            }
        }
        nodes[member].is_root = false;
        owner[member] = Some(NodeId(target));
    }
}

/// True if `member` is `target` or one of its owners, walking upward.
fn closes_cycle(owner: &[Option<NodeId>], target: NodeId, member: NodeId) -> bool {
    let mut cursor = Some(target);
    while let Some(node) = cursor {
        if node == member {
            return true;
        }
        cursor = owner[node.0];
    }
    false
}
