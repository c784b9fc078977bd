//! Flattener / Sorter
//!
//! One list of every voter, nested relatives included, in presentation order.

use serde::Serialize;

use crate::components::{HouseKey, NodeRole, VoterRecord};
use crate::names::collate_names;
use crate::tree::Household;

/// A voter row annotated with its place in the household forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedVoter {
    #[serde(flatten)]
    pub record: VoterRecord,
    pub household: HouseKey,
    pub role: NodeRole,
    pub is_root: bool,
    pub is_influencer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influence_score: Option<u32>,
}

pub fn flatten_households<'a, I>(households: I) -> Vec<AnnotatedVoter>
where
    I: IntoIterator<Item = &'a Household>,
{
    let mut voters = Vec::new();
    for household in households {
        for (id, role) in household.walk() {
            let node = household.node_at(id);
            voters.push(AnnotatedVoter {
                record: node.record.clone(),
                household: household.house_no().clone(),
                role,
                is_root: node.is_root,
                is_influencer: node.is_influencer,
                influence_score: node.influence_score,
            });
        }
    }
    sort_voters(&mut voters);
    voters
}

/// House key (natural order), then name. Stable, so walk order breaks ties.
pub fn sort_voters(voters: &mut [AnnotatedVoter]) {
    voters.sort_by(|a, b| {
        a.household
            .cmp(&b.household)
            .then_with(|| collate_names(&a.record.name, &b.record.name))
    });
}
