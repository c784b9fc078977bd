//! Tree Assembler
//!
//! Partitions a roll by house key and builds each household's forest.

use std::collections::BTreeMap;

use tracing::debug;

use crate::components::{HouseKey, NodeId, VoterRecord};
use crate::systems::resolve::{resolve_household, ResolutionReport};
use crate::tree::{FamilyNode, Household};

/// Group records by house key, keeping input order inside each group,
/// then resolve every household independently.
pub fn assemble_households(
    records: &[VoterRecord],
    report: &mut ResolutionReport,
) -> BTreeMap<HouseKey, Household> {
    let mut grouped: BTreeMap<HouseKey, Vec<&VoterRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.house_key()).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(house_no, members)| {
            let household = assemble_household(house_no.clone(), &members, report);
            (house_no, household)
        })
        .collect()
}

/// Build one household from its members. Nodes are fresh copies, so the
/// input records are never touched.
pub fn assemble_household(
    house_no: HouseKey,
    members: &[&VoterRecord],
    report: &mut ResolutionReport,
) -> Household {
    let mut nodes: Vec<FamilyNode> = members
        .iter()
        .map(|record| FamilyNode::new((*record).clone()))
        .collect();

    let mut local = ResolutionReport::default();
    resolve_household(&mut nodes, &mut local);
    report.absorb(&local);

    let tree: Vec<NodeId> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_root)
        .map(|(index, _)| NodeId(index))
        .collect();

    debug!(
        house = %house_no,
        members = nodes.len(),
        roots = tree.len(),
        linked = local.linked(),
        unmatched = local.unmatched,
        "household assembled"
    );

    Household {
        house_no,
        nodes,
        tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_trimmed_house_number() {
        let records = vec![
            VoterRecord::new(1, "A").with_house("10"),
            VoterRecord::new(2, "B").with_house(" 10 "),
            VoterRecord::new(3, "C").with_house("9"),
            VoterRecord::new(4, "D"),
            VoterRecord::new(5, "E").with_house(""),
        ];
        let mut report = ResolutionReport::default();
        let households = assemble_households(&records, &mut report);

        let keys: Vec<&str> = households.keys().map(HouseKey::as_str).collect();
        assert_eq!(keys, ["9", "10", "Unknown"]);
        assert_eq!(households[&HouseKey::from_raw(Some("10"))].count(), 2);
        assert_eq!(households[&HouseKey::from_raw(None)].count(), 2);
    }

    #[test]
    fn test_relatives_do_not_cross_households() {
        let records = vec![
            VoterRecord::new(1, "Gopal").with_gender("Male").with_house("1"),
            VoterRecord::new(2, "Devi")
                .with_gender("Female")
                .with_house("2")
                .with_relative("Gopal", "Husbands"),
        ];
        let mut report = ResolutionReport::default();
        let households = assemble_households(&records, &mut report);

        assert!(households.values().all(|h| h.tree().len() == 1));
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_roots_keep_grouping_order() {
        let records = vec![
            VoterRecord::new(1, "Zara").with_house("3"),
            VoterRecord::new(2, "Maya").with_gender("Female").with_house("3").with_relative("Zara", "Mothers"),
            VoterRecord::new(3, "Anu").with_house("3"),
        ];
        let mut report = ResolutionReport::default();
        let households = assemble_households(&records, &mut report);
        let household = &households[&HouseKey::from_raw(Some("3"))];

        let roots: Vec<&str> = household.roots().map(|n| n.record.name.as_str()).collect();
        assert_eq!(roots, ["Zara", "Anu"]);
        assert_eq!(household.count(), 3);
    }
}
