// Property-based tests over arbitrary rolls.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::{BTreeMap, HashSet};

use household::systems::tree_size;
use household::{AnalysisConfig, FilterMode, NodeRole, Roll, VoterRecord};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

// Small pools so declared relatives actually collide with names on the roll.
const NAMES: &[&str] = &[
    "Ravi Nair", "RAVI NAIR", "Lata Nair", "Anil Kumar", "Sita", "Mary Joseph", "Joseph Mathew",
    "K. Raman", "Photo Available", "",
];
const HOUSES: &[&str] = &["1", "2", "10", "2A", " 2 ", ""];
const GENDERS: &[&str] = &["Male", "Female", "female", "", "Other"];
// "husbands" and "FATHERS" must stay unresolvable.
const RELATIVE_TYPES: &[&str] = &["Fathers", "Mothers", "Husbands", "husbands", "FATHERS", "Guardian", ""];

#[derive(Debug)]
struct Draft {
    name: usize,
    house: usize,
    gender: usize,
    age: Option<u32>,
    relative: Option<(usize, usize)>,
}

fn arb_draft() -> impl Strategy<Value = Draft> {
    (
        0..NAMES.len(),
        0..HOUSES.len(),
        0..GENDERS.len(),
        proptest::option::of(0u32..100),
        proptest::option::of((0..NAMES.len(), 0..RELATIVE_TYPES.len())),
    )
        .prop_map(|(name, house, gender, age, relative)| Draft {
            name,
            house,
            gender,
            age,
            relative,
        })
}

/// Roll with distinct ids; relations may dangle, repeat or form cycles.
fn arb_roll(max: usize) -> impl Strategy<Value = Vec<VoterRecord>> {
    proptest::collection::vec(arb_draft(), 0..=max).prop_map(|drafts| {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let mut record = VoterRecord::new(i as u64 + 1, NAMES[d.name])
                    .with_house(HOUSES[d.house])
                    .with_gender(GENDERS[d.gender]);
                if let Some(age) = d.age {
                    record = record.with_age(age);
                }
                if let Some((name, kind)) = d.relative {
                    record = record.with_relative(NAMES[name], RELATIVE_TYPES[kind]);
                }
                record
            })
            .collect()
    })
}

/// Records that all declare the previous one as father: a long chain.
fn chain(len: usize) -> Vec<VoterRecord> {
    (0..len)
        .map(|i| {
            let record = VoterRecord::new(i as u64 + 1, format!("Person {}", letters(i)))
                .with_house("7")
                .with_gender("Male");
            match i.checked_sub(1) {
                Some(parent) => record.with_relative(format!("Person {}", letters(parent)), "Fathers"),
                None => record,
            }
        })
        .collect()
}

fn letters(mut n: usize) -> String {
    let mut out = String::new();
    loop {
        out.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            return out;
        }
    }
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn every_record_flattened_exactly_once(records in arb_roll(30)) {
        let roll = Roll::with_defaults(&records).unwrap();

        prop_assert_eq!(roll.voters().len(), records.len());
        let ids: HashSet<&str> = roll.voters().iter().map(|v| v.record.id.0.as_str()).collect();
        prop_assert_eq!(ids.len(), records.len());

        let counted: usize = roll.households().values().map(|h| h.count()).sum();
        prop_assert_eq!(counted, records.len());
    }

    #[test]
    fn every_node_has_exactly_one_place(records in arb_roll(30)) {
        let roll = Roll::with_defaults(&records).unwrap();

        for household in roll.households().values() {
            let mut seen = vec![0usize; household.count()];
            for (id, role) in household.walk() {
                seen[id.0] += 1;
                prop_assert_eq!(role == NodeRole::Root, household.node(id).unwrap().is_root);
            }
            prop_assert!(seen.iter().all(|&n| n == 1), "walk visits {:?}", seen);
        }
    }

    #[test]
    fn influencer_iff_large_root(records in arb_roll(30), threshold in 1u32..6) {
        let config = AnalysisConfig { influence_threshold: threshold, ..Default::default() };
        let roll = Roll::analyze(&records, config).unwrap();

        for household in roll.households().values() {
            for &root in household.tree() {
                let node = household.node(root).unwrap();
                let size = tree_size(household, root);
                prop_assert!(size as usize <= household.subtree_size(root));
                prop_assert_eq!(node.is_influencer, size >= threshold);
                prop_assert_eq!(node.influence_score, (size >= threshold).then_some(size));
            }
            for node in household.nodes().iter().filter(|n| !n.is_root) {
                prop_assert!(!node.is_influencer);
                prop_assert!(node.influence_score.is_none());
            }
        }
    }

    #[test]
    fn inexact_relative_labels_never_link(records in arb_roll(30)) {
        let roll = Roll::with_defaults(&records).unwrap();

        for voter in roll.voters() {
            let label = voter.record.relative_type.as_deref();
            if !matches!(label, Some("Husbands" | "Wives" | "Fathers" | "Mothers")) {
                prop_assert!(voter.is_root, "{:?} linked via {:?}", voter.record.name, label);
            }
        }
    }

    #[test]
    fn voters_sorted_by_household(records in arb_roll(30)) {
        let roll = Roll::with_defaults(&records).unwrap();
        let keys: Vec<_> = roll.voters().iter().map(|v| &v.household).collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn analysis_is_deterministic(records in arb_roll(25)) {
        let first = Roll::with_defaults(&records).unwrap();
        let second = Roll::with_defaults(&records).unwrap();

        prop_assert_eq!(first.voters(), second.voters());
        prop_assert_eq!(first.report(), second.report());
        prop_assert_eq!(
            serde_json::to_value(first.households()).unwrap(),
            serde_json::to_value(second.households()).unwrap()
        );
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn demographics_bounds(records in arb_roll(40)) {
        let stats = Roll::with_defaults(&records).unwrap().demographics();

        prop_assert_eq!(stats.total, records.len());
        prop_assert_eq!(stats.gender.total(), records.len());
        prop_assert!(stats.age_buckets.iter().map(|b| b.count).sum::<usize>() <= records.len());

        prop_assert!(stats.surnames.len() <= 10);
        prop_assert!(stats.surnames.windows(2).all(|pair| pair[0].count >= pair[1].count));
    }

    #[test]
    fn large_family_matches_household_sizes(records in arb_roll(40), min in 1usize..6) {
        let config = AnalysisConfig { large_family_min: min, ..Default::default() };
        let roll = Roll::analyze(&records, config).unwrap();

        let mut sizes: BTreeMap<&str, usize> = BTreeMap::new();
        for voter in roll.voters() {
            *sizes.entry(voter.household.as_str()).or_default() += 1;
        }
        let expected = roll
            .voters()
            .iter()
            .filter(|v| sizes[v.household.as_str()] >= min)
            .count();

        prop_assert_eq!(roll.filter(FilterMode::LargeFamily).len(), expected);
    }

    #[test]
    fn filters_are_subsequences(records in arb_roll(30)) {
        let roll = Roll::with_defaults(&records).unwrap();

        for mode in FilterMode::ALL_MODES {
            let picked = roll.filter(mode);
            let mut rest = roll.voters().iter();
            for voter in picked {
                prop_assert!(rest.any(|v| std::ptr::eq(v, voter)), "{} reordered voters", mode);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deep trees
// ---------------------------------------------------------------------------

#[test]
fn long_chain_is_one_tree() {
    let records = chain(2_000);
    let roll = Roll::with_defaults(&records).unwrap();

    let household = roll.household("7").unwrap();
    assert_eq!(household.tree().len(), 1);
    assert_eq!(household.subtree_size(household.tree()[0]), 2_000);
    assert_eq!(roll.summary().influencers, 1);
}
