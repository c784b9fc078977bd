//! Demographic Aggregator
//!
//! Age buckets, gender counts and top surnames over any set of records.
//! The same function serves a single household, a polling station and the
//! whole dataset, so local and global figures can never drift apart.

use std::collections::HashMap;

use serde::Serialize;

use crate::components::{Gender, VoterRecord};
use crate::config::AnalysisConfig;
use crate::names::surname_of;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
    pub other: usize,
}

impl GenderCounts {
    fn record(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.male + self.female + self.other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub total: usize,
    /// One entry per configured bucket, in configured order.
    pub age_buckets: Vec<NamedCount>,
    pub gender: GenderCounts,
    /// Most frequent first; equal counts keep first-seen order.
    pub surnames: Vec<NamedCount>,
}

/// Chart-ready shape shared with the data store's precomputed summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicsView {
    pub age_data: Vec<NamedCount>,
    pub gender_data: Vec<NamedValue>,
    pub surname_data: Vec<NamedCount>,
}

impl Demographics {
    pub fn compute<'a, I>(voters: I, config: &AnalysisConfig) -> Self
    where
        I: IntoIterator<Item = &'a VoterRecord>,
    {
        let mut total = 0;
        let mut buckets = vec![0usize; config.age_buckets.len()];
        let mut gender = GenderCounts::default();
        let mut surnames = SurnameTally::default();

        for voter in voters {
            total += 1;

            let age = voter.age_years();
            if let Some(slot) = config.age_buckets.iter().position(|bucket| bucket.contains(age)) {
                buckets[slot] += 1;
            }

            gender.record(voter.gender());

            if let Some(surname) = surname_of(&voter.name, config.surname_min_len) {
                surnames.add(surname);
            }
        }

        let age_buckets = config
            .age_buckets
            .iter()
            .zip(buckets)
            .map(|(bucket, count)| NamedCount {
                name: bucket.label.clone(),
                count,
            })
            .collect();

        Self {
            total,
            age_buckets,
            gender,
            surnames: surnames.top(config.surname_limit),
        }
    }

    /// Gender entries with a zero count are left out of the chart.
    pub fn chart(&self) -> DemographicsView {
        let gender_data = [
            (Gender::Male, self.gender.male),
            (Gender::Female, self.gender.female),
            (Gender::Other, self.gender.other),
        ]
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(gender, value)| NamedValue {
            name: gender.as_str().to_string(),
            value,
        })
        .collect();

        DemographicsView {
            age_data: self.age_buckets.clone(),
            gender_data,
            surname_data: self.surnames.clone(),
        }
    }
}

/// Counts in first-seen order so the stable sort keeps ties deterministic.
#[derive(Default)]
struct SurnameTally {
    order: Vec<NamedCount>,
    index: HashMap<String, usize>,
}

impl SurnameTally {
    fn add(&mut self, surname: String) {
        match self.index.get(&surname) {
            Some(&slot) => self.order[slot].count += 1,
            None => {
                self.index.insert(surname.clone(), self.order.len());
                self.order.push(NamedCount {
                    name: surname,
                    count: 1,
                });
            }
        }
    }

    fn top(mut self, limit: usize) -> Vec<NamedCount> {
        self.order.sort_by(|a, b| b.count.cmp(&a.count));
        self.order.truncate(limit);
        self.order
    }
}
