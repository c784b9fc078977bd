//! Synthetic voter rolls
//!
//! Seeded generator producing rolls shaped like real extracted ones: heads
//! of household, wives declaring husbands, adult children declaring a
//! parent, the occasional grandparent, plus OCR-style noise.

use rand::rngs::StdRng;
use rand::distributions::Bernoulli;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use crate::components::VoterRecord;
use crate::error::RollError;

const MALE_FIRST_NAMES: &[&str] = &[
    "Anil", "Arun", "Babu", "Biju", "Gopakumar", "Hari", "Jayan", "Krishnan", "Madhu", "Manoj",
    "Mohanan", "Prakash", "Rajesh", "Ramesh", "Sajeev", "Santhosh", "Shaji", "Sreekumar",
    "Sunil", "Suresh", "Unnikrishnan", "Vijayan", "Vinod", "Abdul", "Joseph", "Thomas",
];

const FEMALE_FIRST_NAMES: &[&str] = &[
    "Ambika", "Anitha", "Bindu", "Deepa", "Geetha", "Jaya", "Kumari", "Lakshmi", "Latha",
    "Leela", "Mini", "Preetha", "Radha", "Rema", "Sheeba", "Sindhu", "Sreeja", "Sudha",
    "Suja", "Usha", "Valsala", "Fathima", "Mary", "Rosamma",
];

const FAMILY_NAMES: &[&str] = &[
    "Nair", "Pillai", "Menon", "Kurup", "Panicker", "Warrier", "Varghese", "Kutty", "Thampi",
    "Unnithan", "Nambiar", "Kaimal", "Mathew", "George", "Rahman", "Das",
];

const HEAD_AGE_MEAN: f64 = 52.0;
const HEAD_AGE_SD: f64 = 12.0;
const MIN_VOTING_AGE: u32 = 18;

/// Parameters for one generated roll.
#[derive(Debug, Clone)]
pub struct SyntheticRoll {
    pub households: usize,
    pub seed: u64,
    /// Probability of each noise event (blank house, missing age, unknown relative).
    pub noise: f64,
}

impl Default for SyntheticRoll {
    fn default() -> Self {
        Self {
            households: 100,
            seed: 12345,
            noise: 0.05,
        }
    }
}

impl SyntheticRoll {
    /// Same parameters always yield the same roll.
    pub fn generate(&self) -> Result<Vec<VoterRecord>, RollError> {
        let noise = Bernoulli::new(self.noise)
            .map_err(|e| RollError::InvalidConfig(format!("noise {}: {e}", self.noise)))?;
        let head_age = Normal::new(HEAD_AGE_MEAN, HEAD_AGE_SD)
            .map_err(|e| RollError::InvalidConfig(format!("head age distribution: {e}")))?;

        let mut generator = Generator {
            rng: StdRng::seed_from_u64(self.seed),
            noise,
            head_age,
            records: Vec::with_capacity(self.households * 4),
            next_id: 1,
        };
        for house in 1..=self.households {
            generator.household(house);
        }
        Ok(generator.records)
    }
}

struct Generator {
    rng: StdRng,
    noise: Bernoulli,
    head_age: Normal<f64>,
    records: Vec<VoterRecord>,
    next_id: u64,
}

impl Generator {
    fn household(&mut self, house: usize) {
        let house_number = if self.noisy() {
            String::new()
        } else if self.rng.gen_ratio(1, 8) {
            format!("{house}/{}", self.rng.gen_range(1..4))
        } else {
            house.to_string()
        };
        let family = pick(&mut self.rng, FAMILY_NAMES);

        let head_age = (self.rng.sample(self.head_age).round() as u32).clamp(25, 95);
        let head_name = format!("{} {family}", pick(&mut self.rng, MALE_FIRST_NAMES));

        // Grandfather still on the roll: the head declares him as father
        let grandfather = if head_age < 55 && self.rng.gen_ratio(1, 5) {
            let name = format!("{} {family}", pick(&mut self.rng, MALE_FIRST_NAMES));
            let age = head_age + self.rng.gen_range(20..32);
            self.push(&house_number, &name, age, "Male", None);
            Some(name)
        } else {
            None
        };

        let head_father = match grandfather {
            Some(name) => name,
            None => format!("{} {family}", pick(&mut self.rng, MALE_FIRST_NAMES)),
        };
        self.push(&house_number, &head_name, head_age, "Male", Some((head_father.as_str(), "Fathers")));

        let wife = if self.rng.gen_ratio(4, 5) {
            let name = format!("{} {family}", pick(&mut self.rng, FEMALE_FIRST_NAMES));
            let age = head_age.saturating_sub(self.rng.gen_range(0..8)).max(MIN_VOTING_AGE);
            self.push(&house_number, &name, age, "Female", Some((head_name.as_str(), "Husbands")));
            Some((name, age))
        } else {
            None
        };

        let youngest_parent = wife.as_ref().map_or(head_age, |(_, age)| *age);
        let adult_children = if youngest_parent >= MIN_VOTING_AGE + 20 {
            self.rng.gen_range(0..4)
        } else {
            0
        };
        for _ in 0..adult_children {
            let male = self.rng.gen_bool(0.5);
            let first = if male {
                pick(&mut self.rng, MALE_FIRST_NAMES)
            } else {
                pick(&mut self.rng, FEMALE_FIRST_NAMES)
            };
            let name = format!("{first} {family}");
            let age = self.rng.gen_range(MIN_VOTING_AGE..=youngest_parent - 20);
            let parent = match &wife {
                Some((mother, _)) if self.rng.gen_ratio(1, 3) => (mother.clone(), "Mothers"),
                _ => (head_name.clone(), "Fathers"),
            };
            let gender = if male { "Male" } else { "Female" };
            self.push(&house_number, &name, age, gender, Some((parent.0.as_str(), parent.1)));
        }
    }

    fn push(
        &mut self,
        house_number: &str,
        name: &str,
        age: u32,
        gender: &str,
        relative: Option<(&str, &str)>,
    ) {
        let id = self.next_id;
        self.next_id += 1;

        let mut record = VoterRecord::new(id, name)
            .with_gender(gender)
            .with_voter_id(format!("TRW{:07}", id));
        if !house_number.is_empty() {
            record = record.with_house(house_number);
        }
        if !self.noisy() {
            record = record.with_age(age);
        }
        if let Some((relative_name, relative_type)) = relative {
            let relative_name = if self.noisy() {
                // OCR mangled the relative's name beyond matching
                format!("{relative_name} {}", pick(&mut self.rng, FAMILY_NAMES))
            } else {
                relative_name.to_string()
            };
            record = record.with_relative(relative_name, relative_type);
        }
        self.records.push(record);
    }

    fn noisy(&mut self) -> bool {
        self.rng.sample(self.noise)
    }
}

fn pick(rng: &mut StdRng, names: &'static [&'static str]) -> &'static str {
    names.choose(rng).copied().unwrap_or("Unnamed")
}
