//! Random record generation
//!
//! Values are drawn uniformly from fixed inclusive ranges. The random source
//! is always injected so that a fixed seed reproduces a run exactly.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::Record;

/// Age range in years
pub const AGE_RANGE: RangeInclusive<u32> = 18..=99;

/// Heart rate range in beats per minute
pub const HEART_RATE_RANGE: RangeInclusive<u32> = 50..=140;

/// Oxygen saturation range in percent
pub const OXYGEN_SATURATION_RANGE: RangeInclusive<u32> = 85..=100;

/// Format a sequence number as `ID-NNN`
///
/// Numbers above 999 render with more than three digits and no longer match
/// the id pattern.
pub fn format_id(n: u32) -> String {
    format!("ID-{n:03}")
}

pub fn format_age_group(age: u32) -> String {
    format!("{age} Anos")
}

pub fn format_heart_rate(bpm: u32) -> String {
    format!("{bpm:03}ppm")
}

pub fn format_oxygen_saturation(percent: u32) -> String {
    format!("{percent}%")
}

/// Generate the record for sequence number `n`
///
/// Draw order is age, heart rate, oxygen saturation.
pub fn generate_record<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Record {
    let age = rng.gen_range(AGE_RANGE);
    let bpm = rng.gen_range(HEART_RATE_RANGE);
    let spo2 = rng.gen_range(OXYGEN_SATURATION_RANGE);

    Record {
        id: format_id(n),
        age_group: format_age_group(age),
        heart_rate: format_heart_rate(bpm),
        oxygen_saturation: format_oxygen_saturation(spo2),
    }
}

/// Generate records for sequence numbers `1..=count`
pub fn generate_records<R: Rng + ?Sized>(count: u32, rng: &mut R) -> Vec<Record> {
    (1..=count).map(|n| generate_record(n, rng)).collect()
}

/// Record generator owning its random source
pub struct RecordGenerator {
    rng: StdRng,
    seed: Option<u64>,
}

impl RecordGenerator {
    /// Create a generator, seeded when `seed` is given and from OS entropy
    /// otherwise
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!("Record generator initialized (seed: {:?})", seed);
        Self { rng, seed }
    }

    /// Create a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Seed in use, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate one record
    pub fn record(&mut self, n: u32) -> Record {
        generate_record(n, &mut self.rng)
    }

    /// Generate `count` records numbered from 1
    pub fn generate(&mut self, count: u32) -> Vec<Record> {
        generate_records(count, &mut self.rng)
    }
}
