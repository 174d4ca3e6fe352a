use chrono::{SecondsFormat, SubsecRound, Utc};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::FaceTwist;

/// Parameters to deterministically generate a twist sequence to scramble the
/// cube.
///
/// The same parameters always produce the same twists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of twists.
    pub length: u32,
    /// Random seed.
    pub seed: String,
}

impl ScrambleParams {
    /// Generates scramble parameters from the current time and a random
    /// number.
    pub fn new(length: u32) -> Self {
        let time = Utc::now()
            .trunc_subsecs(3)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let random: u64 = rand::rng().random();
        Self::with_seed(length, format!("{time}_{random}"))
    }

    /// Constructs scramble parameters with a known seed.
    pub fn with_seed(length: u32, seed: impl Into<String>) -> Self {
        Self {
            length,
            seed: seed.into(),
        }
    }

    /// Generates the scramble. Each twist is chosen uniformly from the twelve
    /// face twists, independently of the others.
    pub fn generate(&self) -> Vec<FaceTwist> {
        let mut sha256 = Sha256::new();
        sha256.update(self.seed.len().to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let mut rng = rand_chacha::ChaCha12Rng::from_seed(sha256.finalize().into());

        let twists: Vec<FaceTwist> =
            std::iter::from_fn(|| FaceTwist::ALL.choose(&mut rng).copied())
                .take(self.length as usize)
                .collect();
        log::debug!("Generated scramble with seed {:?}", self.seed);
        twists
    }
}
