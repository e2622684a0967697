//! Order salt generation.

use alloy_primitives::U256;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest and one-past-highest salt of the legacy range.
const LEGACY_RANGE: std::ops::Range<u64> = 1..1000;

/// How order salts are drawn.
///
/// `Wide` draws a uniform 256-bit value, which makes collisions between
/// otherwise identical orders negligible. `Legacy` reproduces the 1..=999
/// range earlier clients used, for marketplaces that reject large salts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPolicy {
    #[default]
    Wide,
    Legacy,
}

impl SaltPolicy {
    pub fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> U256 {
        match self {
            SaltPolicy::Wide => U256::from_be_bytes(rng.gen::<[u8; 32]>()),
            SaltPolicy::Legacy => U256::from(rng.gen_range(LEGACY_RANGE)),
        }
    }

    /// Draws from the thread-local CSPRNG.
    pub fn fresh(self) -> U256 {
        self.draw(&mut rand::thread_rng())
    }
}
