use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::shape::{CATALOGUE, Shape};

use super::tray::TRAY_SLOTS;

/// Seed for deterministic shape draws.
///
/// A 128-bit (16-byte) seed used to initialize the random number generator
/// behind [`CatalogueDrawer`]. The same seed produces the same sequence of
/// refill batches, enabling:
///
/// - Reproducible games for debugging
/// - Deterministic testing
///
/// Serializes as a 32-character hex string.
///
/// # Example
///
/// ```
/// use oxiblast_engine::{DrawSeed, GameSession};
/// use rand::Rng as _;
///
/// let seed: DrawSeed = rand::rng().random();
///
/// // Two sessions with the same seed hold the same tray.
/// let a = GameSession::with_seed(seed);
/// let b = GameSession::with_seed(seed);
/// assert_eq!(a.tray().slots(), b.tray().slots());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSeed([u8; 16]);

impl Serialize for DrawSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for DrawSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `DrawSeed` values with `rng.random()`.
impl Distribution<DrawSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DrawSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DrawSeed(seed)
    }
}

/// Source of tray refill batches.
///
/// The session draws through this trait so embedders and tests can inject a
/// deterministic or scripted source; [`CatalogueDrawer`] is the standard
/// implementation.
///
/// Drawers are not required to consider the board: a batch may contain no
/// shape placeable on the current position, in which case the session ends.
pub trait ShapeDrawer {
    /// Draws the next batch of three shapes, in slot order.
    fn draw_three(&mut self) -> [Shape; TRAY_SLOTS];
}

/// Draws uniformly from the fixed catalogue, without replacement per batch.
///
/// Each batch is the prefix of a partial Fisher-Yates shuffle of the
/// catalogue, so the three shapes are always distinct and every ordered
/// triple of distinct shapes is equally likely.
#[derive(Debug, Clone)]
pub struct CatalogueDrawer {
    rng: Pcg32,
}

impl Default for CatalogueDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueDrawer {
    /// Creates a drawer seeded from the OS random source.
    ///
    /// For deterministic draws, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic draws.
    #[must_use]
    pub fn with_seed(seed: DrawSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl ShapeDrawer for CatalogueDrawer {
    fn draw_three(&mut self) -> [Shape; TRAY_SLOTS] {
        let mut pool = CATALOGUE;
        let (drawn, _) = pool.partial_shuffle(&mut self.rng, TRAY_SLOTS);
        [drawn[0], drawn[1], drawn[2]]
    }
}
