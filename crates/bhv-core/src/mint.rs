//! Deterministic generator for suspend tokens and replacement ids.
//!
//! # Determinism strategy
//!
//! The runtime mints two families of identifiers: suspend tokens (one per
//! outstanding suspension) and replacement ids for authored steps that arrive
//! with a blank `sequence_id`/`id`.  Both come from a single `SmallRng` so a
//! seeded runtime produces identical ids run after run — tests can assert on
//! whole event streams instead of masking token fields.
//!
//! Production runtimes seed from OS entropy, which makes tokens unguessable
//! capability strings: a host subsystem can only resume a suspension it was
//! handed the token for.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{BehaviorId, SequenceId, SuspendToken};

/// Seedable source of suspend tokens and fresh ids.
pub struct IdMinter(SmallRng);

impl IdMinter {
    /// Seed from OS entropy (production path).
    pub fn from_entropy() -> Self {
        IdMinter(SmallRng::from_entropy())
    }

    /// Seed deterministically (test path).
    pub fn with_seed(seed: u64) -> Self {
        IdMinter(SmallRng::seed_from_u64(seed))
    }

    /// Mint an opaque 128-bit suspend token.
    pub fn mint_token(&mut self) -> SuspendToken {
        SuspendToken::new(self.hex128())
    }

    /// Mint a replacement id for a blank authored `sequence_id`.
    pub fn mint_sequence_id(&mut self) -> SequenceId {
        SequenceId::new(format!("seq-{}", self.hex64()))
    }

    /// Mint a replacement id for a blank authored step id.
    pub fn mint_behavior_id(&mut self) -> BehaviorId {
        BehaviorId::new(format!("bhv-{}", self.hex64()))
    }

    fn hex64(&mut self) -> String {
        format!("{:016x}", self.0.r#gen::<u64>())
    }

    fn hex128(&mut self) -> String {
        format!("{:016x}{:016x}", self.0.r#gen::<u64>(), self.0.r#gen::<u64>())
    }
}
