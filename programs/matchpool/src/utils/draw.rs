use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::errors::MatchpoolErrorCode;

/// Domain tag for draw seeds. Changing it invalidates reproduction of any
/// historical draw, so it is versioned.
const DRAW_SEED_TAG: &[u8] = b"MATCHPOOL_DRAW_V1";

/// Mixes the slot hash fixed at `draw_height` with the per-match call nonce.
/// The slot hash is unpredictable before the draw height and immutable after
/// it; the nonce makes sequential draws within one match yield distinct seeds.
pub fn derive_draw_seed(slot_hash: &[u8; 32], nonce: u64, match_id: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DRAW_SEED_TAG);
    hasher.update(slot_hash);
    hasher.update(nonce.to_le_bytes());
    hasher.update(match_id.as_bytes());
    hasher.finalize().into()
}

/// Reduces a seed to a uniform target in `[0, total_weight)`.
///
/// The modulo bias over a 64-bit draw is below 2^-40 for any realistic ticket
/// volume and is accepted; selection stays proportional to remaining weight.
pub fn seed_to_target(seed: &[u8; 32], total_weight: u64) -> Result<u64> {
    require!(total_weight > 0, MatchpoolErrorCode::EmptyPlayerList);
    let raw = u64::from_le_bytes(
        seed[0..8]
            .try_into()
            .map_err(|_| MatchpoolErrorCode::AssertInvariantFailed)?,
    );
    Ok(raw % total_weight)
}
