/// Trailing window (in slots) after `draw_height` during which the slot hash
/// used as the randomness seed stays retrievable. Past this window a match can
/// no longer be drawn and is treated as finished.
pub const SEED_WINDOW: u64 = 256;

/// Upper bound on the number of single draws one batch call may request.
pub const MAX_BATCH_DRAWS: u8 = 16;

/// Maximum byte length of a match id (it doubles as a PDA seed).
pub const MAX_MATCH_ID_LEN: usize = 32;

/// Maximum number of distinct depositors per match. The player ledger and the
/// eligibility pool both live inside the match account, so this bounds its size.
pub const MAX_PLAYERS: usize = 64;

/// Sentinel for "no per-address ticket cap".
pub const CAP_UNLIMITED: u64 = u64::MAX;

/// PDA seed for the global payment-token vault.
pub const PAY_VAULT_SEED: &[u8] = b"pay_vault";

/// PDA seed prefix for per-match reward-token vaults.
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
