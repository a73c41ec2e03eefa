use anchor_lang::prelude::*;

/// Cross-match profit accumulator for one creator, in payment-token units.
/// Credited `ticket_price` per revealed winning ticket regardless of which
/// match produced it; zeroed on withdrawal. Created lazily by the first draw
/// that credits it.
#[account]
pub struct CreatorBalance {
    /// Creator wallet this balance belongs to.
    pub creator: Pubkey,

    /// Accrued, not-yet-withdrawn profit.
    pub amount: u64,

    /// PDA bump.
    pub bump: u8,

    /// Reserved for future use.
    pub _reserved: [u8; 8],
}

impl CreatorBalance {
    pub const SEED_PREFIX: &'static [u8] = b"creator";

    pub const SIZE: usize =
        32 + // creator
            8 + // amount
            1 + // bump
            8; // reserved
}
