use anchor_lang::prelude::*;

/// ---------------------------------------------------------------------------
/// Treasury
/// ---------------------------------------------------------------------------
///
/// Program-owned PDA acting as the authority over the global payment-token
/// vault. Every deposit flows in; refunds and creator profit flow out. The
/// counters are monotonic and exist for analytics / audit only.
#[account]
pub struct Treasury {
    /// PDA bump for deterministic re-derivation.
    pub bump: u8,

    /// Versioning for future migrations.
    pub version: u8,

    /// Total payment-token units ever deposited into the vault.
    pub total_in: u64,

    /// Total payment-token units ever paid out of the vault.
    pub total_out: u64,

    /// Padding / reserved bytes for future use.
    pub _reserved: [u8; 16],
}

impl Treasury {
    pub const SEED: &'static [u8] = b"treasury";

    pub const SIZE: usize =
        1 +  // bump
            1 +  // version
            8 +  // total_in
            8 +  // total_out
            16;  // reserved
    // When allocating:
    // space = 8 (discriminator) + Treasury::SIZE
}
