use anchor_lang::prelude::*;

/// Global configuration PDA.
///
/// Fixes the payment-token mint every match prices its tickets in, and the
/// authority allowed to bootstrap the program. Reward mints are chosen per
/// match. This account holds no funds.
#[account]
pub struct Config {
    /// Program admin authority.
    pub authority: Pubkey,

    /// Mint of the payment token (ticket purchases, refunds, creator profit).
    pub pay_mint: Pubkey,

    /// PDA bump.
    pub bump: u8,

    /// Versioning for future migrations.
    pub version: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 16],
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    /// Serialized size excluding the 8-byte Anchor discriminator.
    pub const SIZE: usize =
        32 + // authority
            32 + // pay_mint
            1 +  // bump
            1 +  // version
            16;  // reserved
}
