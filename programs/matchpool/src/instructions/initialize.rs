use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::PAY_VAULT_SEED;
use crate::state::config::Config;
use crate::state::treasury::Treasury;

// -----------------------------------------------------------------------------
// Initialize
//
// One-shot bootstrap: creates the global Config, the Treasury PDA and the
// payment-token vault it controls. Every match created afterwards prices its
// tickets in `pay_mint`.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Global config PDA.
    #[account(
        init,
        payer = authority,
        space = 8 + Config::SIZE,
        seeds = [Config::SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Treasury PDA, authority over the payment vault.
    #[account(
        init,
        payer = authority,
        space = 8 + Treasury::SIZE,
        seeds = [Treasury::SEED],
        bump
    )]
    pub treasury: Account<'info, Treasury>,

    pub pay_mint: Account<'info, Mint>,

    /// Vault holding the payment-token escrow of every match.
    #[account(
        init,
        payer = authority,
        seeds = [PAY_VAULT_SEED],
        bump,
        token::mint = pay_mint,
        token::authority = treasury,
    )]
    pub pay_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_handler(ctx: Context<Initialize>) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    cfg.authority = ctx.accounts.authority.key();
    cfg.pay_mint = ctx.accounts.pay_mint.key();
    cfg.bump = ctx.bumps.config;
    cfg.version = 1;
    cfg._reserved = [0u8; 16];

    let treasury = &mut ctx.accounts.treasury;
    treasury.bump = ctx.bumps.treasury;
    treasury.version = 1;
    treasury.total_in = 0;
    treasury.total_out = 0;
    treasury._reserved = [0u8; 16];

    msg!("matchpool initialized, pay mint {}", cfg.pay_mint);
    Ok(())
}
