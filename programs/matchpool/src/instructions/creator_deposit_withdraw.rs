use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::REWARD_VAULT_SEED;
use crate::errors::MatchpoolErrorCode;
use crate::state::match_pool::MatchPool;
use crate::utils::transfers::token_transfer_signed;

// -----------------------------------------------------------------------------
// CreatorDepositWithdraw
//
// Returns the unused slice of the reward escrow to the creator once the match
// is finished: `(max_winning - winning_count) * reward_per_ticket`. Single
// shot; a second call fails even when the recoverable amount was zero.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct CreatorDepositWithdraw<'info> {
    #[account(
        mut,
        constraint = creator.key() == match_pool.creator @ MatchpoolErrorCode::OnlyCreator,
    )]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [MatchPool::SEED_PREFIX, match_id.as_bytes()],
        bump = match_pool.bump,
    )]
    pub match_pool: Box<Account<'info, MatchPool>>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, match_id.as_bytes()],
        bump,
        constraint = reward_vault.mint == match_pool.reward_mint,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = creator_reward_ata.owner == creator.key(),
        constraint = creator_reward_ata.mint == match_pool.reward_mint,
    )]
    pub creator_reward_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn creator_deposit_withdraw_handler(
    ctx: Context<CreatorDepositWithdraw>,
    match_id: String,
) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;

    let clock = Clock::get()?;

    pool.assert_match_id(&match_id)?;
    pool.require_finished(clock.slot)?;

    let amount = pool.settle_remainder()?;

    let bump = pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[MatchPool::SEED_PREFIX, match_id.as_bytes(), &[bump]]];

    token_transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.creator_reward_ata,
        &ctx.accounts.match_pool.to_account_info(),
        signer_seeds,
        amount,
    )?;

    msg!(
        "creator deposit withdraw for match {}: {} reward units reclaimed",
        match_id,
        amount
    );

    Ok(())
}
