use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::REWARD_VAULT_SEED;
use crate::state::match_pool::MatchPool;
use crate::utils::transfers::token_transfer_signed;

// -----------------------------------------------------------------------------
// RewardWithdraw
//
// Pays a winner `winning_count * reward_per_ticket` out of the match's reward
// escrow. Callable by anyone on the player's behalf; funds only ever reach a
// token account owned by the player. This is the only path that separates
// winning tickets out of `ticket_count`, so it must precede a deposit refund
// for a player holding both kinds.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct RewardWithdraw<'info> {
    pub payer: Signer<'info>,

    /// CHECK: the wallet being settled; only used as a ledger key and as the
    /// required owner of `player_reward_ata`.
    pub player: UncheckedAccount<'info>,

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
        constraint = player_reward_ata.owner == player.key(),
        constraint = player_reward_ata.mint == match_pool.reward_mint,
    )]
    pub player_reward_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn reward_withdraw_handler(ctx: Context<RewardWithdraw>, match_id: String) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;
    let player = ctx.accounts.player.key();

    let clock = Clock::get()?;

    pool.assert_match_id(&match_id)?;
    pool.require_finished(clock.slot)?;

    let amount = pool.settle_reward(&player)?;

    let bump = pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[MatchPool::SEED_PREFIX, match_id.as_bytes(), &[bump]]];

    token_transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.reward_vault,
        &ctx.accounts.player_reward_ata,
        &ctx.accounts.match_pool.to_account_info(),
        signer_seeds,
        amount,
    )?;

    msg!(
        "reward withdraw for match {}: {} reward units to {}",
        match_id,
        amount,
        player
    );

    Ok(())
}
