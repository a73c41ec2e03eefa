use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::PAY_VAULT_SEED;
use crate::errors::MatchpoolErrorCode;
use crate::state::config::Config;
use crate::state::match_pool::MatchPool;
use crate::state::treasury::Treasury;
use crate::utils::transfers::token_transfer_signed;

// -----------------------------------------------------------------------------
// DepositWithdraw
//
// Self-service refund of a player's losing tickets at `ticket_price` each,
// once the match is finished. Winning tickets are retained on the ledger
// until the reward is settled, so this path and `withdraw_reward` may run
// in either order.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct DepositWithdraw<'info> {
    #[account(mut)]
    pub player: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [MatchPool::SEED_PREFIX, match_id.as_bytes()],
        bump = match_pool.bump,
    )]
    pub match_pool: Box<Account<'info, MatchPool>>,

    #[account(
        mut,
        seeds = [Treasury::SEED],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        seeds = [PAY_VAULT_SEED],
        bump,
        constraint = pay_vault.mint == config.pay_mint,
    )]
    pub pay_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = player_pay_ata.owner == player.key(),
        constraint = player_pay_ata.mint == config.pay_mint,
    )]
    pub player_pay_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn deposit_withdraw_handler(ctx: Context<DepositWithdraw>, match_id: String) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;
    let player = ctx.accounts.player.key();

    let clock = Clock::get()?;

    pool.assert_match_id(&match_id)?;
    pool.require_finished(clock.slot)?;

    let amount = pool.settle_refund(&player)?;

    let treasury_bump = ctx.accounts.treasury.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[Treasury::SEED, &[treasury_bump]]];

    token_transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.pay_vault,
        &ctx.accounts.player_pay_ata,
        &ctx.accounts.treasury.to_account_info(),
        signer_seeds,
        amount,
    )?;

    let treasury = &mut ctx.accounts.treasury;
    treasury.total_out = treasury
        .total_out
        .checked_add(amount)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    msg!(
        "deposit withdraw for match {}: {} payment units to {}",
        match_id,
        amount,
        player
    );

    Ok(())
}
