use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::PAY_VAULT_SEED;
use crate::errors::MatchpoolErrorCode;
use crate::events::DepositEvent;
use crate::state::config::Config;
use crate::state::match_pool::MatchPool;
use crate::state::treasury::Treasury;
use crate::utils::transfers::token_transfer_user;

#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct TicketDeposit<'info> {
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
        constraint = player_pay_ata.owner == player.key(),
        constraint = player_pay_ata.mint == config.pay_mint,
    )]
    pub player_pay_ata: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [PAY_VAULT_SEED],
        bump,
        constraint = pay_vault.mint == config.pay_mint,
    )]
    pub pay_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn ticket_deposit_handler(
    ctx: Context<TicketDeposit>,
    match_id: String,
    amount: u64,
) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;
    let player = ctx.accounts.player.key();

    let clock = Clock::get()?;
    let height = clock.slot;

    // ─────────────────────────────
    // Validation ladder, no state is touched until every rung passes
    // ─────────────────────────────
    pool.assert_match_id(&match_id)?;
    require!(
        height < pool.expiry_height,
        MatchpoolErrorCode::DepositClosed
    );
    require!(amount > 0, MatchpoolErrorCode::ZeroDeposit);
    require!(
        amount % pool.ticket_price == 0,
        MatchpoolErrorCode::IndivisibleDeposit
    );

    let tickets = amount / pool.ticket_price;
    pool.credit_tickets(player, tickets)?;

    // ─────────────────────────────
    // Move the payment into escrow
    // ─────────────────────────────
    token_transfer_user(
        &ctx.accounts.token_program,
        &ctx.accounts.player_pay_ata,
        &ctx.accounts.pay_vault,
        &ctx.accounts.player.to_account_info(),
        amount,
    )?;

    let treasury = &mut ctx.accounts.treasury;
    treasury.total_in = treasury
        .total_in
        .checked_add(amount)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    pool.assert_invariant()?;

    emit!(DepositEvent {
        match_id,
        player,
        deposit_amount: amount,
        ticket_count: tickets,
    });

    Ok(())
}
