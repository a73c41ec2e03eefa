use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{CAP_UNLIMITED, MAX_MATCH_ID_LEN, REWARD_VAULT_SEED};
use crate::errors::MatchpoolErrorCode;
use crate::events::CreateMatchEvent;
use crate::state::config::Config;
use crate::state::match_pool::MatchPool;
use crate::utils::transfers::token_transfer_user;

// -----------------------------------------------------------------------------
// MatchCreate
//
// Creates one match and escrows its full reward pool up front:
// `max_winning * reward_per_ticket` reward-token units move from the creator
// into the per-match vault and stay there until settlement.
//
// Id uniqueness is enforced by `init` on the ["match", match_id] PDA; a
// duplicate id fails account creation atomically. MatchIdOccupied documents
// that condition for clients resolving the failure.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct MatchCreate<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = creator,
        space = 8 + MatchPool::SIZE,
        seeds = [MatchPool::SEED_PREFIX, match_id.as_bytes()],
        bump
    )]
    pub match_pool: Box<Account<'info, MatchPool>>,

    pub reward_mint: Account<'info, Mint>,

    /// Per-match reward escrow, owned by the match PDA.
    #[account(
        init,
        payer = creator,
        seeds = [REWARD_VAULT_SEED, match_id.as_bytes()],
        bump,
        token::mint = reward_mint,
        token::authority = match_pool,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = creator_reward_ata.owner == creator.key(),
        constraint = creator_reward_ata.mint == reward_mint.key(),
    )]
    pub creator_reward_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn match_create_handler(
    ctx: Context<MatchCreate>,
    match_id: String,
    expiry_height: u64,
    draw_height: u64,
    max_winning: u32,
    ticket_price: u64,
    reward_per_ticket: u64,
    cap_per_address: Option<u64>,
) -> Result<()> {
    let clock = Clock::get()?;
    let height = clock.slot;

    // ─────────────────────────────
    // Creation-time validation
    // ─────────────────────────────
    require!(
        !match_id.is_empty() && match_id.len() <= MAX_MATCH_ID_LEN,
        MatchpoolErrorCode::MatchIdLength
    );
    require!(
        height < expiry_height && expiry_height < draw_height,
        MatchpoolErrorCode::InvalidSchedule
    );
    require!(max_winning > 0, MatchpoolErrorCode::ZeroMaxWinning);
    require!(ticket_price > 0, MatchpoolErrorCode::ZeroTicketPrice);

    let cap = cap_per_address.unwrap_or(CAP_UNLIMITED);

    // ─────────────────────────────
    // Escrow the full reward pool
    // ─────────────────────────────
    let escrow = (max_winning as u64)
        .checked_mul(reward_per_ticket)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    token_transfer_user(
        &ctx.accounts.token_program,
        &ctx.accounts.creator_reward_ata,
        &ctx.accounts.reward_vault,
        &ctx.accounts.creator.to_account_info(),
        escrow,
    )?;

    // ─────────────────────────────
    // Initialize the match record
    // ─────────────────────────────
    let pool = &mut ctx.accounts.match_pool;
    pool.match_id = match_id.clone();
    pool.creator = ctx.accounts.creator.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.ticket_price = ticket_price;
    pool.reward_per_ticket = reward_per_ticket;
    pool.expiry_height = expiry_height;
    pool.draw_height = draw_height;
    pool.max_winning = max_winning;
    pool.winning_count = 0;
    pool.cap_per_address = cap;
    pool.total_weight = 0;
    pool.draw_nonce = 0;
    pool.remainder_withdrawn = 0;
    pool.bump = ctx.bumps.match_pool;
    pool.version = MatchPool::VERSION;
    pool.players = Vec::new();
    pool.pool = Vec::new();
    pool._reserved = [0u8; 16];

    emit!(CreateMatchEvent {
        match_id,
        creator: pool.creator,
        expiry_height,
        draw_height,
        max_winning,
        ticket_price,
        reward_per_ticket,
        cap_per_address: cap,
    });

    Ok(())
}
