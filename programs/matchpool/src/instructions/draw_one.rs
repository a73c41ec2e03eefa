use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::errors::MatchpoolErrorCode;
use crate::events::DrawEvent;
use crate::state::creator_balance::CreatorBalance;
use crate::state::match_pool::MatchPool;
use crate::utils::draw::{derive_draw_seed, seed_to_target};
use crate::utils::slot_hashes::seed_for_slot;

// -----------------------------------------------------------------------------
// DrawOne
//
// Reveals one winning ticket. Anyone may crank this once the draw-height block
// exists; the outcome is fixed by that block's hash and the per-match nonce,
// so the caller has no influence on the result. Each revealed ticket credits
// `ticket_price` of house profit to the match creator's balance.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct DrawOne<'info> {
    #[account(mut)]
    pub cranker: Signer<'info>,

    #[account(
        mut,
        seeds = [MatchPool::SEED_PREFIX, match_id.as_bytes()],
        bump = match_pool.bump,
    )]
    pub match_pool: Box<Account<'info, MatchPool>>,

    #[account(
        init_if_needed,
        payer = cranker,
        space = 8 + CreatorBalance::SIZE,
        seeds = [CreatorBalance::SEED_PREFIX, match_pool.creator.as_ref()],
        bump,
    )]
    pub creator_balance: Account<'info, CreatorBalance>,

    /// CHECK: address-constrained to the SlotHashes sysvar; parsed manually.
    #[account(address = slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn draw_one_handler(ctx: Context<DrawOne>, match_id: String) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;

    let clock = Clock::get()?;
    let height = clock.slot;

    pool.assert_match_id(&match_id)?;
    pool.draw_preconditions(height)?;

    // The seed is the hash of the draw-height block, fixed before any draw
    // and retrievable for SEED_WINDOW slots after it.
    let data = ctx.accounts.slot_hashes.data.borrow();
    let slot_hash =
        seed_for_slot(&data, pool.draw_height).ok_or(MatchpoolErrorCode::SeedNotAvailable)?;
    drop(data);

    let seed = derive_draw_seed(&slot_hash, pool.draw_nonce, &pool.match_id);
    pool.draw_nonce = pool
        .draw_nonce
        .checked_add(1)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    let target = seed_to_target(&seed, pool.total_weight)?;
    let winner = pool.draw_winner(target)?;

    // ─────────────────────────────
    // House profit: one ticket price per revealed ticket
    // ─────────────────────────────
    let balance = &mut ctx.accounts.creator_balance;
    if balance.creator == Pubkey::default() {
        balance.creator = pool.creator;
        balance.bump = ctx.bumps.creator_balance;
        balance._reserved = [0u8; 8];
    }
    balance.amount = balance
        .amount
        .checked_add(pool.ticket_price)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    pool.assert_invariant()?;

    msg!(
        "draw {}/{} for match {}: winner {}",
        pool.winning_count,
        pool.max_winning,
        pool.match_id,
        winner
    );

    emit!(DrawEvent {
        match_id,
        winner,
        ordinal: pool.winning_count,
        seed,
    });

    Ok(())
}
