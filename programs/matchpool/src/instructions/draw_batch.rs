use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::slot_hashes;

use crate::errors::MatchpoolErrorCode;
use crate::events::DrawBatchEvent;
use crate::state::creator_balance::CreatorBalance;
use crate::state::match_pool::MatchPool;
use crate::utils::slot_hashes::seed_for_slot;

// -----------------------------------------------------------------------------
// DrawBatch
//
// Up to MAX_BATCH_DRAWS single draws in one call. Requesting more than the
// remaining winning-ticket headroom rejects the whole call up front; running
// out of eligible players mid-batch does not abort. Those slots record the
// null winner sentinel and the call reports how many were actually drawn.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
#[instruction(match_id: String)]
pub struct DrawBatch<'info> {
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

pub fn draw_batch_handler(ctx: Context<DrawBatch>, match_id: String, count: u8) -> Result<()> {
    let pool = &mut ctx.accounts.match_pool;

    let clock = Clock::get()?;
    let height = clock.slot;

    pool.assert_match_id(&match_id)?;
    pool.batch_preconditions(height, count)?;

    let data = ctx.accounts.slot_hashes.data.borrow();
    let slot_hash =
        seed_for_slot(&data, pool.draw_height).ok_or(MatchpoolErrorCode::SeedNotAvailable)?;
    drop(data);

    let balance = &mut ctx.accounts.creator_balance;
    if balance.creator == Pubkey::default() {
        balance.creator = pool.creator;
        balance.bump = ctx.bumps.creator_balance;
        balance._reserved = [0u8; 8];
    }

    let (winners, drawn) = pool.draw_batch_winners(&slot_hash, count)?;

    // House profit: one ticket price per ticket actually drawn.
    let profit = (drawn as u64)
        .checked_mul(pool.ticket_price)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;
    balance.amount = balance
        .amount
        .checked_add(profit)
        .ok_or(MatchpoolErrorCode::MathOverflow)?;

    pool.assert_invariant()?;

    msg!(
        "batch draw for match {}: {} of {} slots filled",
        pool.match_id,
        drawn,
        count
    );

    emit!(DrawBatchEvent {
        match_id,
        winners,
        drawn,
    });

    Ok(())
}
