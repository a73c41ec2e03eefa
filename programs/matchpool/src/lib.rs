use anchor_lang::prelude::*;
use solana_security_txt::security_txt;

// -----------------------------------------------------------------------------
// Program ID
// -----------------------------------------------------------------------------
declare_id!("2smrANNKueN3Q7UL6FUGyMUxSJYs1esoomFoQsSPqeWg");

security_txt! {
    name: "Matchpool",
    project_url: "https://matchpool.games",
    source_code: "https://github.com/matchpool-labs/matchpool-anchor",
    contacts: "mailto:security@matchpool.games, https://twitter.com/matchpoolgames",
    policy: "https://github.com/matchpool-labs/matchpool-anchor/blob/main/SECURITY.md",
    preferred_languages: "en"
}


// -----------------------------------------------------------------------------
// Modules
// -----------------------------------------------------------------------------
pub mod state;
pub mod instructions;
pub mod utils;
pub mod errors;
pub mod constants;
pub mod events;

use instructions::*;

// -----------------------------------------------------------------------------
// Program Entrypoints
// -----------------------------------------------------------------------------
#[program]
pub mod matchpool {
    use super::*;

    // -------------------------------------------------------------------------
    // initialize
    // -------------------------------------------------------------------------
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        initialize_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // create_match
    // -------------------------------------------------------------------------
    pub fn create_match(
        ctx: Context<MatchCreate>,
        match_id: String,
        expiry_height: u64,
        draw_height: u64,
        max_winning: u32,
        ticket_price: u64,
        reward_per_ticket: u64,
        cap_per_address: Option<u64>,
    ) -> Result<()> {
        match_create_handler(
            ctx,
            match_id,
            expiry_height,
            draw_height,
            max_winning,
            ticket_price,
            reward_per_ticket,
            cap_per_address,
        )
    }

    // -------------------------------------------------------------------------
    // deposit
    // -------------------------------------------------------------------------
    pub fn deposit(ctx: Context<TicketDeposit>, match_id: String, amount: u64) -> Result<()> {
        ticket_deposit_handler(ctx, match_id, amount)
    }

    // -------------------------------------------------------------------------
    // draw_one
    // -------------------------------------------------------------------------
    pub fn draw_one(ctx: Context<DrawOne>, match_id: String) -> Result<()> {
        draw_one_handler(ctx, match_id)
    }

    // -------------------------------------------------------------------------
    // draw_batch
    // -------------------------------------------------------------------------
    pub fn draw_batch(ctx: Context<DrawBatch>, match_id: String, count: u8) -> Result<()> {
        draw_batch_handler(ctx, match_id, count)
    }

    // -------------------------------------------------------------------------
    // withdraw_reward
    // -------------------------------------------------------------------------
    pub fn withdraw_reward(ctx: Context<RewardWithdraw>, match_id: String) -> Result<()> {
        reward_withdraw_handler(ctx, match_id)
    }

    // -------------------------------------------------------------------------
    // withdraw_deposit
    // -------------------------------------------------------------------------
    pub fn withdraw_deposit(ctx: Context<DepositWithdraw>, match_id: String) -> Result<()> {
        deposit_withdraw_handler(ctx, match_id)
    }

    // -------------------------------------------------------------------------
    // withdraw_creator_profit
    // -------------------------------------------------------------------------
    pub fn withdraw_creator_profit(ctx: Context<CreatorProfitWithdraw>) -> Result<()> {
        creator_profit_withdraw_handler(ctx)
    }

    // -------------------------------------------------------------------------
    // withdraw_creator_deposit
    // -------------------------------------------------------------------------
    pub fn withdraw_creator_deposit(
        ctx: Context<CreatorDepositWithdraw>,
        match_id: String,
    ) -> Result<()> {
        creator_deposit_withdraw_handler(ctx, match_id)
    }
}
