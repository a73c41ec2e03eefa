use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::PAY_VAULT_SEED;
use crate::errors::MatchpoolErrorCode;
use crate::state::config::Config;
use crate::state::creator_balance::CreatorBalance;
use crate::state::treasury::Treasury;
use crate::utils::transfers::token_transfer_signed;

// -----------------------------------------------------------------------------
// CreatorProfitWithdraw
//
// Pays out the creator's accrued house profit (one ticket price per revealed
// winning ticket, across all of their matches) and resets the balance.
// -----------------------------------------------------------------------------
#[derive(Accounts)]
pub struct CreatorProfitWithdraw<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [CreatorBalance::SEED_PREFIX, creator.key().as_ref()],
        bump = creator_balance.bump,
        constraint = creator_balance.creator == creator.key(),
    )]
    pub creator_balance: Account<'info, CreatorBalance>,

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
        constraint = creator_pay_ata.owner == creator.key(),
        constraint = creator_pay_ata.mint == config.pay_mint,
    )]
    pub creator_pay_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn creator_profit_withdraw_handler(ctx: Context<CreatorProfitWithdraw>) -> Result<()> {
    let balance = &mut ctx.accounts.creator_balance;
    require!(balance.amount > 0, MatchpoolErrorCode::EmptyCreatorBalance);

    let amount = balance.amount;
    balance.amount = 0;

    let treasury_bump = ctx.accounts.treasury.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[Treasury::SEED, &[treasury_bump]]];

    token_transfer_signed(
        &ctx.accounts.token_program,
        &ctx.accounts.pay_vault,
        &ctx.accounts.creator_pay_ata,
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
        "creator profit withdraw: {} payment units to {}",
        amount,
        ctx.accounts.creator.key()
    );

    Ok(())
}
