use anchor_lang::prelude::*;

/// Emitted once per successful `create_match`.
#[event]
pub struct CreateMatchEvent {
    pub match_id: String,
    pub creator: Pubkey,
    pub expiry_height: u64,
    pub draw_height: u64,
    pub max_winning: u32,
    pub ticket_price: u64,
    pub reward_per_ticket: u64,
    pub cap_per_address: u64,
}

/// Emitted once per successful deposit. `ticket_count` is the number of
/// tickets bought by this call, not the player's running total.
#[event]
pub struct DepositEvent {
    pub match_id: String,
    pub player: Pubkey,
    pub deposit_amount: u64,
    pub ticket_count: u64,
}

/// Emitted once per revealed winning ticket. `ordinal` is 1-based.
#[event]
pub struct DrawEvent {
    pub match_id: String,
    pub winner: Pubkey,
    pub ordinal: u32,
    pub seed: [u8; 32],
}

/// Emitted once per batch draw. `winners` always has the requested length;
/// slots that ran out of eligible players hold `Pubkey::default()`.
#[event]
pub struct DrawBatchEvent {
    pub match_id: String,
    pub winners: Vec<Pubkey>,
    pub drawn: u8,
}
