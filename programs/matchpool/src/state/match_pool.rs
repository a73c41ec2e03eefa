use anchor_lang::prelude::*;

use crate::constants::{CAP_UNLIMITED, MAX_MATCH_ID_LEN, MAX_PLAYERS, SEED_WINDOW};
use crate::errors::MatchpoolErrorCode;
use crate::utils::draw::{derive_draw_seed, seed_to_target};

/// ---------------------------------------------------------------------------
/// MatchPool
/// ---------------------------------------------------------------------------
/// One lottery match: schedule, pricing, the per-player ticket ledger and the
/// compacting pool of draw-eligible entries. The whole per-match ledger lives
/// in this single account because a draw must see every remaining weight in
/// one instruction.
///
/// Two value pools are attached to it externally:
///   - the global payment vault (deposits, refunds, creator profit), and
///   - a per-match reward vault escrowing `max_winning * reward_per_ticket`
///     reward-token units from creation until settlement.
#[account]
pub struct MatchPool {
    /// Unique match id, immutable once created. Doubles as a PDA seed.
    pub match_id: String,

    /// Wallet that created the match and earns `ticket_price` per draw.
    pub creator: Pubkey,

    /// Mint of the reward token escrowed for this match.
    pub reward_mint: Pubkey,

    /// Price of one ticket in payment-token units.
    pub ticket_price: u64,

    /// Reward-token units paid out per winning ticket.
    pub reward_per_ticket: u64,

    /// Deposits are accepted strictly below this height.
    pub expiry_height: u64,

    /// Height whose slot hash seeds the draws. Must exceed `expiry_height`.
    pub draw_height: u64,

    /// Bound on the total number of winning tickets.
    pub max_winning: u32,

    /// Winning tickets revealed so far. Monotone, never exceeds `max_winning`.
    pub winning_count: u32,

    /// Max tickets one address may hold (`u64::MAX` = unlimited).
    pub cap_per_address: u64,

    /// Sum of remaining weights over `pool`. Decreases by one per draw.
    pub total_weight: u64,

    /// Per-call nonce mixed into the seed so sequential draws differ.
    pub draw_nonce: u64,

    /// Set once the creator has recovered the unused reward escrow.
    pub remainder_withdrawn: u8,

    /// PDA bump.
    pub bump: u8,

    /// Version marker for decoding & future migrations.
    pub version: u8,

    /// Ticket/winning counters per depositor, in insertion order.
    pub players: Vec<PlayerRecord>,

    /// Compacting arena of draw-eligible entries. Entries whose weight hits
    /// zero are swap-removed, so order is not stable.
    pub pool: Vec<PoolEntry>,

    /// Reserved for future use.
    pub _reserved: [u8; 16],
}

/// Per-(match, address) counters. `ticket_count` only shrinks on settlement,
/// never on a win itself.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    pub player: Pubkey,
    pub ticket_count: u64,
    pub winning_count: u64,
}

/// One eligibility-pool entry: an address and its unconsumed ticket weight.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub player: Pubkey,
    pub weight: u64,
}

/// Lifecycle phase, derived from heights and counters, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPhase {
    /// Deposits are open.
    Open,
    /// Deposits closed, the draw-height block does not exist yet.
    AwaitingDraw,
    /// The seed is retrievable and draws may proceed.
    SeedAvailable,
    /// All draws done, pool exhausted, or the seed window has lapsed.
    Finished,
}

impl PlayerRecord {
    pub const SIZE: usize =
        32 + // player
            8 + // ticket_count
            8; // winning_count
}

impl PoolEntry {
    pub const SIZE: usize =
        32 + // player
            8; // weight
}

impl MatchPool {
    pub const SEED_PREFIX: &'static [u8] = b"match";
    pub const VERSION: u8 = 1;

    /// Serialized size excluding the 8-byte discriminator, at full capacity.
    pub const SIZE: usize =
        4 + MAX_MATCH_ID_LEN + // match_id
            32 + // creator
            32 + // reward_mint
            8 +  // ticket_price
            8 +  // reward_per_ticket
            8 +  // expiry_height
            8 +  // draw_height
            4 +  // max_winning
            4 +  // winning_count
            8 +  // cap_per_address
            8 +  // total_weight
            8 +  // draw_nonce
            1 +  // remainder_withdrawn
            1 +  // bump
            1 +  // version
            (4 + MAX_PLAYERS * PlayerRecord::SIZE) + // players
            (4 + MAX_PLAYERS * PoolEntry::SIZE) +    // pool
            16;  // reserved

    pub fn phase(&self, height: u64) -> MatchPhase {
        if height < self.expiry_height {
            MatchPhase::Open
        } else if height < self.draw_height {
            MatchPhase::AwaitingDraw
        } else if self.winning_count >= self.max_winning
            || self.total_weight == 0
            || height > self.draw_height.saturating_add(SEED_WINDOW)
        {
            MatchPhase::Finished
        } else {
            MatchPhase::SeedAvailable
        }
    }

    /// The stored id must match the instruction argument the PDA was derived
    /// from; a mismatch means the caller addressed the wrong account.
    pub fn assert_match_id(&self, match_id: &str) -> Result<()> {
        require!(self.match_id == match_id, MatchpoolErrorCode::InvalidMatch);
        Ok(())
    }

    pub fn participant_count(&self) -> u32 {
        self.players.len() as u32
    }

    pub fn player(&self, key: &Pubkey) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.player == *key)
    }

    fn player_mut(&mut self, key: &Pubkey) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().find(|p| p.player == *key)
    }

    pub fn is_unlimited_cap(&self) -> bool {
        self.cap_per_address == CAP_UNLIMITED
    }

    /// Credits `tickets` to `player`, registering the address on its first
    /// deposit. All checks run before any write so a rejection leaves the
    /// ledger untouched.
    pub fn credit_tickets(&mut self, player: Pubkey, tickets: u64) -> Result<()> {
        let held = self.player(&player).map(|p| p.ticket_count).unwrap_or(0);
        let resulting = held
            .checked_add(tickets)
            .ok_or(MatchpoolErrorCode::MathOverflow)?;
        require!(
            resulting <= self.cap_per_address,
            MatchpoolErrorCode::TicketCapExceeded
        );

        let new_weight = self
            .total_weight
            .checked_add(tickets)
            .ok_or(MatchpoolErrorCode::MathOverflow)?;

        match self.player_mut(&player) {
            Some(record) => {
                record.ticket_count = resulting;
                match self.pool.iter_mut().find(|e| e.player == player) {
                    Some(entry) => entry.weight += tickets,
                    None => self.pool.push(PoolEntry {
                        player,
                        weight: tickets,
                    }),
                }
            }
            None => {
                require!(
                    self.players.len() < MAX_PLAYERS,
                    MatchpoolErrorCode::ParticipantListFull
                );
                self.players.push(PlayerRecord {
                    player,
                    ticket_count: tickets,
                    winning_count: 0,
                });
                self.pool.push(PoolEntry {
                    player,
                    weight: tickets,
                });
            }
        }

        self.total_weight = new_weight;
        Ok(())
    }

    /// Ordered precondition ladder for a single draw at `height`. Each rung
    /// is a distinct rejection so callers can tell why a draw is not allowed.
    pub fn draw_preconditions(&self, height: u64) -> Result<()> {
        require!(
            height >= self.expiry_height,
            MatchpoolErrorCode::MatchNotClosed
        );
        require!(
            height >= self.draw_height,
            MatchpoolErrorCode::SeedNotAvailable
        );
        require!(
            height <= self.draw_height.saturating_add(SEED_WINDOW),
            MatchpoolErrorCode::MatchFinished
        );
        require!(!self.pool.is_empty(), MatchpoolErrorCode::EmptyPlayerList);
        require!(
            self.winning_count < self.max_winning,
            MatchpoolErrorCode::MaxWinningReached
        );
        Ok(())
    }

    /// Batch preconditions: the count range and headroom checks are strict
    /// up-front rejections; pool weight is deliberately not pre-checked
    /// (exhaustion mid-batch pads null winners instead).
    pub fn batch_preconditions(&self, height: u64, count: u8) -> Result<()> {
        require!(
            count >= 1 && count <= crate::constants::MAX_BATCH_DRAWS,
            MatchpoolErrorCode::BatchCountOutOfRange
        );
        let headroom = self.max_winning - self.winning_count;
        require!(
            count as u32 <= headroom,
            MatchpoolErrorCode::MaxWinningReached
        );
        require!(
            height >= self.expiry_height,
            MatchpoolErrorCode::MatchNotClosed
        );
        require!(
            height >= self.draw_height,
            MatchpoolErrorCode::SeedNotAvailable
        );
        require!(
            height <= self.draw_height.saturating_add(SEED_WINDOW),
            MatchpoolErrorCode::MatchFinished
        );
        Ok(())
    }

    /// Settlement gate shared by all withdrawal paths.
    pub fn require_finished(&self, height: u64) -> Result<()> {
        match self.phase(height) {
            MatchPhase::Open | MatchPhase::AwaitingDraw => {
                err!(MatchpoolErrorCode::NotFinishedSeedPending)
            }
            MatchPhase::SeedAvailable => err!(MatchpoolErrorCode::MatchNotFinished),
            MatchPhase::Finished => Ok(()),
        }
    }

    /// Consumes one unit of weight at `target` (0-based over the summed pool
    /// weights) and returns the winning address. The winner's entry is
    /// swap-removed once its weight reaches zero.
    pub fn draw_winner(&mut self, target: u64) -> Result<Pubkey> {
        require!(!self.pool.is_empty(), MatchpoolErrorCode::EmptyPlayerList);

        let mut acc: u64 = 0;
        let mut hit: Option<usize> = None;
        for (i, entry) in self.pool.iter().enumerate() {
            acc = acc
                .checked_add(entry.weight)
                .ok_or(MatchpoolErrorCode::MathOverflow)?;
            if target < acc {
                hit = Some(i);
                break;
            }
        }
        let index = hit.ok_or(MatchpoolErrorCode::AssertInvariantFailed)?;

        let winner = self.pool[index].player;
        self.pool[index].weight -= 1;
        if self.pool[index].weight == 0 {
            self.pool.swap_remove(index);
        }

        self.total_weight -= 1;
        self.winning_count += 1;

        let record = self
            .player_mut(&winner)
            .ok_or(MatchpoolErrorCode::AssertInvariantFailed)?;
        record.winning_count += 1;

        Ok(winner)
    }

    /// Runs up to `count` draw slots against the fixed `slot_hash`. Pool
    /// exhaustion (or hitting `max_winning`) mid-batch pads the remaining
    /// slots with the null winner sentinel instead of aborting; the nonce
    /// advances only for slots that actually drew. Returns the full slot
    /// array and the number of non-null winners.
    pub fn draw_batch_winners(
        &mut self,
        slot_hash: &[u8; 32],
        count: u8,
    ) -> Result<(Vec<Pubkey>, u8)> {
        let mut winners: Vec<Pubkey> = Vec::with_capacity(count as usize);
        let mut drawn: u8 = 0;

        for _ in 0..count {
            if self.total_weight == 0 || self.winning_count >= self.max_winning {
                winners.push(Pubkey::default());
                continue;
            }

            let seed = derive_draw_seed(slot_hash, self.draw_nonce, &self.match_id);
            self.draw_nonce = self
                .draw_nonce
                .checked_add(1)
                .ok_or(MatchpoolErrorCode::MathOverflow)?;

            let target = seed_to_target(&seed, self.total_weight)?;
            let winner = self.draw_winner(target)?;

            winners.push(winner);
            drawn += 1;
        }

        Ok((winners, drawn))
    }

    /// Separates a player's winning tickets out of `ticket_count` and returns
    /// the reward-token amount owed.
    pub fn settle_reward(&mut self, player: &Pubkey) -> Result<u64> {
        let reward_per_ticket = self.reward_per_ticket;
        let record = self
            .player_mut(player)
            .ok_or(MatchpoolErrorCode::NoWinningTicket)?;
        require!(record.winning_count > 0, MatchpoolErrorCode::NoWinningTicket);

        let amount = record
            .winning_count
            .checked_mul(reward_per_ticket)
            .ok_or(MatchpoolErrorCode::MathOverflow)?;

        record.ticket_count -= record.winning_count;
        record.winning_count = 0;
        Ok(amount)
    }

    /// Refunds a player's losing tickets and returns the payment-token amount
    /// owed. Winning tickets are retained in `ticket_count` until the reward
    /// is settled, so the two settlement paths may run in either order.
    pub fn settle_refund(&mut self, player: &Pubkey) -> Result<u64> {
        let ticket_price = self.ticket_price;
        let record = self
            .player_mut(player)
            .ok_or(MatchpoolErrorCode::NoLosingTicket)?;
        let losing = record.ticket_count - record.winning_count;
        require!(losing > 0, MatchpoolErrorCode::NoLosingTicket);

        let amount = losing
            .checked_mul(ticket_price)
            .ok_or(MatchpoolErrorCode::MathOverflow)?;

        record.ticket_count = record.winning_count;
        Ok(amount)
    }

    /// Single-shot recovery of the unused reward escrow,
    /// `(max_winning - winning_count) * reward_per_ticket`.
    pub fn settle_remainder(&mut self) -> Result<u64> {
        require!(
            self.remainder_withdrawn == 0,
            MatchpoolErrorCode::RemainderExhausted
        );
        let unused = (self.max_winning - self.winning_count) as u64;
        let amount = unused
            .checked_mul(self.reward_per_ticket)
            .ok_or(MatchpoolErrorCode::MathOverflow)?;
        require!(amount > 0, MatchpoolErrorCode::RemainderExhausted);

        self.remainder_withdrawn = 1;
        Ok(amount)
    }

    pub fn assert_invariant(&self) -> Result<()> {
        require!(
            self.winning_count <= self.max_winning,
            MatchpoolErrorCode::AssertInvariantFailed
        );
        let pool_weight: u64 = self.pool.iter().map(|e| e.weight).sum();
        require!(
            pool_weight == self.total_weight,
            MatchpoolErrorCode::AssertInvariantFailed
        );
        let mut winning_sum: u64 = 0;
        for record in &self.players {
            require!(
                record.winning_count <= record.ticket_count,
                MatchpoolErrorCode::AssertInvariantFailed
            );
            winning_sum += record.winning_count;
        }
        require!(
            winning_sum == self.winning_count as u64,
            MatchpoolErrorCode::AssertInvariantFailed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    fn sample_match(ticket_price: u64, max_winning: u32, cap: u64) -> MatchPool {
        MatchPool {
            match_id: "thorMatch".to_string(),
            creator: pk(1),
            reward_mint: pk(2),
            ticket_price,
            reward_per_ticket: 10,
            expiry_height: 100,
            draw_height: 160,
            max_winning,
            winning_count: 0,
            cap_per_address: cap,
            total_weight: 0,
            draw_nonce: 0,
            remainder_withdrawn: 0,
            bump: 255,
            version: MatchPool::VERSION,
            players: Vec::new(),
            pool: Vec::new(),
            _reserved: [0u8; 16],
        }
    }

    fn errs<T: std::fmt::Debug>(res: Result<T>, code: MatchpoolErrorCode) {
        assert_eq!(res.unwrap_err(), Error::from(code));
    }

    #[test]
    fn test_match_pool_size() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.match_id = "m".repeat(MAX_MATCH_ID_LEN);
        for i in 0..MAX_PLAYERS {
            m.players.push(PlayerRecord {
                player: pk(i as u8),
                ticket_count: 1,
                winning_count: 0,
            });
            m.pool.push(PoolEntry {
                player: pk(i as u8),
                weight: 1,
            });
        }

        let mut bytes = Vec::new();
        m.serialize(&mut bytes).unwrap();

        assert_eq!(
            bytes.len(),
            MatchPool::SIZE,
            "MatchPool account size mismatch: expected {}, got {}",
            MatchPool::SIZE,
            bytes.len()
        );
    }

    #[test]
    fn phase_follows_heights_and_counters() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 4).unwrap();

        assert_eq!(m.phase(0), MatchPhase::Open);
        assert_eq!(m.phase(99), MatchPhase::Open);
        assert_eq!(m.phase(100), MatchPhase::AwaitingDraw);
        assert_eq!(m.phase(159), MatchPhase::AwaitingDraw);
        assert_eq!(m.phase(160), MatchPhase::SeedAvailable);
        assert_eq!(m.phase(160 + SEED_WINDOW), MatchPhase::SeedAvailable);
        assert_eq!(m.phase(160 + SEED_WINDOW + 1), MatchPhase::Finished);

        // all winners revealed => finished even inside the window
        m.winning_count = m.max_winning;
        assert_eq!(m.phase(160), MatchPhase::Finished);
    }

    #[test]
    fn phase_is_finished_when_pool_drains() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 2).unwrap();
        m.draw_winner(0).unwrap();
        m.draw_winner(0).unwrap();
        assert_eq!(m.total_weight, 0);
        assert_eq!(m.phase(160), MatchPhase::Finished);
    }

    #[test]
    fn deposit_accumulates_and_registers_once() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 3).unwrap();
        m.credit_tickets(pk(3), 2).unwrap();
        m.credit_tickets(pk(4), 4).unwrap();

        assert_eq!(m.participant_count(), 2);
        assert_eq!(m.player(&pk(3)).unwrap().ticket_count, 5);
        assert_eq!(m.player(&pk(4)).unwrap().ticket_count, 4);
        assert_eq!(m.total_weight, 9);
        assert_eq!(m.pool.len(), 2);
        m.assert_invariant().unwrap();
    }

    #[test]
    fn deposit_over_cap_is_rejected_without_side_effects() {
        let mut m = sample_match(5, 10, 6);
        m.credit_tickets(pk(3), 5).unwrap();

        let before_players = m.players.clone();
        let before_pool = m.pool.clone();
        errs(
            m.credit_tickets(pk(3), 2),
            MatchpoolErrorCode::TicketCapExceeded,
        );
        assert_eq!(m.players, before_players);
        assert_eq!(m.pool, before_pool);
        assert_eq!(m.total_weight, 5);

        // one more ticket still fits under the cap
        m.credit_tickets(pk(3), 1).unwrap();
        assert_eq!(m.player(&pk(3)).unwrap().ticket_count, 6);
    }

    #[test]
    fn participant_list_is_bounded() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        for i in 0..MAX_PLAYERS {
            m.credit_tickets(pk(i as u8), 1).unwrap();
        }
        errs(
            m.credit_tickets(pk(200), 1),
            MatchpoolErrorCode::ParticipantListFull,
        );
        // existing players may still top up
        m.credit_tickets(pk(0), 1).unwrap();
    }

    #[test]
    fn draw_precondition_ladder() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);

        errs(m.draw_preconditions(99), MatchpoolErrorCode::MatchNotClosed);
        errs(m.draw_preconditions(120), MatchpoolErrorCode::SeedNotAvailable);
        errs(
            m.draw_preconditions(160 + SEED_WINDOW + 1),
            MatchpoolErrorCode::MatchFinished,
        );
        // nobody deposited
        errs(m.draw_preconditions(160), MatchpoolErrorCode::EmptyPlayerList);

        m.credit_tickets(pk(3), 12).unwrap();
        m.draw_preconditions(160).unwrap();

        m.winning_count = m.max_winning;
        errs(m.draw_preconditions(160), MatchpoolErrorCode::MaxWinningReached);
    }

    #[test]
    fn batch_preconditions_check_headroom_up_front() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 12).unwrap();

        errs(
            m.batch_preconditions(160, 0),
            MatchpoolErrorCode::BatchCountOutOfRange,
        );
        errs(
            m.batch_preconditions(160, 17),
            MatchpoolErrorCode::BatchCountOutOfRange,
        );

        m.winning_count = 8;
        m.batch_preconditions(160, 2).unwrap();
        errs(
            m.batch_preconditions(160, 3),
            MatchpoolErrorCode::MaxWinningReached,
        );
        errs(m.batch_preconditions(99, 2), MatchpoolErrorCode::MatchNotClosed);
    }

    #[test]
    fn draw_walks_weights_and_compacts_the_pool() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 3).unwrap();
        m.credit_tickets(pk(4), 4).unwrap();

        // targets 0..=2 land on the first entry, 3..=6 on the second
        assert_eq!(m.draw_winner(2).unwrap(), pk(3));
        assert_eq!(m.draw_winner(2).unwrap(), pk(4));
        assert_eq!(m.total_weight, 5);
        m.assert_invariant().unwrap();

        // drain the first player's remaining two tickets
        assert_eq!(m.draw_winner(0).unwrap(), pk(3));
        assert_eq!(m.draw_winner(0).unwrap(), pk(3));
        assert_eq!(m.pool.len(), 1, "drained entry must be swap-removed");
        assert_eq!(m.pool[0].player, pk(4));
        assert_eq!(m.player(&pk(3)).unwrap().winning_count, 3);
        m.assert_invariant().unwrap();
    }

    #[test]
    fn draw_on_empty_pool_fails() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        errs(m.draw_winner(0), MatchpoolErrorCode::EmptyPlayerList);
    }

    #[test]
    fn winning_never_exceeds_tickets_when_pool_drains() {
        let mut m = sample_match(5, 20, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 2).unwrap();
        m.credit_tickets(pk(4), 3).unwrap();

        for i in 0..5u64 {
            let seed = derive_draw_seed(&[9u8; 32], i, &m.match_id);
            let target = seed_to_target(&seed, m.total_weight).unwrap();
            m.draw_winner(target).unwrap();
            m.assert_invariant().unwrap();
        }

        assert_eq!(m.total_weight, 0);
        assert!(m.pool.is_empty());
        assert_eq!(m.player(&pk(3)).unwrap().winning_count, 2);
        assert_eq!(m.player(&pk(4)).unwrap().winning_count, 3);
        errs(m.draw_winner(0), MatchpoolErrorCode::EmptyPlayerList);
    }

    #[test]
    fn finished_gate_reports_the_right_stage() {
        let mut m = sample_match(5, 2, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 4).unwrap();

        errs(m.require_finished(50), MatchpoolErrorCode::NotFinishedSeedPending);
        errs(m.require_finished(120), MatchpoolErrorCode::NotFinishedSeedPending);
        errs(m.require_finished(160), MatchpoolErrorCode::MatchNotFinished);

        m.draw_winner(0).unwrap();
        m.draw_winner(0).unwrap();
        m.require_finished(160).unwrap();

        // window lapse finishes a match regardless of counters
        let m2 = sample_match(5, 2, CAP_UNLIMITED);
        m2.require_finished(160 + SEED_WINDOW + 1).unwrap();
    }

    #[test]
    fn reward_settlement_separates_winning_tickets() {
        let mut m = sample_match(5, 3, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 5).unwrap();
        m.draw_winner(0).unwrap();
        m.draw_winner(0).unwrap();
        m.draw_winner(0).unwrap();

        let amount = m.settle_reward(&pk(3)).unwrap();
        assert_eq!(amount, 3 * 10);
        let record = m.player(&pk(3)).unwrap();
        assert_eq!(record.ticket_count, 2);
        assert_eq!(record.winning_count, 0);

        errs(m.settle_reward(&pk(3)), MatchpoolErrorCode::NoWinningTicket);
        errs(m.settle_reward(&pk(9)), MatchpoolErrorCode::NoWinningTicket);

        // the remaining two losing tickets refund at ticket price
        let refund = m.settle_refund(&pk(3)).unwrap();
        assert_eq!(refund, 2 * 5);
        assert_eq!(m.player(&pk(3)).unwrap().ticket_count, 0);
        errs(m.settle_refund(&pk(3)), MatchpoolErrorCode::NoLosingTicket);
    }

    #[test]
    fn refund_retains_winning_tickets() {
        let mut m = sample_match(5, 3, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 3).unwrap();
        m.draw_winner(0).unwrap();

        // refund before the reward: only the two losing tickets pay out,
        // the winning one stays on the ledger
        let refund = m.settle_refund(&pk(3)).unwrap();
        assert_eq!(refund, 2 * 5);
        let record = m.player(&pk(3)).unwrap();
        assert_eq!(record.ticket_count, 1);
        assert_eq!(record.winning_count, 1);
        m.assert_invariant().unwrap();

        // the reward is still reachable afterwards
        let reward = m.settle_reward(&pk(3)).unwrap();
        assert_eq!(reward, 1 * 10);
        let record = m.player(&pk(3)).unwrap();
        assert_eq!(record.ticket_count, 0);
        assert_eq!(record.winning_count, 0);

        errs(m.settle_refund(&pk(3)), MatchpoolErrorCode::NoLosingTicket);
    }

    #[test]
    fn refund_of_all_winning_tickets_is_rejected() {
        let mut m = sample_match(5, 3, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 2).unwrap();
        m.draw_winner(0).unwrap();
        m.draw_winner(0).unwrap();

        // every ticket won, there is nothing to refund
        errs(m.settle_refund(&pk(3)), MatchpoolErrorCode::NoLosingTicket);
        assert_eq!(m.player(&pk(3)).unwrap().ticket_count, 2);
    }

    #[test]
    fn batch_pads_null_slots_when_the_pool_drains() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 2).unwrap();
        m.credit_tickets(pk(4), 1).unwrap();

        m.batch_preconditions(160, 5).unwrap();
        let (winners, drawn) = m.draw_batch_winners(&[42u8; 32], 5).unwrap();

        assert_eq!(winners.len(), 5);
        assert_eq!(drawn, 3);
        assert!(winners[..3].iter().all(|w| *w != Pubkey::default()));
        assert_eq!(&winners[3..], &[Pubkey::default(); 2]);

        // the nonce only advanced for the slots that actually drew
        assert_eq!(m.draw_nonce, 3);
        assert_eq!(m.total_weight, 0);
        assert_eq!(m.winning_count, 3);
        m.assert_invariant().unwrap();
    }

    #[test]
    fn batch_stops_drawing_at_max_winning() {
        let mut m = sample_match(5, 2, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 8).unwrap();

        let (winners, drawn) = m.draw_batch_winners(&[42u8; 32], 2).unwrap();
        assert_eq!(drawn, 2);
        assert!(winners.iter().all(|w| *w == pk(3)));

        // headroom exhausted: further slots are all null
        let (winners, drawn) = m.draw_batch_winners(&[42u8; 32], 3).unwrap();
        assert_eq!(drawn, 0);
        assert_eq!(winners, vec![Pubkey::default(); 3]);
        assert_eq!(m.winning_count, 2);
    }

    #[test]
    fn remainder_is_single_shot() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 4).unwrap();
        m.draw_winner(0).unwrap();

        let amount = m.settle_remainder().unwrap();
        assert_eq!(amount, 9 * 10);
        errs(m.settle_remainder(), MatchpoolErrorCode::RemainderExhausted);
    }

    #[test]
    fn remainder_requires_unused_escrow() {
        let mut m = sample_match(5, 1, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 2).unwrap();
        m.draw_winner(0).unwrap();
        errs(m.settle_remainder(), MatchpoolErrorCode::RemainderExhausted);
    }

    #[test]
    fn scenario_three_players_ten_draws() {
        // price 5, max 10; deposits of 15/20/25 => 3/4/5 tickets, 12 total
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        for (byte, amount) in [(3u8, 15u64), (4, 20), (5, 25)] {
            assert_eq!(amount % m.ticket_price, 0);
            m.credit_tickets(pk(byte), amount / m.ticket_price).unwrap();
        }
        assert_eq!(m.total_weight, 12);

        let slot_hash = [42u8; 32];
        let height = m.draw_height + 1;
        for _ in 0..10 {
            m.draw_preconditions(height).unwrap();
            let seed = derive_draw_seed(&slot_hash, m.draw_nonce, &m.match_id);
            m.draw_nonce += 1;
            let target = seed_to_target(&seed, m.total_weight).unwrap();
            m.draw_winner(target).unwrap();
            m.assert_invariant().unwrap();
        }

        assert_eq!(m.winning_count, 10);
        errs(m.draw_preconditions(height), MatchpoolErrorCode::MaxWinningReached);

        // every settlement path pays out, and the books balance:
        // rewards = 10 * reward_per_ticket, refunds = 2 * price,
        // creator profit (handler-side) = 10 * price.
        let mut rewards = 0u64;
        let mut refunds = 0u64;
        for byte in [3u8, 4, 5] {
            let key = pk(byte);
            if m.player(&key).unwrap().winning_count > 0 {
                rewards += m.settle_reward(&key).unwrap();
            }
            if m.player(&key).unwrap().ticket_count > 0 {
                refunds += m.settle_refund(&key).unwrap();
            }
        }
        assert_eq!(rewards, 10 * m.reward_per_ticket);
        assert_eq!(refunds, 2 * m.ticket_price);
        errs(m.settle_remainder(), MatchpoolErrorCode::RemainderExhausted);
    }

    #[test]
    fn scenario_window_lapses_without_draws() {
        let mut m = sample_match(5, 10, CAP_UNLIMITED);
        m.credit_tickets(pk(3), 4).unwrap();

        let late = m.draw_height + SEED_WINDOW + 1;
        errs(m.draw_preconditions(late), MatchpoolErrorCode::MatchFinished);
        errs(
            m.batch_preconditions(late, 4),
            MatchpoolErrorCode::MatchFinished,
        );

        // creator still recovers the full untouched escrow
        m.require_finished(late).unwrap();
        assert_eq!(m.settle_remainder().unwrap(), 10 * m.reward_per_ticket);
        // and the depositor gets a full refund
        assert_eq!(m.settle_refund(&pk(3)).unwrap(), 4 * m.ticket_price);
    }
}
