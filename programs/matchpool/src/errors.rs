use anchor_lang::prelude::*;

#[error_code]
pub enum MatchpoolErrorCode {
    // ─────────────────────────────
    // Match creation
    // ─────────────────────────────
    #[msg("matches with given matchId is occupied")]
    MatchIdOccupied,

    #[msg("matchId must be between 1 and 32 bytes")]
    MatchIdLength,

    #[msg("future block > expiryBlock > current chain length")]
    InvalidSchedule,

    #[msg("maxWinningTicket must be greater than 0")]
    ZeroMaxWinning,

    #[msg("ticket price must be greater than 0")]
    ZeroTicketPrice,

    // ─────────────────────────────
    // Deposits
    // ─────────────────────────────
    #[msg("invalid match")]
    InvalidMatch,

    #[msg("match is not opened to deposit")]
    DepositClosed,

    #[msg("deposit amount must be greater than 0")]
    ZeroDeposit,

    #[msg("deposit amount should be divisible by ticket price")]
    IndivisibleDeposit,

    #[msg("Number of ticket exceeds cap")]
    TicketCapExceeded,

    #[msg("participant list is full")]
    ParticipantListFull,

    // ─────────────────────────────
    // Draws
    // ─────────────────────────────
    #[msg("match is not closed")]
    MatchNotClosed,

    #[msg("future block has not been generated")]
    SeedNotAvailable,

    #[msg("match is finished")]
    MatchFinished,

    #[msg("player list length should be greater than 0")]
    EmptyPlayerList,

    #[msg("max wining reached")]
    MaxWinningReached,

    #[msg("publishCount is out of range")]
    BatchCountOutOfRange,

    // ─────────────────────────────
    // Settlement
    // ─────────────────────────────
    #[msg("invalid match or future block is not generated yet")]
    NotFinishedSeedPending,

    #[msg("match is not finished")]
    MatchNotFinished,

    #[msg("must have winning ticket to withdraw")]
    NoWinningTicket,

    #[msg("there must be losing ticket to withdraw")]
    NoLosingTicket,

    #[msg("creator balance must be greater than 0")]
    EmptyCreatorBalance,

    #[msg("only creator allowed")]
    OnlyCreator,

    #[msg("no more unused winning ticket")]
    RemainderExhausted,

    // ─────────────────────────────
    // General
    // ─────────────────────────────
    #[msg("Math overflow")]
    MathOverflow,

    AssertInvariantFailed,
}
