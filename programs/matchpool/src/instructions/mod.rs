pub mod initialize;
pub mod match_create;
pub mod ticket_deposit;
pub mod draw_one;
pub mod draw_batch;
pub mod reward_withdraw;
pub mod deposit_withdraw;
pub mod creator_profit_withdraw;
pub mod creator_deposit_withdraw;

pub use initialize::*;
pub use match_create::*;
pub use ticket_deposit::*;
pub use draw_one::*;
pub use draw_batch::*;
pub use reward_withdraw::*;
pub use deposit_withdraw::*;
pub use creator_profit_withdraw::*;
pub use creator_deposit_withdraw::*;
