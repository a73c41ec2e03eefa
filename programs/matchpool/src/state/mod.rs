pub mod config;
pub mod creator_balance;
pub mod match_pool;
pub mod treasury;

pub use config::*;
pub use creator_balance::*;
pub use match_pool::*;
pub use treasury::*;
