pub mod draw;
pub mod slot_hashes;
pub mod transfers;

pub use draw::*;
pub use slot_hashes::*;
