pub mod add_vesting;
pub mod claim_unused_tokens;
pub mod claim_vested_tokens;
pub mod deposit_tokens;
pub mod emit_vesting_quote;
pub mod initialize_pool;
pub mod initialize_root;
pub mod manage_vesting;
pub mod redeem;

pub use add_vesting::*;
pub use claim_unused_tokens::*;
pub use claim_vested_tokens::*;
pub use deposit_tokens::*;
pub use emit_vesting_quote::*;
pub use initialize_pool::*;
pub use initialize_root::*;
pub use manage_vesting::*;
pub use redeem::*;
