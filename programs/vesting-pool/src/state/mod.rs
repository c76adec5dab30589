pub mod airdrop;
pub mod grant;
pub mod pool;
pub mod vesting;

pub use airdrop::*;
pub use grant::*;
pub use pool::*;
pub use vesting::*;
