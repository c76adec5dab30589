pub mod curves;
pub mod hash;
pub mod merkle;
pub mod time;
pub mod vault;
pub mod wide;
