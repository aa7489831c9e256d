pub mod bonding;
pub mod units;
