//! The ledger: typed transaction records and the running point balance.

mod balance;
mod record;

pub use balance::compute_total;
pub use record::{EntryKind, HEADER, Record};
