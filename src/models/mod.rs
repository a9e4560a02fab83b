pub mod account;
pub mod identity;
pub mod period;
pub mod row;
pub mod runlog;

pub use account::{AccountConfig, AccountsFile, SheetConfig};
pub use identity::AccountIdentity;
pub use period::{CostEntry, PeriodCosts};
pub use row::CostRow;
pub use runlog::RunLogRow;
