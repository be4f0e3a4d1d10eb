//! Service layer for the expense tracker
//!
//! Owns the mutable session state (ledger and category registry) and the
//! validation rules applied to every mutation.

pub mod category;
pub mod ledger;
pub mod session;

pub use category::CategoryRegistry;
pub use ledger::ExpenseLedger;
pub use session::Session;
