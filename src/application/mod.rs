// Application layer: the ledger store and the reports computed from it.

pub mod error;
pub mod reporting;
pub mod store;

pub use error::*;
pub use reporting::*;
pub use store::*;
