pub mod annuity;
pub mod error;
pub mod types;

pub mod amortization;

pub use error::RepayError;
pub use types::*;

/// Standard result type for all repayment operations
pub type RepayResult<T> = Result<T, RepayError>;
