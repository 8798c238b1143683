pub mod baseline;
pub mod comparison;
pub mod extra_payment;
pub mod schedule;
pub mod step_up;
