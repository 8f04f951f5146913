/// Shared value types and tolerances.
pub mod core;
/// Error type and result alias.
pub mod error;
