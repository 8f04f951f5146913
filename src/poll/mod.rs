//! Adaptive polling.
//!
//! [`schedule`] decides how long to wait between snapshots; [`worker`] runs the loop on a thread
//! and exposes force-refresh and stop through its handle.

/// Adaptive delay state machine.
pub mod schedule;
/// Poll thread and its control handle.
pub mod worker;
