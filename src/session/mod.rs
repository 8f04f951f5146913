/// Snapshot reads and mutation entry points over a shared host.
pub mod panel;
