//! The panel's read model.
//!
//! A [`model::PanelSnapshot`] is rebuilt from scratch on every poll tick by [`builder`]; nothing in
//! it survives to the next tick except the [`hash::LayerHash`] the poll loop compares.

/// Snapshot assembly.
pub mod builder;
/// Layer change signature.
pub mod hash;
/// Snapshot data types.
pub mod model;
