//! Static tables: navigable styles, their editable properties, blend modes, and name presets.
//!
//! Nothing here touches the host. Everything else in the crate resolves these logical entries
//! against a live document.

/// Blend mode selector table.
pub mod blend;
/// Layer-name presets.
pub mod names;
/// Per-style property definitions.
pub mod props;
/// Style descriptors.
pub mod styles;
