//! Layerstyle is the state engine behind a layer-style control panel.
//!
//! It reads a host application's document (selected layer, its style stack, effects, keyframes)
//! into a flat, serializable [`PanelSnapshot`], and turns panel intents into undoable host
//! mutations. The host is reached only through the [`Host`] trait:
//!
//! - Build a snapshot with [`build_snapshot`] (or [`Panel::get_snapshot`])
//! - Mutate through [`Dispatcher`] or the [`Panel`] entry points
//! - Keep a surface current with the adaptive poll loop ([`spawn_poll`] / [`Panel::start_polling`])
//!
//! [`FixtureHost`] is an in-memory document for tests and the `layerstyle` CLI.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Static style, property, blend mode, and name tables.
pub mod catalog;
/// Panel intents and the mutations they perform.
pub mod dispatch;
mod foundation;
/// Host capability boundary.
pub mod host;
/// Adaptive polling.
pub mod poll;
/// Logical-to-host property resolution.
pub mod resolve;
/// Panel boundary over a shared host.
pub mod session;
/// The panel read model.
pub mod snapshot;

pub use crate::foundation::core::{KEY_EPSILON, NAV_TOLERANCE, Rgb, round_tenth};
pub use crate::foundation::error::{StyleError, StyleResult};

pub use crate::catalog::blend::{BLEND_MODES, BlendModeEntry};
pub use crate::catalog::props::{Constraint, PropertyDefinition, ValueKind};
pub use crate::catalog::styles::{MASTER_STYLE_ID, STYLE_CATALOG, StyleDescriptor};
pub use crate::dispatch::dispatcher::{Action, Dispatcher};
pub use crate::dispatch::keyframe::KeyframeAction;
pub use crate::dispatch::scrub::ScrubGesture;
pub use crate::host::fixture::{FixtureDoc, FixtureHost};
pub use crate::host::{CommandId, CompInfo, Host, HostValue, LayerInfo, NodeId, UndoScope};
pub use crate::poll::schedule::{PollOpts, PollSchedule};
pub use crate::poll::worker::{PollHandle, PollUpdate, spawn_poll};
pub use crate::session::panel::Panel;
pub use crate::snapshot::builder::build_snapshot;
pub use crate::snapshot::hash::LayerHash;
pub use crate::snapshot::model::{PanelSnapshot, PropState, PropValue};
