//! Host document boundary.
//!
//! The host owns the document: layers, their style stacks and effect stacks, all exposed as
//! named, ordered, nested property nodes. The engine sees it only through [`Host`], addresses
//! nodes by opaque [`NodeId`] handles, and never keeps a copy of host state between calls.

use crate::foundation::error::{StyleError, StyleResult};
use std::ops::{Deref, DerefMut};

/// In-memory host document for tests and the CLI.
pub mod fixture;

/// Opaque handle to a host node (layer, property group, or property).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Native command id.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CommandId(pub u32);

/// How a node stores its value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Group or other node without a value.
    #[default]
    NoValue,
    /// Single scalar (numbers, flags, enum codes).
    OneD,
    /// Color.
    Color,
    /// Anything else the engine does not read.
    Other,
}

/// A property value as the host reports it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum HostValue {
    /// Scalar.
    Number(f64),
    /// Boolean flag.
    Bool(bool),
    /// Color components (RGB or RGBA).
    Color(Vec<f64>),
}

impl HostValue {
    /// Scalar view: numbers as-is, flags as 0/1, colors have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Color(_) => None,
        }
    }

    /// Truthiness: non-zero numbers, `true`, and any color.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(v) => *v != 0.0,
            Self::Bool(b) => *b,
            Self::Color(_) => true,
        }
    }

    /// Color components, if this is a color.
    pub fn as_color(&self) -> Option<&[f64]> {
        match self {
            Self::Color(c) => Some(c),
            Self::Number(_) | Self::Bool(_) => None,
        }
    }
}

/// Keyframe interpolation on one side of a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight-line interpolation.
    #[default]
    Linear,
    /// Curve interpolation.
    Bezier,
    /// Step: the value holds until the next key.
    Hold,
}

/// Static facts about one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    /// Internal, locale-independent identifier.
    pub match_name: String,
    /// Display name (may be localized or user-edited).
    pub name: String,
    /// Enabled bit (styles, effects).
    pub enabled: bool,
    /// Value storage type.
    pub value_type: ValueType,
}

/// The composition that contains the active layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompInfo {
    /// Stable composition id.
    pub id: u64,
    /// Current playhead time.
    pub time: f64,
    /// Duration of one frame.
    pub frame_duration: f64,
    /// Total duration.
    pub duration: f64,
}

/// The selected layer the panel operates on.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerInfo {
    /// Layer node; its children are the layer's top-level property groups.
    pub node: NodeId,
    /// Id of the containing composition.
    pub comp_id: u64,
    /// 1-based position of the layer in its composition.
    pub index: u32,
    /// Layer name.
    pub name: String,
    /// Solo switch.
    pub solo: bool,
}

/// Capabilities the engine needs from a host document.
///
/// Lookups that can legitimately miss return `Ok(None)`; `Err` is reserved for host or transport
/// failure. Keyframe indices are 0-based.
pub trait Host {
    /// Active composition, if any.
    fn active_comp(&self) -> StyleResult<Option<CompInfo>>;
    /// First selected layer of the active composition, if any.
    fn active_layer(&self) -> StyleResult<Option<LayerInfo>>;
    /// All selected layers of the active composition.
    fn selected_layers(&self) -> StyleResult<Vec<NodeId>>;
    /// Select or deselect a layer.
    fn set_layer_selected(&mut self, layer: NodeId, selected: bool) -> StyleResult<()>;
    /// Rename a layer.
    fn set_layer_name(&mut self, layer: NodeId, name: &str) -> StyleResult<()>;
    /// Set a layer's solo switch.
    fn set_layer_solo(&mut self, layer: NodeId, solo: bool) -> StyleResult<()>;
    /// Move the active composition's playhead.
    fn set_comp_time(&mut self, time: f64) -> StyleResult<()>;

    /// Facts about a node.
    fn node(&self, node: NodeId) -> StyleResult<NodeInfo>;
    /// Ordered children of a group.
    fn children(&self, group: NodeId) -> StyleResult<Vec<NodeId>>;
    /// Direct child lookup by exact match name or display name.
    fn child_by_key(&self, group: NodeId, key: &str) -> StyleResult<Option<NodeId>>;
    /// Set a node's enabled bit.
    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> StyleResult<()>;
    /// Select or deselect a property node.
    fn set_node_selected(&mut self, node: NodeId, selected: bool) -> StyleResult<()>;

    /// Value at the active composition's current time.
    fn value(&self, prop: NodeId) -> StyleResult<HostValue>;
    /// Set the static value of a property without keyframes.
    fn set_value(&mut self, prop: NodeId, value: HostValue) -> StyleResult<()>;
    /// Create or overwrite the keyframe at `time`.
    fn set_value_at_time(&mut self, prop: NodeId, time: f64, value: HostValue)
    -> StyleResult<()>;
    /// Whether the property can carry keyframes.
    fn can_vary_over_time(&self, prop: NodeId) -> StyleResult<bool>;
    /// Number of keyframes.
    fn num_keys(&self, prop: NodeId) -> StyleResult<usize>;
    /// Time of keyframe `index`.
    fn key_time(&self, prop: NodeId, index: usize) -> StyleResult<f64>;
    /// Delete keyframe `index`.
    fn remove_key(&mut self, prop: NodeId, index: usize) -> StyleResult<()>;
    /// Set in/out interpolation of keyframe `index`.
    fn set_key_interpolation(
        &mut self,
        prop: NodeId,
        index: usize,
        inbound: Interpolation,
        outbound: Interpolation,
    ) -> StyleResult<()>;

    /// Index of the keyframe closest to `time`; the earlier key wins ties.
    ///
    /// Fails when the property has no keyframes.
    fn nearest_key_index(&self, prop: NodeId, time: f64) -> StyleResult<usize> {
        let n = self.num_keys(prop)?;
        let mut best: Option<(usize, f64)> = None;
        for i in 0..n {
            let d = (self.key_time(prop, i)? - time).abs();
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
            .ok_or_else(|| StyleError::host("nearest_key_index on a property without keys"))
    }

    /// Open a named undo group.
    fn begin_undo_group(&mut self, label: &str) -> StyleResult<()>;
    /// Close the innermost undo group.
    fn end_undo_group(&mut self) -> StyleResult<()>;
    /// Resolve a native menu command by its (localized) name.
    fn find_menu_command(&self, name: &str) -> StyleResult<Option<CommandId>>;
    /// Run a native command against the current selection.
    fn execute_command(&mut self, cmd: CommandId) -> StyleResult<()>;
}

/// Open undo group that closes itself when dropped.
///
/// All mutations go through the guard (it derefs to the host), so the group is closed on every
/// exit path, including early `?` returns.
pub struct UndoScope<'a, H: Host + ?Sized> {
    host: &'a mut H,
    label: &'static str,
}

impl<'a, H: Host + ?Sized> UndoScope<'a, H> {
    /// Open `label` on `host`.
    pub fn open(host: &'a mut H, label: &'static str) -> StyleResult<Self> {
        host.begin_undo_group(label)?;
        Ok(Self { host, label })
    }

    /// Label the group was opened with.
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<H: Host + ?Sized> Deref for UndoScope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for UndoScope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for UndoScope<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.host.end_undo_group() {
            tracing::warn!(label = self.label, error = %e, "failed to close undo group");
        }
    }
}

/// A native command addressed by localized menu names with a numeric fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeCommand {
    /// Menu names tried in order.
    pub names: &'static [&'static str],
    /// Id used when no name resolves.
    pub fallback: Option<CommandId>,
}

impl NativeCommand {
    /// Edit > Clear.
    pub const CLEAR: Self = Self {
        names: &[],
        fallback: Some(CommandId(18)),
    };
    /// Reveal animated properties of the selected layers.
    pub const REVEAL_KEYFRAMES: Self = Self {
        names: &[],
        fallback: Some(CommandId(2387)),
    };
    /// Reveal the selected properties in the timeline.
    pub const REVEAL_SELECTED: Self = Self {
        names: &["Reveal Selected Properties", "選択したプロパティを表示"],
        fallback: Some(CommandId(2771)),
    };
    /// Open the value editor (color picker for colors) of the selected property.
    pub const EDIT_VALUE: Self = Self {
        names: &["Edit Value..."],
        fallback: Some(CommandId(2240)),
    };

    /// First name the host knows, else the fallback id.
    ///
    /// A lookup failure for one name does not stop the scan.
    pub fn resolve<H: Host + ?Sized>(&self, host: &H) -> Option<CommandId> {
        self.names
            .iter()
            .find_map(|name| match host.find_menu_command(name) {
                Ok(found) => found,
                Err(e) => {
                    tracing::debug!(name, error = %e, "menu command lookup failed");
                    None
                }
            })
            .or(self.fallback)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/scope.rs"]
mod tests;
