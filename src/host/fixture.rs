//! In-memory host document.
//!
//! `FixtureHost` implements [`Host`] over an arena of nodes. It is what the test-suite and the CLI
//! run against, and it doubles as a reference for how a real host binding is expected to behave
//! (0-based keys, `set_value` refused on keyframed properties, undo groups nest).

use super::{
    CommandId, CompInfo, Host, HostValue, Interpolation, LayerInfo, NativeCommand, NodeId,
    NodeInfo, ValueType,
};
use crate::catalog::styles::{STYLE_CATALOG, STYLE_STACK_KEY};
use crate::foundation::error::{StyleError, StyleResult};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Two keys closer than this are the same key.
const SAME_KEY_TIME: f64 = 1e-6;

/// JSON form of a fixture document.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FixtureDoc {
    /// Active composition; `None` means no active document.
    #[serde(default)]
    pub comp: Option<FixtureComp>,
    /// Layers in composition order.
    #[serde(default)]
    pub layers: Vec<FixtureLayer>,
    /// Menu name -> command id table.
    #[serde(default)]
    pub menu_commands: BTreeMap<String, u32>,
}

/// JSON form of the active composition.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FixtureComp {
    /// Composition id.
    #[serde(default)]
    pub id: u64,
    /// Playhead time.
    #[serde(default)]
    pub time: f64,
    /// Frame duration.
    pub frame_duration: f64,
    /// Total duration.
    pub duration: f64,
}

/// JSON form of a layer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FixtureLayer {
    /// Layer name.
    pub name: String,
    /// Selection state.
    #[serde(default)]
    pub selected: bool,
    /// Solo switch.
    #[serde(default)]
    pub solo: bool,
    /// Top-level property groups (style stack, effect stack, ...).
    #[serde(default)]
    pub groups: Vec<FixtureNode>,
}

/// JSON form of a property node or group.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FixtureNode {
    /// Internal identifier.
    pub match_name: String,
    /// Display name; defaults to the match name.
    #[serde(default)]
    pub name: Option<String>,
    /// Enabled bit.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Static value; absent for groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<HostValue>,
    /// Whether keyframes are allowed; defaults to "has a value".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_vary: Option<bool>,
    /// Keyframes in time order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<FixtureKey>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FixtureNode>,
}

/// JSON form of a keyframe.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct FixtureKey {
    /// Key time.
    pub time: f64,
    /// Key value.
    pub value: HostValue,
    /// Inbound interpolation.
    #[serde(default)]
    pub interp_in: Interpolation,
    /// Outbound interpolation.
    #[serde(default)]
    pub interp_out: Interpolation,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug)]
struct Key {
    time: f64,
    value: HostValue,
    interp_in: Interpolation,
    interp_out: Interpolation,
}

#[derive(Clone, Debug)]
struct Slot {
    parent: Option<NodeId>,
    is_layer: bool,
    match_name: String,
    name: String,
    enabled: bool,
    selected: bool,
    solo: bool,
    value: Option<HostValue>,
    can_vary: bool,
    keys: Vec<Key>,
    children: Vec<NodeId>,
    removed: bool,
}

impl Slot {
    fn new(parent: Option<NodeId>, match_name: &str, name: &str) -> Self {
        Self {
            parent,
            is_layer: parent.is_none(),
            match_name: match_name.to_string(),
            name: name.to_string(),
            enabled: true,
            selected: false,
            solo: false,
            value: None,
            can_vary: false,
            keys: Vec::new(),
            children: Vec::new(),
            removed: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct DocState {
    comp: Option<CompInfo>,
    slots: Vec<Slot>,
    layers: Vec<NodeId>,
}

/// In-memory [`Host`] implementation.
#[derive(Clone, Debug, Default)]
pub struct FixtureHost {
    state: DocState,
    menu: BTreeMap<String, CommandId>,
    executed: Vec<CommandId>,
    undo_depth: usize,
    pending: Option<(String, DocState)>,
    undo_stack: Vec<(String, DocState)>,
    offline: bool,
    read_only: bool,
}

impl FixtureHost {
    /// Document with an active composition and no layers.
    pub fn new(comp: CompInfo) -> Self {
        Self {
            state: DocState {
                comp: Some(comp),
                ..DocState::default()
            },
            ..Self::default()
        }
    }

    /// Host with no active document.
    pub fn without_comp() -> Self {
        Self::default()
    }

    /// Build a host from its JSON form.
    pub fn from_doc(doc: &FixtureDoc) -> Self {
        let mut host = Self::default();
        host.state.comp = doc.comp.map(|c| CompInfo {
            id: c.id,
            time: c.time,
            frame_duration: c.frame_duration,
            duration: c.duration,
        });
        for layer in &doc.layers {
            let id = host.add_layer(&layer.name);
            let slot = &mut host.state.slots[id.0 as usize];
            slot.selected = layer.selected;
            slot.solo = layer.solo;
            for g in &layer.groups {
                host.insert_node(id, g);
            }
        }
        for (name, cmd) in &doc.menu_commands {
            host.register_menu_command(name, CommandId(*cmd));
        }
        host
    }

    /// Parse a fixture document from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> StyleResult<Self> {
        let doc: FixtureDoc = serde_json::from_reader(r)
            .map_err(|e| StyleError::serde(format!("parse fixture document JSON: {e}")))?;
        Ok(Self::from_doc(&doc))
    }

    /// Parse a fixture document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StyleResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StyleError::validation(format!("open fixture document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Current document in its JSON form. Removed nodes are omitted.
    pub fn to_doc(&self) -> FixtureDoc {
        let comp = self.state.comp.map(|c| FixtureComp {
            id: c.id,
            time: c.time,
            frame_duration: c.frame_duration,
            duration: c.duration,
        });
        let layers = self
            .state
            .layers
            .iter()
            .map(|&id| {
                let slot = self.slot_ref(id);
                FixtureLayer {
                    name: slot.name.clone(),
                    selected: slot.selected,
                    solo: slot.solo,
                    groups: self.live_children(id).map(|c| self.export_node(c)).collect(),
                }
            })
            .collect();
        let menu_commands = self
            .menu
            .iter()
            .map(|(k, v)| (k.clone(), v.0))
            .collect();
        FixtureDoc {
            comp,
            layers,
            menu_commands,
        }
    }

    fn export_node(&self, id: NodeId) -> FixtureNode {
        let slot = self.slot_ref(id);
        FixtureNode {
            match_name: slot.match_name.clone(),
            name: (slot.name != slot.match_name).then(|| slot.name.clone()),
            enabled: slot.enabled,
            value: slot.value.clone(),
            can_vary: (slot.can_vary != slot.value.is_some()).then_some(slot.can_vary),
            keys: slot
                .keys
                .iter()
                .map(|k| FixtureKey {
                    time: k.time,
                    value: k.value.clone(),
                    interp_in: k.interp_in,
                    interp_out: k.interp_out,
                })
                .collect(),
            children: self.live_children(id).map(|c| self.export_node(c)).collect(),
        }
    }

    fn insert_node(&mut self, parent: NodeId, node: &FixtureNode) -> NodeId {
        let name = node.name.as_deref().unwrap_or(&node.match_name);
        let id = self.push_slot(Slot::new(Some(parent), &node.match_name, name));
        {
            let slot = &mut self.state.slots[id.0 as usize];
            slot.enabled = node.enabled;
            slot.value = node.value.clone();
            slot.can_vary = node.can_vary.unwrap_or(node.value.is_some());
            slot.keys = node
                .keys
                .iter()
                .map(|k| Key {
                    time: k.time,
                    value: k.value.clone(),
                    interp_in: k.interp_in,
                    interp_out: k.interp_out,
                })
                .collect();
            slot.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        }
        for c in &node.children {
            self.insert_node(id, c);
        }
        id
    }

    fn push_slot(&mut self, slot: Slot) -> NodeId {
        let id = NodeId(self.state.slots.len() as u64);
        if let Some(parent) = slot.parent {
            self.state.slots[parent.0 as usize].children.push(id);
        }
        self.state.slots.push(slot);
        id
    }

    /// Append a layer (unselected) and return its node.
    pub fn add_layer(&mut self, name: &str) -> NodeId {
        let id = self.push_slot(Slot::new(None, "ADBE AV Layer", name));
        self.state.layers.push(id);
        id
    }

    /// Append a property group under `parent`.
    pub fn add_group(&mut self, parent: NodeId, match_name: &str, name: &str) -> NodeId {
        self.push_slot(Slot::new(Some(parent), match_name, name))
    }

    /// Append a keyframe-capable property under `parent`.
    pub fn add_property(
        &mut self,
        parent: NodeId,
        match_name: &str,
        name: &str,
        value: HostValue,
    ) -> NodeId {
        let mut slot = Slot::new(Some(parent), match_name, name);
        slot.value = Some(value);
        slot.can_vary = true;
        self.push_slot(slot)
    }

    /// Insert a keyframe directly, bypassing undo bookkeeping.
    pub fn add_key(&mut self, prop: NodeId, time: f64, value: HostValue) {
        upsert_key(&mut self.slot_mut_unchecked(prop).keys, time, value);
    }

    /// Mark a layer selected, appending it to the current selection.
    pub fn select_layer(&mut self, layer: NodeId) {
        self.slot_mut_unchecked(layer).selected = true;
    }

    /// Flip a node's enabled bit directly, as a user editing with native tools would.
    pub fn force_enabled(&mut self, node: NodeId, enabled: bool) {
        self.slot_mut_unchecked(node).enabled = enabled;
    }

    /// Allow or forbid keyframes on a property.
    pub fn set_can_vary(&mut self, prop: NodeId, can_vary: bool) {
        self.slot_mut_unchecked(prop).can_vary = can_vary;
    }

    /// Make `name` resolvable through [`Host::find_menu_command`].
    pub fn register_menu_command(&mut self, name: &str, cmd: CommandId) {
        self.menu.insert(name.to_string(), cmd);
    }

    /// Make every call fail, as when the host is unreachable.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Make every mutation fail while reads keep working.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Commands executed so far, in order.
    pub fn executed_commands(&self) -> &[CommandId] {
        &self.executed
    }

    /// Labels of closed outermost undo groups, oldest first.
    pub fn undo_labels(&self) -> Vec<&str> {
        self.undo_stack.iter().map(|(l, _)| l.as_str()).collect()
    }

    /// Number of undo groups currently open.
    pub fn open_undo_groups(&self) -> usize {
        self.undo_depth
    }

    /// Revert the most recent closed undo group. Returns its label.
    pub fn undo(&mut self) -> Option<String> {
        let (label, before) = self.undo_stack.pop()?;
        self.state = before;
        Some(label)
    }

    /// Keyframes of a property as `(time, value)` pairs.
    pub fn keys(&self, prop: NodeId) -> Vec<(f64, HostValue)> {
        self.slot_ref(prop)
            .keys
            .iter()
            .map(|k| (k.time, k.value.clone()))
            .collect()
    }

    /// In/out interpolation of keyframe `index`.
    pub fn key_interpolation(&self, prop: NodeId, index: usize) -> (Interpolation, Interpolation) {
        let k = &self.slot_ref(prop).keys[index];
        (k.interp_in, k.interp_out)
    }

    /// Static (unkeyed) value of a property.
    pub fn static_value(&self, prop: NodeId) -> Option<HostValue> {
        self.slot_ref(prop).value.clone()
    }

    /// Enabled bit of a node.
    pub fn is_enabled(&self, node: NodeId) -> bool {
        self.slot_ref(node).enabled
    }

    /// Selection state of a node or layer.
    pub fn is_selected(&self, node: NodeId) -> bool {
        self.slot_ref(node).selected
    }

    /// Whether a node is still attached to the document.
    pub fn exists(&self, node: NodeId) -> bool {
        self.state
            .slots
            .get(node.0 as usize)
            .is_some_and(|s| !s.removed)
    }

    /// Name of a layer or node.
    pub fn name_of(&self, node: NodeId) -> &str {
        &self.slot_ref(node).name
    }

    /// Solo switch of a layer.
    pub fn is_solo(&self, layer: NodeId) -> bool {
        self.slot_ref(layer).solo
    }

    /// Playhead time of the active composition.
    pub fn comp_time(&self) -> Option<f64> {
        self.state.comp.map(|c| c.time)
    }

    fn slot_ref(&self, id: NodeId) -> &Slot {
        &self.state.slots[id.0 as usize]
    }

    fn slot_mut_unchecked(&mut self, id: NodeId) -> &mut Slot {
        &mut self.state.slots[id.0 as usize]
    }

    fn live_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slot_ref(id)
            .children
            .iter()
            .copied()
            .filter(|c| !self.slot_ref(*c).removed)
    }

    fn check_read(&self) -> StyleResult<()> {
        if self.offline {
            return Err(StyleError::host("host is offline"));
        }
        Ok(())
    }

    fn check_write(&self) -> StyleResult<()> {
        self.check_read()?;
        if self.read_only {
            return Err(StyleError::host("document is read-only"));
        }
        Ok(())
    }

    fn slot(&self, id: NodeId) -> StyleResult<&Slot> {
        self.check_read()?;
        self.state
            .slots
            .get(id.0 as usize)
            .filter(|s| !s.removed)
            .ok_or_else(|| StyleError::host(format!("invalid node {}", id.0)))
    }

    fn slot_mut(&mut self, id: NodeId) -> StyleResult<&mut Slot> {
        self.check_write()?;
        self.state
            .slots
            .get_mut(id.0 as usize)
            .filter(|s| !s.removed)
            .ok_or_else(|| StyleError::host(format!("invalid node {}", id.0)))
    }

    fn layer_slot_mut(&mut self, id: NodeId) -> StyleResult<&mut Slot> {
        let slot = self.slot_mut(id)?;
        if !slot.is_layer {
            return Err(StyleError::host(format!("node {} is not a layer", id.0)));
        }
        Ok(slot)
    }

    fn comp(&self) -> StyleResult<CompInfo> {
        self.check_read()?;
        self.state
            .comp
            .ok_or_else(|| StyleError::host("no active composition"))
    }

    fn key_ref(&self, prop: NodeId, index: usize) -> StyleResult<&Key> {
        self.slot(prop)?
            .keys
            .get(index)
            .ok_or_else(|| StyleError::host(format!("key index {index} out of range")))
    }

    fn clear_selected(&mut self) {
        let doomed: Vec<NodeId> = (0..self.state.slots.len())
            .map(|i| NodeId(i as u64))
            .filter(|id| {
                let s = self.slot_ref(*id);
                !s.is_layer && s.selected && !s.removed
            })
            .collect();
        for id in doomed {
            self.detach(id);
        }
    }

    fn deselect_descendants(&mut self, id: NodeId) {
        let children = self.slot_ref(id).children.clone();
        for c in children {
            self.slot_mut_unchecked(c).selected = false;
            self.deselect_descendants(c);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let slot = self.slot_mut_unchecked(id);
        slot.removed = true;
        slot.selected = false;
        let children = slot.children.clone();
        for c in children {
            self.detach(c);
        }
    }

    fn insert_catalog_style(&mut self, cmd: CommandId) {
        let Some(desc) = STYLE_CATALOG.iter().find(|d| d.command == Some(cmd)) else {
            return;
        };
        let layers: Vec<NodeId> = self
            .state
            .layers
            .iter()
            .copied()
            .filter(|l| self.slot_ref(*l).selected)
            .collect();
        for layer in layers {
            let existing = self
                .live_children(layer)
                .find(|c| self.slot_ref(*c).match_name == STYLE_STACK_KEY);
            let stack = match existing {
                Some(s) => s,
                None => self.add_group(layer, STYLE_STACK_KEY, "Layer Styles"),
            };
            let exists = self
                .live_children(stack)
                .any(|c| desc.matches(&self.slot_ref(c).match_name));
            if !exists {
                let label = desc.menu_names().last().copied().unwrap_or(desc.id);
                self.add_group(stack, desc.match_key, label);
            }
        }
    }
}

fn upsert_key(keys: &mut Vec<Key>, time: f64, value: HostValue) {
    if let Some(k) = keys
        .iter_mut()
        .find(|k| (k.time - time).abs() < SAME_KEY_TIME)
    {
        k.value = value;
        return;
    }
    let at = keys.partition_point(|k| k.time < time);
    keys.insert(
        at,
        Key {
            time,
            value,
            interp_in: Interpolation::Linear,
            interp_out: Interpolation::Linear,
        },
    );
}

fn sample_keys(keys: &[Key], t: f64) -> HostValue {
    let idx = keys.partition_point(|k| k.time <= t);
    if idx == 0 {
        return keys[0].value.clone();
    }
    if idx >= keys.len() {
        return keys[keys.len() - 1].value.clone();
    }
    let a = &keys[idx - 1];
    let b = &keys[idx];
    if a.interp_out == Interpolation::Hold || b.interp_in == Interpolation::Hold {
        return a.value.clone();
    }
    let span = b.time - a.time;
    let u = if span > 0.0 { (t - a.time) / span } else { 0.0 };
    match (&a.value, &b.value) {
        (HostValue::Number(x), HostValue::Number(y)) => HostValue::Number(x + (y - x) * u),
        (HostValue::Color(x), HostValue::Color(y)) => HostValue::Color(
            x.iter()
                .zip(y.iter())
                .map(|(p, q)| p + (q - p) * u)
                .collect(),
        ),
        _ => a.value.clone(),
    }
}

impl Host for FixtureHost {
    fn active_comp(&self) -> StyleResult<Option<CompInfo>> {
        self.check_read()?;
        Ok(self.state.comp)
    }

    fn active_layer(&self) -> StyleResult<Option<LayerInfo>> {
        let Some(comp) = self.active_comp()? else {
            return Ok(None);
        };
        let found = self
            .state
            .layers
            .iter()
            .enumerate()
            .find(|(_, id)| self.slot_ref(**id).selected);
        Ok(found.map(|(pos, &node)| {
            let slot = self.slot_ref(node);
            LayerInfo {
                node,
                comp_id: comp.id,
                index: pos as u32 + 1,
                name: slot.name.clone(),
                solo: slot.solo,
            }
        }))
    }

    fn selected_layers(&self) -> StyleResult<Vec<NodeId>> {
        self.check_read()?;
        Ok(self
            .state
            .layers
            .iter()
            .copied()
            .filter(|l| self.slot_ref(*l).selected)
            .collect())
    }

    fn set_layer_selected(&mut self, layer: NodeId, selected: bool) -> StyleResult<()> {
        self.layer_slot_mut(layer)?.selected = selected;
        if !selected {
            self.deselect_descendants(layer);
        }
        Ok(())
    }

    fn set_layer_name(&mut self, layer: NodeId, name: &str) -> StyleResult<()> {
        self.layer_slot_mut(layer)?.name = name.to_string();
        Ok(())
    }

    fn set_layer_solo(&mut self, layer: NodeId, solo: bool) -> StyleResult<()> {
        self.layer_slot_mut(layer)?.solo = solo;
        Ok(())
    }

    fn set_comp_time(&mut self, time: f64) -> StyleResult<()> {
        self.check_write()?;
        let comp = self
            .state
            .comp
            .as_mut()
            .ok_or_else(|| StyleError::host("no active composition"))?;
        comp.time = time;
        Ok(())
    }

    fn node(&self, node: NodeId) -> StyleResult<NodeInfo> {
        let slot = self.slot(node)?;
        let value_type = match &slot.value {
            None => ValueType::NoValue,
            Some(HostValue::Number(_)) | Some(HostValue::Bool(_)) => ValueType::OneD,
            Some(HostValue::Color(_)) => ValueType::Color,
        };
        Ok(NodeInfo {
            match_name: slot.match_name.clone(),
            name: slot.name.clone(),
            enabled: slot.enabled,
            value_type,
        })
    }

    fn children(&self, group: NodeId) -> StyleResult<Vec<NodeId>> {
        self.slot(group)?;
        Ok(self.live_children(group).collect())
    }

    fn child_by_key(&self, group: NodeId, key: &str) -> StyleResult<Option<NodeId>> {
        self.slot(group)?;
        Ok(self.live_children(group).find(|c| {
            let s = self.slot_ref(*c);
            s.match_name == key || s.name == key
        }))
    }

    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> StyleResult<()> {
        self.slot_mut(node)?.enabled = enabled;
        Ok(())
    }

    fn set_node_selected(&mut self, node: NodeId, selected: bool) -> StyleResult<()> {
        self.slot_mut(node)?.selected = selected;
        Ok(())
    }

    fn value(&self, prop: NodeId) -> StyleResult<HostValue> {
        let slot = self.slot(prop)?;
        if !slot.keys.is_empty() {
            let t = self.comp()?.time;
            return Ok(sample_keys(&slot.keys, t));
        }
        slot.value
            .clone()
            .ok_or_else(|| StyleError::host(format!("node {} has no value", prop.0)))
    }

    fn set_value(&mut self, prop: NodeId, value: HostValue) -> StyleResult<()> {
        let slot = self.slot_mut(prop)?;
        if slot.value.is_none() {
            return Err(StyleError::host(format!("node {} has no value", prop.0)));
        }
        if !slot.keys.is_empty() {
            return Err(StyleError::host("set_value on a keyframed property"));
        }
        slot.value = Some(value);
        Ok(())
    }

    fn set_value_at_time(
        &mut self,
        prop: NodeId,
        time: f64,
        value: HostValue,
    ) -> StyleResult<()> {
        let slot = self.slot_mut(prop)?;
        if !slot.can_vary {
            return Err(StyleError::host("property cannot vary over time"));
        }
        upsert_key(&mut slot.keys, time, value);
        Ok(())
    }

    fn can_vary_over_time(&self, prop: NodeId) -> StyleResult<bool> {
        Ok(self.slot(prop)?.can_vary)
    }

    fn num_keys(&self, prop: NodeId) -> StyleResult<usize> {
        Ok(self.slot(prop)?.keys.len())
    }

    fn key_time(&self, prop: NodeId, index: usize) -> StyleResult<f64> {
        Ok(self.key_ref(prop, index)?.time)
    }

    fn remove_key(&mut self, prop: NodeId, index: usize) -> StyleResult<()> {
        let slot = self.slot_mut(prop)?;
        if index >= slot.keys.len() {
            return Err(StyleError::host(format!("key index {index} out of range")));
        }
        let removed = slot.keys.remove(index);
        if slot.keys.is_empty() {
            slot.value = Some(removed.value);
        }
        Ok(())
    }

    fn set_key_interpolation(
        &mut self,
        prop: NodeId,
        index: usize,
        inbound: Interpolation,
        outbound: Interpolation,
    ) -> StyleResult<()> {
        let key = self
            .slot_mut(prop)?
            .keys
            .get_mut(index)
            .ok_or_else(|| StyleError::host(format!("key index {index} out of range")))?;
        key.interp_in = inbound;
        key.interp_out = outbound;
        Ok(())
    }

    fn begin_undo_group(&mut self, label: &str) -> StyleResult<()> {
        self.check_read()?;
        if self.undo_depth == 0 {
            self.pending = Some((label.to_string(), self.state.clone()));
        }
        self.undo_depth += 1;
        Ok(())
    }

    fn end_undo_group(&mut self) -> StyleResult<()> {
        self.check_read()?;
        if self.undo_depth == 0 {
            return Err(StyleError::host("end_undo_group without an open group"));
        }
        self.undo_depth -= 1;
        if self.undo_depth == 0
            && let Some(entry) = self.pending.take()
        {
            self.undo_stack.push(entry);
        }
        Ok(())
    }

    fn find_menu_command(&self, name: &str) -> StyleResult<Option<CommandId>> {
        self.check_read()?;
        Ok(self.menu.get(name).copied())
    }

    fn execute_command(&mut self, cmd: CommandId) -> StyleResult<()> {
        self.check_write()?;
        self.executed.push(cmd);
        if Some(cmd) == NativeCommand::CLEAR.fallback {
            self.clear_selected();
        } else {
            self.insert_catalog_style(cmd);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/fixture.rs"]
mod tests;
