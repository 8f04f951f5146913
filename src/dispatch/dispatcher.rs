use crate::catalog::names::with_suffix;
use crate::catalog::styles::StyleDescriptor;
use crate::dispatch::keyframe::{KeyframeAction, apply_keyframe_action};
use crate::foundation::error::StyleResult;
use crate::host::{Host, HostValue, NativeCommand, NodeId, UndoScope};
use crate::resolve::resolver::{
    effect_stack, fill_opacity, resolve_style_property, style_group, style_stack,
};

/// Effects whose display name contains one of these are left alone by the FX toggle.
pub const FX_TOGGLE_EXEMPT: [&str; 2] = ["カラーキー", "Color Key"];

/// One panel intent, in the form the CLI and other surfaces send it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    /// Write a style property, keyed at the playhead when it already has keys.
    SetPropertyValue {
        /// Style id.
        style_id: String,
        /// Definition index within the style.
        index: usize,
        /// New value.
        value: HostValue,
    },
    /// Keyframe operation on a style property.
    OperateKeyframe {
        /// Style id.
        style_id: String,
        /// Definition index within the style.
        index: usize,
        /// Operation.
        action: KeyframeAction,
    },
    /// Write the stack's fill opacity.
    SetFillOpacity {
        /// New value.
        value: f64,
    },
    /// Keyframe operation on fill opacity.
    OperateFillOpacityKeyframe {
        /// Operation.
        action: KeyframeAction,
    },
    /// Insert a style through the host's native command.
    AddStyle {
        /// Style id.
        style_id: String,
    },
    /// Delete an enabled style.
    RemoveStyle {
        /// Style id.
        style_id: String,
    },
    /// Rename the layer.
    RenameLayer {
        /// New name.
        name: String,
    },
    /// Replace the layer name with a preset.
    ApplyBaseName {
        /// Preset name.
        base_name: String,
    },
    /// Append a suffix after dropping a trailing number.
    ApplyNameSuffix {
        /// Suffix.
        suffix: String,
    },
    /// Flip the layer's solo switch.
    ToggleSolo,
    /// Flip every non-exempt effect to one shared state.
    ToggleFxEnabled,
    /// Move the playhead by whole frames.
    NavigateFrame {
        /// Frames to move; negative goes back.
        delta: i32,
    },
    /// Show the layer's animated properties.
    RevealKeyframes,
    /// Show a style (or the whole stack) in the timeline.
    ExpandStyleProperty {
        /// Style id.
        style_id: String,
    },
    /// Open the host's value editor on a style property.
    OpenNativeColorPicker {
        /// Style id.
        style_id: String,
        /// Definition index within the style.
        index: usize,
    },
    /// Flip a color slot's enable flag.
    #[serde(rename = "toggle_pcolor")]
    TogglePColor {
        /// Name of the color-selection effect.
        effect_name: String,
        /// Position of the flag among the effect's children.
        enable_index: usize,
    },
    /// Enable a color slot if needed, then open the host's value editor on it.
    #[serde(rename = "open_pcolor_picker")]
    OpenPColorPicker {
        /// Name of the color-selection effect.
        effect_name: String,
        /// Position of the color among the effect's children.
        color_index: usize,
        /// Position of its enable flag, if it has one.
        enable_index: Option<usize>,
    },
}

/// Translates panel intents into host mutations.
///
/// Every mutating operation runs inside its own labelled [`UndoScope`]. Operations return nothing:
/// an unresolved layer, style, or property makes them a no-op, and a host failure is logged at
/// `debug` and dropped. Callers re-read a snapshot to see the outcome.
pub struct Dispatcher<'h, H: Host + ?Sized> {
    host: &'h mut H,
}

impl<'h, H: Host + ?Sized> Dispatcher<'h, H> {
    /// Dispatcher over `host`.
    pub fn new(host: &'h mut H) -> Self {
        Self { host }
    }

    /// Run a serialized [`Action`].
    #[tracing::instrument(skip(self))]
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::SetPropertyValue {
                style_id,
                index,
                value,
            } => self.set_property_value(style_id, *index, value.clone()),
            Action::OperateKeyframe {
                style_id,
                index,
                action,
            } => self.operate_keyframe(style_id, *index, *action),
            Action::SetFillOpacity { value } => self.set_fill_opacity(*value),
            Action::OperateFillOpacityKeyframe { action } => {
                self.operate_fill_opacity_keyframe(*action)
            }
            Action::AddStyle { style_id } => self.add_style(style_id),
            Action::RemoveStyle { style_id } => self.remove_style(style_id),
            Action::RenameLayer { name } => self.rename_layer(name),
            Action::ApplyBaseName { base_name } => self.apply_base_name(base_name),
            Action::ApplyNameSuffix { suffix } => self.apply_name_suffix(suffix),
            Action::ToggleSolo => self.toggle_solo(),
            Action::ToggleFxEnabled => self.toggle_fx_enabled(),
            Action::NavigateFrame { delta } => self.navigate_frame(*delta),
            Action::RevealKeyframes => self.reveal_keyframes(),
            Action::ExpandStyleProperty { style_id } => self.expand_style_property(style_id),
            Action::OpenNativeColorPicker { style_id, index } => {
                self.open_native_color_picker(style_id, *index)
            }
            Action::TogglePColor {
                effect_name,
                enable_index,
            } => self.toggle_pcolor(effect_name, *enable_index),
            Action::OpenPColorPicker {
                effect_name,
                color_index,
                enable_index,
            } => self.open_pcolor_picker(effect_name, *color_index, *enable_index),
        }
    }

    fn run(&mut self, op: &'static str, f: impl FnOnce(&mut H) -> StyleResult<()>) {
        if let Err(e) = f(&mut *self.host) {
            tracing::debug!(op, error = %e, "operation dropped");
        }
    }

    /// Write definition `index` of `style_id`.
    pub fn set_property_value(&mut self, style_id: &str, index: usize, value: HostValue) {
        self.run("set_property_value", |host| {
            let Some(found) = resolve_style_property(host, style_id, index)? else {
                return Ok(());
            };
            let Some(t) = comp_time(host)? else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Change Value")?;
            write_value(&mut *scope, found.prop, value, t)
        });
    }

    /// Keyframe operation on definition `index` of `style_id`.
    pub fn operate_keyframe(&mut self, style_id: &str, index: usize, action: KeyframeAction) {
        self.run("operate_keyframe", |host| {
            let Some(found) = resolve_style_property(host, style_id, index)? else {
                return Ok(());
            };
            keyframe_in_scope(host, found.prop, action, "K-Frame")
        });
    }

    /// Write the style stack's fill opacity.
    pub fn set_fill_opacity(&mut self, value: f64) {
        self.run("set_fill_opacity", |host| {
            let Some(prop) = active_fill_opacity(host)? else {
                return Ok(());
            };
            let Some(t) = comp_time(host)? else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Change Fill Opacity")?;
            write_value(&mut *scope, prop, HostValue::Number(value), t)
        });
    }

    /// Keyframe operation on the style stack's fill opacity.
    pub fn operate_fill_opacity_keyframe(&mut self, action: KeyframeAction) {
        self.run("operate_fill_opacity_keyframe", |host| {
            let Some(prop) = active_fill_opacity(host)? else {
                return Ok(());
            };
            keyframe_in_scope(host, prop, action, "K-Frame Fill")
        });
    }

    /// Insert `style_id` on the active layer through the host's native command.
    pub fn add_style(&mut self, style_id: &str) {
        self.run("add_style", |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let Some(style) = StyleDescriptor::find(style_id) else {
                return Ok(());
            };
            let insert = NativeCommand {
                names: style.menu_names(),
                fallback: style.command,
            };
            let Some(cmd) = insert.resolve(&*host) else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Add Layer Style")?;
            select_layer_exclusively(&mut *scope, layer.node)?;
            scope.execute_command(cmd)
        });
    }

    /// Delete an enabled style from the active layer. The master style is never removed.
    pub fn remove_style(&mut self, style_id: &str) {
        self.run("remove_style", |host| {
            let Some(style) = StyleDescriptor::find(style_id).filter(|s| !s.is_master()) else {
                return Ok(());
            };
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let Some(stack) = style_stack(host, layer.node)? else {
                return Ok(());
            };
            let Some(group) = style_group(host, stack, style)? else {
                return Ok(());
            };
            if !host.node(group)?.enabled {
                return Ok(());
            }
            let Some(clear) = NativeCommand::CLEAR.resolve(&*host) else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Remove Layer Style")?;
            select_layer_exclusively(&mut *scope, layer.node)?;
            scope.set_node_selected(group, true)?;
            scope.execute_command(clear)
        });
    }

    /// Rename the active layer.
    pub fn rename_layer(&mut self, name: &str) {
        self.rename("rename_layer", "Rename", |_| name.to_string());
    }

    /// Replace the active layer's name with a preset.
    pub fn apply_base_name(&mut self, base_name: &str) {
        self.rename("apply_base_name", "Replace Layer Name", |_| {
            base_name.to_string()
        });
    }

    /// Append `suffix` to the active layer's name after dropping a trailing `" <digits>"`.
    pub fn apply_name_suffix(&mut self, suffix: &str) {
        self.rename("apply_name_suffix", "Rename Suffix", |current| {
            with_suffix(current, suffix)
        });
    }

    fn rename(&mut self, op: &'static str, label: &'static str, f: impl FnOnce(&str) -> String) {
        self.run(op, |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, label)?;
            scope.set_layer_name(layer.node, &f(&layer.name))
        });
    }

    /// Flip the active layer's solo switch.
    pub fn toggle_solo(&mut self) {
        self.run("toggle_solo", |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Toggle Solo")?;
            scope.set_layer_solo(layer.node, !layer.solo)
        });
    }

    /// Set every non-exempt effect to the opposite of the first non-exempt effect's state.
    pub fn toggle_fx_enabled(&mut self) {
        self.run("toggle_fx_enabled", |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let Some(fx) = effect_stack(host, layer.node)? else {
                return Ok(());
            };
            let effects = host.children(fx)?;
            if effects.is_empty() {
                return Ok(());
            }
            let mut scope = UndoScope::open(host, "FX Toggle")?;
            let mut target = None;
            for effect in effects {
                let info = scope.node(effect)?;
                if FX_TOGGLE_EXEMPT.iter().any(|x| info.name.contains(x)) {
                    continue;
                }
                let state = *target.get_or_insert(!info.enabled);
                scope.set_enabled(effect, state)?;
            }
            Ok(())
        });
    }

    /// Move the playhead by `delta` frames, clamped to the composition.
    pub fn navigate_frame(&mut self, delta: i32) {
        self.run("navigate_frame", |host| {
            let Some(comp) = host.active_comp()? else {
                return Ok(());
            };
            let t = comp.time + f64::from(delta) * comp.frame_duration;
            host.set_comp_time(t.min(comp.duration).max(0.0))
        });
    }

    /// Show the active layer's animated properties.
    pub fn reveal_keyframes(&mut self) {
        self.run("reveal_keyframes", |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let Some(cmd) = NativeCommand::REVEAL_KEYFRAMES.resolve(&*host) else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Reveal Keyframes")?;
            select_layer_exclusively(&mut *scope, layer.node)?;
            scope.execute_command(cmd)
        });
    }

    /// Show `style_id` in the timeline; the whole stack when the style is absent.
    pub fn expand_style_property(&mut self, style_id: &str) {
        self.run("expand_style_property", |host| {
            let Some(layer) = host.active_layer()? else {
                return Ok(());
            };
            let Some(stack) = style_stack(host, layer.node)? else {
                return Ok(());
            };
            let group = match StyleDescriptor::find(style_id) {
                Some(style) => style_group(host, stack, style)?,
                None => None,
            };
            let Some(cmd) = NativeCommand::REVEAL_SELECTED.resolve(&*host) else {
                return Ok(());
            };
            let mut scope = UndoScope::open(host, "Expand")?;
            select_layer_exclusively(&mut *scope, layer.node)?;
            scope.set_node_selected(group.unwrap_or(stack), true)?;
            scope.execute_command(cmd)
        });
    }

    /// Open the host's value editor on definition `index` of `style_id`.
    ///
    /// Selection-only: no undo group. The previous layer selection is restored afterwards.
    pub fn open_native_color_picker(&mut self, style_id: &str, index: usize) {
        self.run("open_native_color_picker", |host| {
            let Some(found) = resolve_style_property(host, style_id, index)? else {
                return Ok(());
            };
            open_value_editor(host, found.layer.node, found.prop)
        });
    }

    /// Flip the enable flag at `enable_index` of the named color-selection effect.
    pub fn toggle_pcolor(&mut self, effect_name: &str, enable_index: usize) {
        self.run("toggle_pcolor", |host| {
            let Some((_, flag)) = effect_child(host, effect_name, enable_index)? else {
                return Ok(());
            };
            let Some(t) = comp_time(host)? else {
                return Ok(());
            };
            let flipped = match host.value(flag)? {
                HostValue::Bool(b) => HostValue::Bool(!b),
                other if other.as_f64() == Some(1.0) => HostValue::Number(0.0),
                _ => HostValue::Number(1.0),
            };
            let mut scope = UndoScope::open(host, "Toggle P_Color")?;
            write_value(&mut *scope, flag, flipped, t)
        });
    }

    /// Open the host's value editor on a color slot, enabling the slot first if it is off.
    pub fn open_pcolor_picker(
        &mut self,
        effect_name: &str,
        color_index: usize,
        enable_index: Option<usize>,
    ) {
        self.run("open_pcolor_picker", |host| {
            let Some((layer, color)) = effect_child(host, effect_name, color_index)? else {
                return Ok(());
            };
            if let Some(j) = enable_index
                && let Some((_, flag)) = effect_child(host, effect_name, j)?
            {
                let current = host.value(flag)?;
                if !current.is_truthy()
                    && let Some(t) = comp_time(host)?
                {
                    let on = match current {
                        HostValue::Bool(_) => HostValue::Bool(true),
                        _ => HostValue::Number(1.0),
                    };
                    let mut scope = UndoScope::open(host, "Auto-Enable P_Color")?;
                    write_value(&mut *scope, flag, on, t)?;
                }
            }
            open_value_editor(host, layer, color)
        });
    }
}

fn comp_time<H: Host + ?Sized>(host: &H) -> StyleResult<Option<f64>> {
    Ok(host.active_comp()?.map(|c| c.time))
}

/// Keyed properties get a key at `t`; static ones get a new static value.
fn write_value<H: Host + ?Sized>(
    host: &mut H,
    prop: NodeId,
    value: HostValue,
    t: f64,
) -> StyleResult<()> {
    if host.num_keys(prop)? > 0 {
        host.set_value_at_time(prop, t, value)
    } else {
        host.set_value(prop, value)
    }
}

fn keyframe_in_scope<H: Host + ?Sized>(
    host: &mut H,
    prop: NodeId,
    action: KeyframeAction,
    label: &'static str,
) -> StyleResult<()> {
    if !host.can_vary_over_time(prop)? {
        return Ok(());
    }
    let Some(t) = comp_time(host)? else {
        return Ok(());
    };
    let mut scope = UndoScope::open(host, label)?;
    apply_keyframe_action(&mut *scope, prop, action, t)
}

fn active_fill_opacity<H: Host + ?Sized>(host: &H) -> StyleResult<Option<NodeId>> {
    let Some(layer) = host.active_layer()? else {
        return Ok(None);
    };
    let Some(stack) = style_stack(host, layer.node)? else {
        return Ok(None);
    };
    fill_opacity(host, stack)
}

/// Deselect every selected layer, then select `layer`. Returns the previous selection.
fn select_layer_exclusively<H: Host + ?Sized>(
    host: &mut H,
    layer: NodeId,
) -> StyleResult<Vec<NodeId>> {
    let previous = host.selected_layers()?;
    for &other in &previous {
        host.set_layer_selected(other, false)?;
    }
    host.set_layer_selected(layer, true)?;
    Ok(previous)
}

fn open_value_editor<H: Host + ?Sized>(
    host: &mut H,
    layer: NodeId,
    prop: NodeId,
) -> StyleResult<()> {
    let Some(cmd) = NativeCommand::EDIT_VALUE.resolve(&*host) else {
        return Ok(());
    };
    let previous = select_layer_exclusively(host, layer)?;
    host.set_node_selected(prop, true)?;
    host.execute_command(cmd)?;
    for other in previous {
        host.set_layer_selected(other, true)?;
    }
    Ok(())
}

/// Layer and child `index` of the named effect on the active layer's effect stack.
fn effect_child<H: Host + ?Sized>(
    host: &H,
    effect_name: &str,
    index: usize,
) -> StyleResult<Option<(NodeId, NodeId)>> {
    let Some(layer) = host.active_layer()? else {
        return Ok(None);
    };
    let Some(fx) = effect_stack(host, layer.node)? else {
        return Ok(None);
    };
    let Some(effect) = host.child_by_key(fx, effect_name)? else {
        return Ok(None);
    };
    Ok(host
        .children(effect)?
        .get(index)
        .map(|&child| (layer.node, child)))
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/dispatcher.rs"]
mod tests;
