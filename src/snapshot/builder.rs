use crate::catalog::props::{PropertyDefinition, ValueKind, definitions};
use crate::catalog::styles::{STYLE_CATALOG, StyleDescriptor};
use crate::foundation::core::{Rgb, round_tenth};
use crate::foundation::error::{StyleError, StyleResult};
use crate::host::{Host, HostValue, NodeId, ValueType};
use crate::resolve::resolver::{
    fill_opacity, keyframe_state, pcolor_effect, resolve_property, style_group, style_stack,
};
use crate::snapshot::hash::{LayerHash, layer_hash};
use crate::snapshot::model::{
    FillOpacityState, PColorState, PanelSnapshot, PropState, PropValue, StyleNavState,
};

/// Maximum number of quick-access color slots reported.
pub const MAX_PCOLOR_SLOTS: usize = 8;

/// Build the panel snapshot for `requested_style_id` from the host's current state.
///
/// Never fails: a host failure empties the field it affects and is logged at `debug`. Reads only.
#[tracing::instrument(skip(host))]
pub fn build_snapshot<H: Host + ?Sized>(host: &H, requested_style_id: &str) -> PanelSnapshot {
    let layer = match host.active_layer() {
        Ok(Some(layer)) => layer,
        Ok(None) => return PanelSnapshot::empty(requested_style_id),
        Err(e) => {
            tracing::debug!(error = %e, "active layer unavailable");
            return PanelSnapshot::empty(requested_style_id);
        }
    };

    let comp_time = soft("composition", host.active_comp())
        .flatten()
        .map_or(0.0, |c| c.time);
    let stack = soft("style stack", style_stack(host, layer.node)).flatten();
    let (current_style_id, current_group) = select_style(host, stack, requested_style_id);

    let style_nav = STYLE_CATALOG
        .iter()
        .map(|style| nav_state(host, stack, style))
        .collect();

    let fill_opacity =
        stack.and_then(|s| soft("fill opacity", fill_opacity_state(host, s, comp_time)).flatten());

    let props = match current_group {
        Some(group) if is_enabled(host, group) => {
            prop_states(host, group, &current_style_id, comp_time)
        }
        _ => Vec::new(),
    };

    let p_colors = soft("pcolor slots", pcolor_slots(host, layer.node)).unwrap_or_default();
    let layer_hash = soft("layer hash", layer_hash(host, &layer)).unwrap_or(LayerHash::NONE);

    PanelSnapshot {
        has_layer: true,
        layer_name: layer.name,
        current_style_id,
        style_nav,
        fill_opacity,
        props,
        p_colors,
        comp_time,
        is_solo_active: layer.solo,
        layer_hash,
    }
}

fn soft<T>(what: &'static str, r: StyleResult<T>) -> Option<T> {
    match r {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(what, error = %e, "snapshot field degraded");
            None
        }
    }
}

fn is_enabled<H: Host + ?Sized>(host: &H, node: NodeId) -> bool {
    host.node(node).is_ok_and(|n| n.enabled)
}

fn group_of<H: Host + ?Sized>(host: &H, stack: NodeId, style: &StyleDescriptor) -> Option<NodeId> {
    soft("style group", style_group(host, stack, style)).flatten()
}

/// The requested style if it is present and enabled, else the first present-and-enabled style in
/// catalog order. With no candidate the requested id stays current, with whatever group it has.
fn select_style<H: Host + ?Sized>(
    host: &H,
    stack: Option<NodeId>,
    requested: &str,
) -> (String, Option<NodeId>) {
    let Some(stack) = stack else {
        return (requested.to_string(), None);
    };
    let requested_style = StyleDescriptor::find(requested);
    let group = requested_style.and_then(|style| group_of(host, stack, style));
    if let (Some(style), Some(g)) = (requested_style, group)
        && (style.is_master() || is_enabled(host, g))
    {
        return (requested.to_string(), group);
    }

    let fallback = STYLE_CATALOG
        .iter()
        .filter(|style| !style.is_master())
        .find_map(|style| {
            group_of(host, stack, style)
                .filter(|&g| is_enabled(host, g))
                .map(|g| (style.id, g))
        });
    match fallback {
        Some((id, g)) => {
            tracing::debug!(requested, adopted = id, "auto-corrected current style");
            (id.to_string(), Some(g))
        }
        None => (requested.to_string(), group),
    }
}

fn nav_state<H: Host + ?Sized>(
    host: &H,
    stack: Option<NodeId>,
    style: &StyleDescriptor,
) -> StyleNavState {
    let group = stack.and_then(|s| group_of(host, s, style));
    let is_existing = group.is_some();
    let enabled = if style.is_master() {
        is_existing
    } else {
        group.is_some_and(|g| is_enabled(host, g))
    };
    StyleNavState {
        id: style.id,
        is_existing,
        is_enabled: enabled,
    }
}

fn fill_opacity_state<H: Host + ?Sized>(
    host: &H,
    stack: NodeId,
    t: f64,
) -> StyleResult<Option<FillOpacityState>> {
    let Some(prop) = fill_opacity(host, stack)? else {
        return Ok(None);
    };
    let value = host
        .value(prop)?
        .as_f64()
        .ok_or_else(|| StyleError::resolution("fill opacity is not a scalar"))?;
    Ok(Some(FillOpacityState {
        value: round_tenth(value),
        keys: keyframe_state(host, prop, t)?,
    }))
}

fn prop_states<H: Host + ?Sized>(
    host: &H,
    group: NodeId,
    style_id: &str,
    t: f64,
) -> Vec<PropState> {
    definitions(style_id)
        .iter()
        .enumerate()
        .filter_map(|(index, def)| {
            let prop = resolve_property(host, group, def.keys)?;
            soft("property", prop_state(host, prop, index, def, t))
        })
        .collect()
}

fn prop_state<H: Host + ?Sized>(
    host: &H,
    prop: NodeId,
    index: usize,
    def: &'static PropertyDefinition,
    t: f64,
) -> StyleResult<PropState> {
    let value = coerce(def, &host.value(prop)?)?;
    Ok(PropState {
        index,
        label: def.label,
        kind: def.kind,
        value,
        keys: keyframe_state(host, prop, t)?,
    })
}

/// Shape a host value the way the panel shows values of `def`'s kind.
pub fn coerce(def: &PropertyDefinition, value: &HostValue) -> StyleResult<PropValue> {
    let scalar = || {
        value.as_f64().ok_or_else(|| {
            StyleError::resolution(format!("'{}' expects a scalar, got a color", def.label))
        })
    };
    Ok(match def.kind {
        ValueKind::Number => PropValue::Number(round_tenth(scalar()?)),
        ValueKind::BlendMode => PropValue::BlendMode(scalar()?.round() as i32),
        ValueKind::Boolean => PropValue::Bool(value.is_truthy()),
        ValueKind::Color => {
            let c = value.as_color().ok_or_else(|| {
                StyleError::resolution(format!("'{}' expects a color", def.label))
            })?;
            PropValue::Color(Rgb::from_slice(c))
        }
    })
}

/// Color slots of the layer's color-selection effect, each paired with the flag right before it.
fn pcolor_slots<H: Host + ?Sized>(host: &H, layer: NodeId) -> StyleResult<Vec<PColorState>> {
    let Some(effect) = pcolor_effect(host, layer)? else {
        return Ok(Vec::new());
    };
    let effect_name = host.node(effect)?.name;
    let children = host.children(effect)?;
    let mut slots = Vec::new();
    let mut prev_type = ValueType::NoValue;
    for (i, &child) in children.iter().enumerate() {
        if slots.len() == MAX_PCOLOR_SLOTS {
            break;
        }
        let value_type = host.node(child)?.value_type;
        if value_type == ValueType::Color {
            let color = host
                .value(child)?
                .as_color()
                .map(Rgb::from_slice)
                .unwrap_or_default();
            let enable_index = (i > 0 && prev_type == ValueType::OneD).then(|| i - 1);
            let is_disabled = match enable_index {
                Some(j) => !host.value(children[j])?.is_truthy(),
                None => false,
            };
            slots.push(PColorState {
                color,
                is_disabled,
                effect_name: effect_name.clone(),
                prop_index: i,
                enable_index,
            });
        }
        prev_type = value_type;
    }
    Ok(slots)
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/builder.rs"]
mod tests;
