use crate::catalog::props::{PropertyDefinition, definition};
use crate::catalog::styles::{STYLE_STACK_KEY, StyleDescriptor};
use crate::foundation::core::KEY_EPSILON;
use crate::foundation::error::StyleResult;
use crate::host::{Host, LayerInfo, NodeId};
use crate::snapshot::model::KeyframeState;

/// Match name of a layer's effect stack.
pub const EFFECT_STACK_KEY: &str = "ADBE Effect Parade";

/// Names of the effect that contributes quick-access color slots, in lookup order.
pub const PCOLOR_EFFECT_NAMES: [&str; 2] = ["P_ColorSelection", "ColorSelection"];

const BLEND_OPTIONS_KEY: &str = "ADBE Blend Options Group";
const ADV_BLEND_KEY: &str = "ADBE Adv Blend Group";
const FILL_OPACITY_KEYS: [&str; 2] = ["ADBE Layer Fill Opacity2", "ADBE Layer Fill Opacity"];

/// Find the property of `group` that one of `keys` names.
///
/// Candidates are tried in order, each exhausted before the next: a direct lookup under the
/// conventional `ADBE ` prefix, then under the raw key, then a case-insensitive substring scan over
/// every child's match name and display name. Host failures on a single lookup or child are
/// skipped, so a miss is always `None`.
pub fn resolve_property<H: Host + ?Sized>(host: &H, group: NodeId, keys: &[&str]) -> Option<NodeId> {
    keys.iter().find_map(|key| {
        direct_lookup(host, group, key).or_else(|| substring_scan(host, group, key))
    })
}

fn direct_lookup<H: Host + ?Sized>(host: &H, group: NodeId, key: &str) -> Option<NodeId> {
    [format!("ADBE {key}"), key.to_string()]
        .iter()
        .find_map(|k| match host.child_by_key(group, k) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(key = %k, error = %e, "direct property lookup failed");
                None
            }
        })
}

fn substring_scan<H: Host + ?Sized>(host: &H, group: NodeId, key: &str) -> Option<NodeId> {
    let needle = key.to_lowercase();
    let children = host.children(group).ok()?;
    children.into_iter().find(|&child| {
        host.node(child).is_ok_and(|info| {
            info.match_name.to_lowercase().contains(&needle)
                || info.name.to_lowercase().contains(&needle)
        })
    })
}

/// The layer's style stack, if it has one.
pub fn style_stack<H: Host + ?Sized>(host: &H, layer: NodeId) -> StyleResult<Option<NodeId>> {
    host.child_by_key(layer, STYLE_STACK_KEY)
}

/// The layer's effect stack, if it has one.
pub fn effect_stack<H: Host + ?Sized>(host: &H, layer: NodeId) -> StyleResult<Option<NodeId>> {
    host.child_by_key(layer, EFFECT_STACK_KEY)
}

/// The group of `style` inside `stack`. The master style is the stack itself.
///
/// The primary match key wins over fallback keys regardless of child order.
pub fn style_group<H: Host + ?Sized>(
    host: &H,
    stack: NodeId,
    style: &StyleDescriptor,
) -> StyleResult<Option<NodeId>> {
    if style.is_master() {
        return Ok(Some(stack));
    }
    let mut fallback = None;
    for child in host.children(stack)? {
        let info = host.node(child)?;
        if info.match_name == style.match_key {
            return Ok(Some(child));
        }
        if fallback.is_none() && style.fallback_keys.contains(&info.match_name.as_str()) {
            fallback = Some(child);
        }
    }
    Ok(fallback)
}

/// Fill opacity inside the stack's advanced blend options; the current key wins over the legacy one.
pub fn fill_opacity<H: Host + ?Sized>(host: &H, stack: NodeId) -> StyleResult<Option<NodeId>> {
    let Some(blend) = host.child_by_key(stack, BLEND_OPTIONS_KEY)? else {
        return Ok(None);
    };
    let Some(adv) = host.child_by_key(blend, ADV_BLEND_KEY)? else {
        return Ok(None);
    };
    for key in FILL_OPACITY_KEYS {
        if let Some(found) = host.child_by_key(adv, key)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// The recognized color-selection effect on the layer, if present.
pub fn pcolor_effect<H: Host + ?Sized>(host: &H, layer: NodeId) -> StyleResult<Option<NodeId>> {
    let Some(fx) = effect_stack(host, layer)? else {
        return Ok(None);
    };
    for name in PCOLOR_EFFECT_NAMES {
        if let Some(found) = host.child_by_key(fx, name)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Keyframe metadata of `prop` at time `t`.
///
/// Adjacency comes from the nearest key only: on it (within [`KEY_EPSILON`]) both neighbours are
/// checked by index; otherwise the side the key lies on is known to have one.
pub fn keyframe_state<H: Host + ?Sized>(host: &H, prop: NodeId, t: f64) -> StyleResult<KeyframeState> {
    let mut state = KeyframeState {
        can_vary_over_time: host.can_vary_over_time(prop)?,
        num_keys: host.num_keys(prop)?,
        ..KeyframeState::default()
    };
    if !state.can_vary_over_time || state.num_keys == 0 {
        return Ok(state);
    }
    let idx = host.nearest_key_index(prop, t)?;
    let kt = host.key_time(prop, idx)?;
    let last = state.num_keys - 1;
    state.on_keyframe = (kt - t).abs() < KEY_EPSILON;
    if state.on_keyframe {
        state.has_prev = idx > 0;
        state.has_next = idx < last;
    } else if kt < t {
        state.has_prev = true;
        state.has_next = idx < last;
    } else if kt > t {
        state.has_next = true;
        state.has_prev = idx > 0;
    }
    Ok(state)
}

/// A style property located on the active layer.
#[derive(Clone, Debug)]
pub struct ResolvedProperty {
    /// Layer the property lives on.
    pub layer: LayerInfo,
    /// The property node.
    pub prop: NodeId,
    /// Its definition.
    pub definition: &'static PropertyDefinition,
}

/// Locate definition `index` of `style_id` on the active layer.
///
/// `None` when there is no layer, no stack, the style is missing or switched off, the index is out
/// of range, or no candidate key resolves.
pub fn resolve_style_property<H: Host + ?Sized>(
    host: &H,
    style_id: &str,
    index: usize,
) -> StyleResult<Option<ResolvedProperty>> {
    let Some(layer) = host.active_layer()? else {
        return Ok(None);
    };
    let Some(stack) = style_stack(host, layer.node)? else {
        return Ok(None);
    };
    let Some(style) = StyleDescriptor::find(style_id) else {
        return Ok(None);
    };
    let Some(group) = style_group(host, stack, style)? else {
        return Ok(None);
    };
    if !host.node(group)?.enabled {
        return Ok(None);
    }
    let Some(def) = definition(style_id, index) else {
        return Ok(None);
    };
    Ok(resolve_property(host, group, def.keys).map(|prop| ResolvedProperty {
        layer,
        prop,
        definition: def,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
