use super::*;
use crate::catalog::styles::MASTER_STYLE_ID;
use crate::host::fixture::FixtureHost;
use crate::host::{CompInfo, HostValue};

fn host_at(time: f64) -> FixtureHost {
    FixtureHost::new(CompInfo {
        id: 1,
        time,
        frame_duration: 0.04,
        duration: 10.0,
    })
}

fn num(v: f64) -> HostValue {
    HostValue::Number(v)
}

#[test]
fn prefixed_direct_lookup_wins() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let raw = host.add_property(layer, "Opacity", "Opacity", num(1.0));
    let prefixed = host.add_property(layer, "ADBE Opacity", "Opacity 2", num(2.0));
    assert_eq!(resolve_property(&host, layer, &["Opacity"]), Some(prefixed));
    assert_eq!(resolve_property(&host, layer, &["opacity 2"]), Some(prefixed));
    assert_eq!(resolve_property(&host, layer, &["Opacity", "x"]), Some(prefixed));
    assert_ne!(raw, prefixed);
}

#[test]
fn substring_scan_is_case_insensitive_over_both_names() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let by_match = host.add_property(layer, "dropShadow/opacity", "Opacité", num(75.0));
    let by_name = host.add_property(layer, "x/y", "Shadow Color", num(0.0));
    assert_eq!(resolve_property(&host, layer, &["Opacity"]), Some(by_match));
    assert_eq!(resolve_property(&host, layer, &["color"]), Some(by_name));
}

#[test]
fn first_candidate_is_exhausted_before_the_next() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let _jitter = host.add_property(layer, "Jitter", "Jitter", num(0.0));
    let noise = host.add_property(layer, "outerGlow/Shading Noise", "Noise", num(0.0));
    assert_eq!(
        resolve_property(&host, layer, &["Shading Noise", "Jitter"]),
        Some(noise)
    );
}

#[test]
fn unresolved_keys_are_a_miss() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    host.add_property(layer, "a", "A", num(0.0));
    assert_eq!(resolve_property(&host, layer, &["Distance"]), None);
    assert_eq!(resolve_property(&host, layer, &[]), None);
}

#[test]
fn offline_host_resolves_nothing() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    host.add_property(layer, "Opacity", "Opacity", num(0.0));
    host.set_offline(true);
    assert_eq!(resolve_property(&host, layer, &["Opacity"]), None);
}

#[test]
fn style_group_prefers_primary_key() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    let legacy = host.add_group(stack, "ADBE Layer Style Drop Shadow", "Drop Shadow");
    let style = StyleDescriptor::find("dropShadow").unwrap();
    assert_eq!(style_group(&host, stack, style).unwrap(), Some(legacy));
    let current = host.add_group(stack, "dropShadow/enabled", "Drop Shadow");
    assert_eq!(style_group(&host, stack, style).unwrap(), Some(current));

    let other = StyleDescriptor::find("outerGlow").unwrap();
    assert_eq!(style_group(&host, stack, other).unwrap(), None);
}

#[test]
fn master_style_is_the_stack() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    let master = StyleDescriptor::find(MASTER_STYLE_ID).unwrap();
    assert_eq!(style_group(&host, stack, master).unwrap(), Some(stack));
}

#[test]
fn fill_opacity_prefers_current_key() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    assert_eq!(fill_opacity(&host, stack).unwrap(), None);
    let blend = host.add_group(stack, "ADBE Blend Options Group", "Blending Options");
    let adv = host.add_group(blend, "ADBE Adv Blend Group", "Advanced Blending");
    let legacy = host.add_property(adv, "ADBE Layer Fill Opacity", "Fill Opacity", num(100.0));
    assert_eq!(fill_opacity(&host, stack).unwrap(), Some(legacy));
    let current = host.add_property(adv, "ADBE Layer Fill Opacity2", "Fill Opacity", num(90.0));
    assert_eq!(fill_opacity(&host, stack).unwrap(), Some(current));
}

#[test]
fn pcolor_effect_checks_both_names() {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    assert_eq!(pcolor_effect(&host, layer).unwrap(), None);
    let fx = host.add_group(layer, EFFECT_STACK_KEY, "Effects");
    let legacy = host.add_group(fx, "ColorSelection", "ColorSelection");
    assert_eq!(pcolor_effect(&host, layer).unwrap(), Some(legacy));
    let named = host.add_group(fx, "P_ColorSelection", "P_ColorSelection");
    assert_eq!(pcolor_effect(&host, layer).unwrap(), Some(named));
}

fn keyed(time: f64, keys: &[f64]) -> (FixtureHost, NodeId) {
    let mut host = host_at(time);
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "p", "P", num(0.0));
    for &k in keys {
        host.add_key(p, k, num(k));
    }
    (host, p)
}

#[test]
fn no_keys_means_no_flags() {
    let (host, p) = keyed(1.0, &[]);
    let s = keyframe_state(&host, p, 1.0).unwrap();
    assert!(s.can_vary_over_time);
    assert_eq!(s.num_keys, 0);
    assert!(!s.on_keyframe && !s.has_prev && !s.has_next);
}

#[test]
fn on_middle_key_has_both_neighbours() {
    let (host, p) = keyed(1.0, &[0.0, 1.0, 2.0]);
    let s = keyframe_state(&host, p, 1.003).unwrap();
    assert!(s.on_keyframe);
    assert!(s.has_prev && s.has_next);
}

#[test]
fn on_edge_keys_has_one_neighbour() {
    let (host, p) = keyed(0.0, &[0.0, 1.0]);
    let first = keyframe_state(&host, p, 0.0).unwrap();
    assert!(first.on_keyframe && !first.has_prev && first.has_next);
    let last = keyframe_state(&host, p, 1.0).unwrap();
    assert!(last.on_keyframe && last.has_prev && !last.has_next);
}

#[test]
fn between_keys_uses_nearest_side() {
    let (host, p) = keyed(0.0, &[0.0, 1.0, 2.0]);
    let s = keyframe_state(&host, p, 1.2).unwrap();
    assert!(!s.on_keyframe);
    assert!(s.has_prev && s.has_next);
    let before = keyframe_state(&host, p, -1.0).unwrap();
    assert!(!before.has_prev && before.has_next);
    let after = keyframe_state(&host, p, 5.0).unwrap();
    assert!(after.has_prev && !after.has_next);
}

#[test]
fn static_only_property_reports_keys_but_no_flags() {
    let (mut host, p) = keyed(0.0, &[0.0]);
    host.set_can_vary(p, false);
    let s = keyframe_state(&host, p, 0.0).unwrap();
    assert!(!s.can_vary_over_time);
    assert_eq!(s.num_keys, 1);
    assert!(!s.on_keyframe);
}

fn styled_layer(enabled: bool) -> (FixtureHost, NodeId) {
    let mut host = host_at(0.0);
    let layer = host.add_layer("L");
    host.select_layer(layer);
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    let group = host.add_group(stack, "innerShadow/enabled", "Inner Shadow");
    host.force_enabled(group, enabled);
    let op = host.add_property(group, "innerShadow/opacity", "Opacity", num(80.0));
    (host, op)
}

#[test]
fn style_property_resolves_on_enabled_style() {
    let (host, op) = styled_layer(true);
    let found = resolve_style_property(&host, "innerShadow", 1).unwrap().unwrap();
    assert_eq!(found.prop, op);
    assert_eq!(found.definition.label, "不透明度");
    assert_eq!(found.layer.name, "L");
}

#[test]
fn style_property_misses_quietly() {
    let (host, _) = styled_layer(false);
    assert!(resolve_style_property(&host, "innerShadow", 1).unwrap().is_none());
    let (host, _) = styled_layer(true);
    assert!(resolve_style_property(&host, "innerShadow", 99).unwrap().is_none());
    assert!(resolve_style_property(&host, "innerShadow", 2).unwrap().is_none());
    assert!(resolve_style_property(&host, "nope", 0).unwrap().is_none());
    assert!(resolve_style_property(&host, "dropShadow", 1).unwrap().is_none());
}
