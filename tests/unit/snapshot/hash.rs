use super::*;
use crate::catalog::styles::STYLE_STACK_KEY;
use crate::host::fixture::FixtureHost;
use crate::host::{CompInfo, HostValue, NodeId};
use crate::resolve::resolver::EFFECT_STACK_KEY;

fn layer_with_styles() -> (FixtureHost, NodeId, NodeId) {
    let mut host = FixtureHost::new(CompInfo {
        id: 4,
        time: 0.0,
        frame_duration: 0.04,
        duration: 2.0,
    });
    let layer = host.add_layer("L");
    host.select_layer(layer);
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    let ds = host.add_group(stack, "dropShadow/enabled", "Drop Shadow");
    host.add_group(stack, "innerGlow/enabled", "Inner Glow");
    (host, layer, ds)
}

fn current(host: &FixtureHost) -> LayerHash {
    let layer = host.active_layer().unwrap().unwrap();
    layer_hash(host, &layer).unwrap()
}

#[test]
fn stable_without_mutation() {
    let (host, _, _) = layer_with_styles();
    assert_eq!(current(&host), current(&host));
    assert!(!current(&host).is_none());
}

#[test]
fn enabled_bit_flip_changes_hash() {
    let (mut host, _, ds) = layer_with_styles();
    let before = current(&host);
    host.force_enabled(ds, false);
    assert_ne!(before, current(&host));
    host.force_enabled(ds, true);
    assert_eq!(before, current(&host));
}

#[test]
fn effect_count_changes_hash() {
    let (mut host, layer, _) = layer_with_styles();
    let before = current(&host);
    let fx = host.add_group(layer, EFFECT_STACK_KEY, "Effects");
    let with_empty_stack = current(&host);
    assert_ne!(before, with_empty_stack);
    host.add_group(fx, "ADBE Fill", "Fill");
    assert_ne!(with_empty_stack, current(&host));
}

#[test]
fn value_edits_do_not_change_hash() {
    let (mut host, _, ds) = layer_with_styles();
    let op = host.add_property(ds, "dropShadow/opacity", "Opacity", HostValue::Number(75.0));
    let before = current(&host);
    host.set_value(op, HostValue::Number(10.0)).unwrap();
    assert_eq!(before, current(&host));
}

#[test]
fn different_layer_changes_hash() {
    let (mut host, layer, _) = layer_with_styles();
    let first = current(&host);
    let other = host.add_layer("M");
    host.set_layer_selected(layer, false).unwrap();
    host.select_layer(other);
    assert_ne!(first, current(&host));
}

#[test]
fn renders_as_32_hex_digits() {
    assert_eq!(
        LayerHash::NONE.to_string(),
        "00000000000000000000000000000000"
    );
    let h = LayerHash { hi: 0xab, lo: 1 };
    assert_eq!(h.to_string(), "00000000000000ab0000000000000001");
    assert_eq!(
        serde_json::to_string(&h).unwrap(),
        "\"00000000000000ab0000000000000001\""
    );
}
