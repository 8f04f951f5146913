use super::*;
use crate::host::fixture::FixtureHost;
use crate::host::{CompInfo, HostValue};

fn host_with_keys(time: f64, keys: &[f64]) -> (FixtureHost, NodeId) {
    let mut host = FixtureHost::new(CompInfo {
        id: 1,
        time,
        frame_duration: 0.04,
        duration: 10.0,
    });
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "p", "P", HostValue::Number(42.0));
    for &k in keys {
        host.add_key(p, k, HostValue::Number(k * 10.0));
    }
    (host, p)
}

#[test]
fn parses_wire_names() {
    assert_eq!("hold_all".parse::<KeyframeAction>().unwrap(), KeyframeAction::HoldAll);
    assert_eq!("prev".parse::<KeyframeAction>().unwrap(), KeyframeAction::Prev);
    assert!("holdAll".parse::<KeyframeAction>().is_err());
    assert_eq!(
        serde_json::to_string(&KeyframeAction::HoldAll).unwrap(),
        "\"hold_all\""
    );
}

#[test]
fn add_keys_current_value_without_changing_it() {
    let (mut host, p) = host_with_keys(1.5, &[]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Add, 1.5).unwrap();
    assert_eq!(host.keys(p), vec![(1.5, HostValue::Number(42.0))]);
    assert_eq!(host.value(p).unwrap(), HostValue::Number(42.0));
}

#[test]
fn add_then_remove_restores_key_count() {
    let (mut host, p) = host_with_keys(1.5, &[0.0, 3.0]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Add, 1.5).unwrap();
    assert_eq!(host.num_keys(p).unwrap(), 3);
    apply_keyframe_action(&mut host, p, KeyframeAction::Remove, 1.5).unwrap();
    assert_eq!(host.num_keys(p).unwrap(), 2);
}

#[test]
fn remove_needs_a_key_within_epsilon() {
    let (mut host, p) = host_with_keys(1.0, &[1.0]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Remove, 1.01).unwrap();
    assert_eq!(host.num_keys(p).unwrap(), 1);
    apply_keyframe_action(&mut host, p, KeyframeAction::Remove, 1.004).unwrap();
    assert_eq!(host.num_keys(p).unwrap(), 0);
    apply_keyframe_action(&mut host, p, KeyframeAction::Remove, 1.0).unwrap();
}

#[test]
fn prev_and_next_step_one_key() {
    let (mut host, p) = host_with_keys(2.0, &[1.0, 2.0, 3.0]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Prev, 2.0).unwrap();
    assert_eq!(host.comp_time(), Some(1.0));
    apply_keyframe_action(&mut host, p, KeyframeAction::Next, 1.0).unwrap();
    assert_eq!(host.comp_time(), Some(2.0));
    apply_keyframe_action(&mut host, p, KeyframeAction::Next, 2.0).unwrap();
    assert_eq!(host.comp_time(), Some(3.0));
}

#[test]
fn between_keys_goes_to_the_adjacent_one() {
    let (host, p) = host_with_keys(0.0, &[1.0, 2.0, 3.0]);
    assert_eq!(prev_key_time(&host, p, 2.2).unwrap(), Some(2.0));
    assert_eq!(next_key_time(&host, p, 2.2).unwrap(), Some(3.0));
    assert_eq!(prev_key_time(&host, p, 1.8).unwrap(), Some(1.0));
    assert_eq!(next_key_time(&host, p, 1.8).unwrap(), Some(2.0));
}

#[test]
fn navigation_stays_inside_key_range() {
    let (mut host, p) = host_with_keys(1.0, &[1.0, 3.0]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Prev, 1.0).unwrap();
    assert_eq!(host.comp_time(), Some(1.0));
    assert_eq!(prev_key_time(&host, p, 0.2).unwrap(), None);
    assert_eq!(next_key_time(&host, p, 3.0).unwrap(), None);
    assert_eq!(next_key_time(&host, p, 9.0).unwrap(), None);
    assert_eq!(next_key_time(&host, p, 0.2).unwrap(), Some(1.0));
}

#[test]
fn navigation_without_keys_is_a_noop() {
    let (mut host, p) = host_with_keys(4.0, &[]);
    apply_keyframe_action(&mut host, p, KeyframeAction::Prev, 4.0).unwrap();
    apply_keyframe_action(&mut host, p, KeyframeAction::Next, 4.0).unwrap();
    assert_eq!(host.comp_time(), Some(4.0));
}

#[test]
fn tolerance_treats_near_keys_as_current() {
    let (host, p) = host_with_keys(0.0, &[1.0, 2.0, 3.0]);
    assert_eq!(prev_key_time(&host, p, 2.0005).unwrap(), Some(1.0));
    assert_eq!(next_key_time(&host, p, 1.9995).unwrap(), Some(3.0));
}

#[test]
fn hold_all_sets_both_sides() {
    let (mut host, p) = host_with_keys(0.0, &[0.0, 1.0, 2.0]);
    apply_keyframe_action(&mut host, p, KeyframeAction::HoldAll, 0.0).unwrap();
    for i in 0..3 {
        assert_eq!(
            host.key_interpolation(p, i),
            (Interpolation::Hold, Interpolation::Hold)
        );
    }
}
