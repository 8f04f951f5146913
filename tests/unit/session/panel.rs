use super::*;
use crate::catalog::styles::STYLE_STACK_KEY;
use crate::host::fixture::FixtureHost;
use crate::host::{CompInfo, NodeId};
use crate::snapshot::model::PropValue;
use std::sync::mpsc;
use std::time::{Duration, Instant};

fn panel() -> (Panel<FixtureHost>, NodeId, NodeId) {
    let mut host = FixtureHost::new(CompInfo {
        id: 3,
        time: 0.0,
        frame_duration: 0.04,
        duration: 4.0,
    });
    let layer = host.add_layer("Hair");
    host.select_layer(layer);
    let stack = host.add_group(layer, STYLE_STACK_KEY, "Layer Styles");
    let g = host.add_group(stack, "dropShadow/enabled", "Drop Shadow");
    host.add_property(g, "dropShadow/opacity", "Opacity", HostValue::Number(75.0));
    let angle = host.add_property(g, "dropShadow/angle", "Angle", HostValue::Number(120.0));
    (Panel::new(host), layer, angle)
}

#[test]
fn mutation_is_visible_in_next_snapshot() {
    let (panel, _, _) = panel();
    panel.set_property_value("dropShadow", 1, HostValue::Number(40.0));
    let snap = panel.get_snapshot("dropShadow");
    assert_eq!(snap.prop(1).unwrap().value, PropValue::Number(40.0));
}

#[test]
fn scrub_writes_every_move_and_starts_from_the_captured_value() {
    let (panel, _, _) = panel();
    let g = panel.begin_scrub("dropShadow", 1).unwrap();
    panel.scrub("dropShadow", 1, &g, 10.0);
    panel.scrub("dropShadow", 1, &g, 20.0);
    panel.settle();
    let snap = panel.get_snapshot("dropShadow");
    assert_eq!(snap.prop(1).unwrap().value, PropValue::Number(95.0));
    assert_eq!(lock_host(panel.host()).undo_labels().len(), 2);
}

#[test]
fn scrub_needs_the_current_style_and_a_scrubbable_kind() {
    let (panel, _, _) = panel();
    assert!(panel.begin_scrub("innerShadow", 1).is_none());
    assert!(panel.begin_scrub("dropShadow", 0).is_none());
}

#[test]
fn nudge_steps_angles_by_five() {
    let (panel, _, angle) = panel();
    panel.nudge("dropShadow", 2, false);
    assert_eq!(
        lock_host(panel.host()).static_value(angle),
        Some(HostValue::Number(115.0))
    );
}

#[test]
fn polling_observes_mutations_after_refresh() {
    let (mut panel, layer, _) = panel();
    let (tx, rx) = mpsc::channel();
    let opts = PollOpts {
        active_interval: Duration::from_millis(5),
        idle_interval: Duration::from_millis(50),
        idle_threshold: Duration::from_millis(100),
    };
    panel
        .start_polling(opts, "dropShadow", move |u| {
            let _ = tx.send(u);
        })
        .unwrap();
    assert!(panel.is_polling());
    rx.recv_timeout(Duration::from_secs(5)).unwrap();

    panel.toggle_solo();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        let u = rx.recv_timeout(left).unwrap();
        if u.snapshot.is_solo_active {
            break;
        }
    }
    assert!(lock_host(panel.host()).is_solo(layer));

    panel.stop_polling();
    assert!(!panel.is_polling());
}

#[test]
fn apply_runs_actions() {
    let (panel, layer, _) = panel();
    let action: Action = serde_json::from_str(r#"{"op": "rename_layer", "name": "Eye"}"#).unwrap();
    panel.apply(&action);
    assert_eq!(lock_host(panel.host()).name_of(layer), "Eye");
}
