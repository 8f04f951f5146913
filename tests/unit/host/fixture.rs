use super::*;

fn comp() -> CompInfo {
    CompInfo {
        id: 7,
        time: 1.0,
        frame_duration: 0.04,
        duration: 5.0,
    }
}

#[test]
fn active_layer_is_first_selected_with_one_based_index() {
    let mut host = FixtureHost::new(comp());
    let _a = host.add_layer("A");
    let b = host.add_layer("B");
    let c = host.add_layer("C");
    assert!(host.active_layer().unwrap().is_none());
    host.select_layer(c);
    host.select_layer(b);
    let info = host.active_layer().unwrap().unwrap();
    assert_eq!(info.node, b);
    assert_eq!(info.index, 2);
    assert_eq!(info.comp_id, 7);
    assert_eq!(host.selected_layers().unwrap(), vec![b, c]);
}

#[test]
fn no_comp_means_no_layer() {
    let host = FixtureHost::without_comp();
    assert!(host.active_comp().unwrap().is_none());
    assert!(host.active_layer().unwrap().is_none());
}

#[test]
fn child_lookup_matches_match_name_or_display_name() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let g = host.add_group(layer, "ADBE Layer Styles", "Layer Styles");
    assert_eq!(host.child_by_key(layer, "ADBE Layer Styles").unwrap(), Some(g));
    assert_eq!(host.child_by_key(layer, "Layer Styles").unwrap(), Some(g));
    assert_eq!(host.child_by_key(layer, "layer styles").unwrap(), None);
}

#[test]
fn keyed_value_is_sampled_at_playhead() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "op", "Opacity", HostValue::Number(10.0));
    host.add_key(p, 0.0, HostValue::Number(0.0));
    host.add_key(p, 2.0, HostValue::Number(100.0));
    assert_eq!(host.value(p).unwrap(), HostValue::Number(50.0));
    host.set_key_interpolation(p, 0, Interpolation::Hold, Interpolation::Hold)
        .unwrap();
    assert_eq!(host.value(p).unwrap(), HostValue::Number(0.0));
}

#[test]
fn set_value_is_refused_once_keyed() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "op", "Opacity", HostValue::Number(10.0));
    host.set_value(p, HostValue::Number(20.0)).unwrap();
    assert_eq!(host.static_value(p), Some(HostValue::Number(20.0)));
    host.set_value_at_time(p, 1.0, HostValue::Number(30.0))
        .unwrap();
    assert!(host.set_value(p, HostValue::Number(40.0)).is_err());
}

#[test]
fn set_value_at_time_overwrites_same_time() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "op", "Opacity", HostValue::Number(10.0));
    host.set_value_at_time(p, 1.0, HostValue::Number(1.0)).unwrap();
    host.set_value_at_time(p, 0.5, HostValue::Number(2.0)).unwrap();
    host.set_value_at_time(p, 1.0, HostValue::Number(3.0)).unwrap();
    assert_eq!(
        host.keys(p),
        vec![(0.5, HostValue::Number(2.0)), (1.0, HostValue::Number(3.0))]
    );
}

#[test]
fn static_only_property_rejects_keys() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let p = host.add_property(layer, "flag", "Flag", HostValue::Bool(true));
    host.set_can_vary(p, false);
    assert!(!host.can_vary_over_time(p).unwrap());
    assert!(host.set_value_at_time(p, 0.0, HostValue::Bool(false)).is_err());
}

#[test]
fn clear_command_removes_selected_nodes() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    let stack = host.add_group(layer, "ADBE Layer Styles", "Layer Styles");
    let ds = host.add_group(stack, "dropShadow/enabled", "Drop Shadow");
    let op = host.add_property(ds, "dropShadow/opacity", "Opacity", HostValue::Number(75.0));
    host.set_node_selected(ds, true).unwrap();
    host.execute_command(NativeCommand::CLEAR.fallback.unwrap())
        .unwrap();
    assert!(!host.exists(ds));
    assert!(!host.exists(op));
    assert!(host.children(stack).unwrap().is_empty());
}

#[test]
fn style_insert_command_adds_group_to_selected_layer() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    host.select_layer(layer);
    host.execute_command(CommandId(9000)).unwrap();
    let stack = host.child_by_key(layer, STYLE_STACK_KEY).unwrap().unwrap();
    let ds = host
        .child_by_key(stack, "dropShadow/enabled")
        .unwrap()
        .unwrap();
    assert!(host.is_enabled(ds));
    host.execute_command(CommandId(9000)).unwrap();
    assert_eq!(host.children(stack).unwrap().len(), 1);
}

#[test]
fn offline_host_fails_every_call() {
    let mut host = FixtureHost::new(comp());
    host.set_offline(true);
    assert!(host.active_comp().is_err());
    assert!(host.active_layer().is_err());
    assert!(host.begin_undo_group("x").is_err());
}

#[test]
fn read_only_host_fails_writes_only() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    host.set_read_only(true);
    assert!(host.active_comp().unwrap().is_some());
    assert!(host.set_layer_name(layer, "X").is_err());
    host.begin_undo_group("x").unwrap();
    host.end_undo_group().unwrap();
}

#[test]
fn unbalanced_end_is_an_error() {
    let mut host = FixtureHost::new(comp());
    assert!(host.end_undo_group().is_err());
}

#[test]
fn nested_groups_record_only_outermost() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    host.begin_undo_group("outer").unwrap();
    host.begin_undo_group("inner").unwrap();
    host.set_layer_name(layer, "renamed").unwrap();
    host.end_undo_group().unwrap();
    host.end_undo_group().unwrap();
    assert_eq!(host.undo_labels(), vec!["outer"]);
    assert_eq!(host.undo().as_deref(), Some("outer"));
    assert_eq!(host.name_of(layer), "L");
}

#[test]
fn json_document_round_trips_structure() {
    let json = r#"
{
  "comp": { "id": 3, "time": 0.5, "frame_duration": 0.04, "duration": 4.0 },
  "layers": [
    {
      "name": "Face",
      "selected": true,
      "groups": [
        {
          "match_name": "ADBE Layer Styles",
          "name": "Layer Styles",
          "children": [
            {
              "match_name": "innerShadow/enabled",
              "name": "Inner Shadow",
              "children": [
                { "match_name": "innerShadow/opacity", "name": "Opacity", "value": 80 },
                { "match_name": "innerShadow/color", "name": "Color", "value": [1, 0, 0, 1] }
              ]
            }
          ]
        }
      ]
    }
  ],
  "menu_commands": { "Inner Shadow": 9001 }
}
"#;
    let host = FixtureHost::from_reader(json.as_bytes()).unwrap();
    let layer = host.active_layer().unwrap().unwrap();
    assert_eq!(layer.name, "Face");
    assert_eq!(
        host.find_menu_command("Inner Shadow").unwrap(),
        Some(CommandId(9001))
    );

    let doc = host.to_doc();
    let again = FixtureHost::from_doc(&doc);
    let stack = again
        .child_by_key(layer.node, "ADBE Layer Styles")
        .unwrap()
        .unwrap();
    let style = again
        .child_by_key(stack, "innerShadow/enabled")
        .unwrap()
        .unwrap();
    let kids = again.children(style).unwrap();
    assert_eq!(kids.len(), 2);
    assert_eq!(again.node(kids[0]).unwrap().value_type, ValueType::OneD);
    assert_eq!(again.node(kids[1]).unwrap().value_type, ValueType::Color);
    assert_eq!(again.value(kids[0]).unwrap(), HostValue::Number(80.0));
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = FixtureHost::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn deselecting_a_layer_deselects_its_properties() {
    let mut host = FixtureHost::new(comp());
    let layer = host.add_layer("L");
    host.select_layer(layer);
    let p = host.add_property(layer, "p", "P", HostValue::Number(1.0));
    host.set_node_selected(p, true).unwrap();
    host.set_layer_selected(layer, false).unwrap();
    assert!(!host.is_selected(p));
    host.set_layer_selected(layer, true).unwrap();
    assert!(!host.is_selected(p));
}
