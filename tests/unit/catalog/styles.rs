use super::*;

#[test]
fn catalog_ids_are_unique_and_master_is_last() {
    let mut ids: Vec<_> = STYLE_CATALOG.iter().map(|d| d.id).collect();
    assert_eq!(ids.last().copied(), Some(MASTER_STYLE_ID));
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), STYLE_CATALOG.len());
}

#[test]
fn matches_primary_and_fallback_keys() {
    let d = StyleDescriptor::find("dropShadow").unwrap();
    assert!(d.matches("dropShadow/enabled"));
    assert!(d.matches("ADBE Layer Style Drop Shadow"));
    assert!(!d.matches("innerShadow/enabled"));
}

#[test]
fn every_single_style_has_menu_names_and_a_legacy_command() {
    for d in STYLE_CATALOG.iter().filter(|d| !d.is_master()) {
        assert!(!d.menu_names().is_empty(), "{}", d.id);
        assert!(d.command.is_some(), "{}", d.id);
    }
    let master = StyleDescriptor::find(MASTER_STYLE_ID).unwrap();
    assert!(master.menu_names().is_empty());
    assert!(master.command.is_none());
}

#[test]
fn unknown_id_is_not_found() {
    assert!(StyleDescriptor::find("nope").is_none());
}
