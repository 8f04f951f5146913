use super::*;

#[test]
fn strips_whitespace_and_digits() {
    assert_eq!(strip_numeric_suffix("Hair 12"), "Hair");
    assert_eq!(strip_numeric_suffix("Hair \t3"), "Hair");
}

#[test]
fn keeps_digits_without_separator() {
    assert_eq!(strip_numeric_suffix("line2"), "line2");
    assert_eq!(strip_numeric_suffix("Hair"), "Hair");
    assert_eq!(strip_numeric_suffix("Hair "), "Hair ");
}

#[test]
fn suffix_is_appended_after_stripping() {
    assert_eq!(with_suffix("髪 2", SUFFIXES[0]), "髪影");
    assert_eq!(with_suffix("髪", "ハイライト"), "髪ハイライト");
}

#[test]
fn base_names_are_distinct_and_survive_suffixing() {
    for (i, name) in BASE_NAMES.iter().enumerate() {
        assert!(!name.is_empty());
        assert!(!BASE_NAMES[..i].contains(name));
        assert_eq!(strip_numeric_suffix(name), *name);
    }
    assert_eq!(with_suffix(BASE_NAMES[2], SUFFIXES[0]), "瞳影");
}
