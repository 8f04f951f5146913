/// Whole-name presets offered by the rename row.
pub const BASE_NAMES: [&str; 8] = ["名▼", "line", "瞳", "肌", "服", "髪", "襟", "歯"];

/// Suffix presets appended to the current layer name.
pub const SUFFIXES: [&str; 5] = ["影", "ハイライト", "照り返し", "リムライト", "ベース"];

/// Drop a trailing run of whitespace followed by digits (`"Hair 12"` -> `"Hair"`).
///
/// Names ending in digits without separating whitespace are left alone.
pub fn strip_numeric_suffix(name: &str) -> &str {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == name.len() {
        return name;
    }
    let without_space = without_digits.trim_end();
    if without_space.len() == without_digits.len() {
        return name;
    }
    without_space
}

/// Name produced by appending `suffix` after stripping a trailing numeric run.
pub fn with_suffix(name: &str, suffix: &str) -> String {
    format!("{}{suffix}", strip_numeric_suffix(name))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/names.rs"]
mod tests;
