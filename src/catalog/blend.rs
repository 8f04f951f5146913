/// One blend mode as shown in the selector, with the host's numeric code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BlendModeEntry {
    /// Display name.
    pub name: &'static str,
    /// Host code.
    pub code: i32,
}

const fn mode(name: &'static str, code: i32) -> BlendModeEntry {
    BlendModeEntry { name, code }
}

/// Selector order. Codes are sparse, so widgets index by position, never by code.
pub static BLEND_MODES: [BlendModeEntry; 25] = [
    mode("通常", 1),
    mode("ﾃﾞｨｻﾞ", 2),
    mode("比較(暗)", 4),
    mode("乗算", 5),
    mode("焼込ｶﾗｰ", 6),
    mode("焼込ﾘﾆｱ", 7),
    mode("ｶﾗｰ比較(暗)", 8),
    mode("比較(明)", 10),
    mode("ｽｸﾘｰﾝ", 11),
    mode("覆焼ｶﾗｰ", 12),
    mode("覆焼ﾘﾆｱ", 13),
    mode("ｶﾗｰ比較(明)", 14),
    mode("ｵｰﾊﾞｰﾚｲ", 16),
    mode("ｿﾌﾄﾗｲﾄ", 17),
    mode("ﾊｰﾄﾞﾗｲﾄ", 18),
    mode("ﾋﾞﾋﾞｯﾄﾞ", 19),
    mode("ﾘﾆｱﾗｲﾄ", 20),
    mode("ﾋﾟﾝﾗｲﾄ", 21),
    mode("ﾊｰﾄﾞﾐｯｸｽ", 22),
    mode("差", 24),
    mode("除外", 25),
    mode("色相", 27),
    mode("彩度", 28),
    mode("ｶﾗｰ", 29),
    mode("輝度", 30),
];

/// Selector position of a host code; unknown codes select the first entry.
pub fn index_of_code(code: i32) -> usize {
    BLEND_MODES.iter().position(|m| m.code == code).unwrap_or(0)
}

/// Host code at a selector position; out-of-range positions yield the first entry's code.
pub fn code_at_index(index: usize) -> i32 {
    BLEND_MODES.get(index).unwrap_or(&BLEND_MODES[0]).code
}

/// Display names in selector order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BLEND_MODES.iter().map(|m| m.name)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/blend.rs"]
mod tests;
