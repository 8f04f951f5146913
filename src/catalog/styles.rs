use crate::host::CommandId;

/// Id of the catalog entry that stands for the whole style stack.
pub const MASTER_STYLE_ID: &str = "masterStyle";

/// Match name of the layer's style stack group.
pub const STYLE_STACK_KEY: &str = "ADBE Layer Styles";

/// Static catalog entry for one navigable style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleDescriptor {
    /// Stable id used across the panel contract.
    pub id: &'static str,
    /// Short display label.
    pub label: &'static str,
    /// Primary match name of the style's group inside the stack.
    pub match_key: &'static str,
    /// Fallback match names tried after `match_key`.
    pub fallback_keys: &'static [&'static str],
    /// Legacy numeric "insert this style" command.
    pub command: Option<CommandId>,
}

impl StyleDescriptor {
    /// Look up a catalog entry by id.
    pub fn find(id: &str) -> Option<&'static StyleDescriptor> {
        STYLE_CATALOG.iter().find(|d| d.id == id)
    }

    /// Whether this entry denotes the whole stack rather than a single style.
    pub fn is_master(&self) -> bool {
        self.id == MASTER_STYLE_ID
    }

    /// Whether a host match name identifies this style.
    pub fn matches(&self, match_name: &str) -> bool {
        self.match_key == match_name || self.fallback_keys.contains(&match_name)
    }

    /// Localized menu names for the native "insert this style" command, in lookup order.
    pub fn menu_names(&self) -> &'static [&'static str] {
        match self.id {
            "dropShadow" => &["ドロップシャドウ", "Drop Shadow"],
            "innerShadow" => &["シャドウ(内側)", "シャドウ (内側)", "Inner Shadow"],
            "outerGlow" => &["光彩(外側)", "光彩 (外側)", "Outer Glow"],
            "innerGlow" => &["光彩(内側)", "光彩 (内側)", "Inner Glow"],
            "bevelEmboss" => &["ベベルとエンボス", "Bevel and Emboss"],
            "chromeFX" => &["サテン", "Satin"],
            "solidFill" => &["カラーオーバーレイ", "Color Overlay"],
            "gradientFill" => &["グラデーションオーバーレイ", "Gradient Overlay"],
            "frameFX" => &["境界線", "Stroke"],
            _ => &[],
        }
    }
}

const fn style(
    id: &'static str,
    label: &'static str,
    match_key: &'static str,
    fallback_keys: &'static [&'static str],
    command: u32,
) -> StyleDescriptor {
    StyleDescriptor {
        id,
        label,
        match_key,
        fallback_keys,
        command: Some(CommandId(command)),
    }
}

/// Every navigable style in panel order. The auto-selection fallback scans in this order.
pub static STYLE_CATALOG: [StyleDescriptor; 10] = [
    style(
        "innerShadow",
        "内シ",
        "innerShadow/enabled",
        &["ADBE Layer Style Inner Shadow"],
        9001,
    ),
    style(
        "bevelEmboss",
        "ベベ",
        "bevelEmboss/enabled",
        &["ADBE Layer Style Bevel Emboss"],
        9004,
    ),
    style(
        "dropShadow",
        "ドシ",
        "dropShadow/enabled",
        &["ADBE Layer Style Drop Shadow"],
        9000,
    ),
    style(
        "outerGlow",
        "外光",
        "outerGlow/enabled",
        &["ADBE Layer Style Outer Glow"],
        9002,
    ),
    style(
        "innerGlow",
        "内光",
        "innerGlow/enabled",
        &["ADBE Layer Style Inner Glow"],
        9003,
    ),
    style(
        "chromeFX",
        "サテ",
        "chromeFX/enabled",
        &["ADBE Layer Style Satin"],
        9005,
    ),
    style(
        "solidFill",
        "カラ",
        "solidFill/enabled",
        &["ADBE Layer Style Color Overlay"],
        9006,
    ),
    style(
        "gradientFill",
        "グラ",
        "gradientFill/enabled",
        &["ADBE Layer Style Gradient Overlay"],
        9007,
    ),
    style(
        "frameFX",
        "境界",
        "frameFX/enabled",
        &["ADBE Layer Style Stroke"],
        9008,
    ),
    StyleDescriptor {
        id: MASTER_STYLE_ID,
        label: "全L",
        match_key: STYLE_STACK_KEY,
        fallback_keys: &[STYLE_STACK_KEY],
        command: None,
    },
];

#[cfg(test)]
#[path = "../../tests/unit/catalog/styles.rs"]
mod tests;
