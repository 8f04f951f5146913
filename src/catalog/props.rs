/// Value kind of a style property; drives coercion, scrubbing, and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Plain scalar, shown with one decimal.
    Number,
    /// RGB color.
    Color,
    /// Blend mode, carried as the host's numeric code.
    BlendMode,
    /// On/off flag stored by the host as a number.
    Boolean,
}

impl ValueKind {
    /// Whether a horizontal drag can change values of this kind.
    pub fn is_scrubbable(self) -> bool {
        match self {
            Self::Number | Self::Boolean => true,
            Self::Color | Self::BlendMode => false,
        }
    }
}

/// Editing range applied to values entered or scrubbed in the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// No clamping.
    Unbounded,
    /// `[0, 100]`.
    Percent,
    /// Wrapped into `[0, 360)`.
    Angle,
    /// `>= 0`.
    NonNegative,
    /// Bevel depth, `[0, 1000]`.
    Depth,
}

impl Constraint {
    /// Apply the constraint to a candidate value.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Unbounded => v,
            Self::Percent => v.clamp(0.0, 100.0),
            Self::Angle => v.rem_euclid(360.0),
            Self::NonNegative => v.max(0.0),
            Self::Depth => v.clamp(0.0, 1000.0),
        }
    }

    /// Value change per pixel of horizontal drag.
    pub fn sensitivity(self) -> f64 {
        match self {
            Self::Angle => 1.5,
            Self::Percent => 1.0,
            Self::Unbounded | Self::NonNegative | Self::Depth => 0.5,
        }
    }
}

/// One editable property of a style, with the host keys it may live under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyDefinition {
    /// Display label.
    pub label: &'static str,
    /// Value kind.
    pub kind: ValueKind,
    /// Candidate host keys, tried in order (renamed, versioned, or localized aliases).
    pub keys: &'static [&'static str],
    /// Editing range.
    pub constraint: Constraint,
}

const fn def(
    label: &'static str,
    kind: ValueKind,
    keys: &'static [&'static str],
    constraint: Constraint,
) -> PropertyDefinition {
    PropertyDefinition {
        label,
        kind,
        keys,
        constraint,
    }
}

use Constraint::{Angle, Depth, NonNegative, Percent, Unbounded};
use ValueKind::{BlendMode, Boolean, Color, Number};

const BLEND: PropertyDefinition = def("描画モード", BlendMode, &["blendMode2", "blendMode"], Unbounded);
const OPACITY: PropertyDefinition = def("不透明度", Number, &["Opacity"], Percent);
const ANGLE: PropertyDefinition = def("角度", Number, &["Angle"], Angle);
const DISTANCE: PropertyDefinition = def("距離", Number, &["Distance"], NonNegative);
const SIZE: PropertyDefinition = def("サイズ", Number, &["Blur"], NonNegative);
const NOISE: PropertyDefinition = def("ノイズ", Number, &["Noise"], Unbounded);
const COLOR: PropertyDefinition = def("カラー", Color, &["Color"], Unbounded);
const SPREAD: PropertyDefinition = def("スプレッド", Number, &["ChokeMatte"], NonNegative);
const CHOKE: PropertyDefinition = def("チョーク", Number, &["ChokeMatte"], NonNegative);
const RANGE: PropertyDefinition = def("範囲", Number, &["Range"], Unbounded);
const JITTER: PropertyDefinition = def("ジッター", Number, &["Shading Noise", "Jitter"], Unbounded);

static DROP_SHADOW: [PropertyDefinition; 8] =
    [BLEND, OPACITY, ANGLE, DISTANCE, SPREAD, SIZE, NOISE, COLOR];
static INNER_SHADOW: [PropertyDefinition; 8] =
    [BLEND, OPACITY, ANGLE, DISTANCE, CHOKE, SIZE, NOISE, COLOR];
static OUTER_GLOW: [PropertyDefinition; 8] =
    [BLEND, OPACITY, NOISE, COLOR, SPREAD, SIZE, RANGE, JITTER];
static INNER_GLOW: [PropertyDefinition; 8] =
    [BLEND, OPACITY, NOISE, COLOR, CHOKE, SIZE, RANGE, JITTER];
static BEVEL_EMBOSS: [PropertyDefinition; 9] = [
    def("深さ", Number, &["Strength Ratio"], Depth),
    SIZE,
    ANGLE,
    def("Hモード", BlendMode, &["highlightMode"], Unbounded),
    def("H不透明度", Number, &["highlightOpacity"], Percent),
    def("Hカラー", Color, &["highlightColor"], Unbounded),
    def("Sモード", BlendMode, &["shadowMode"], Unbounded),
    def("S不透明度", Number, &["shadowOpacity"], Percent),
    def("Sカラー", Color, &["shadowColor"], Unbounded),
];
static SATIN: [PropertyDefinition; 7] = [
    BLEND,
    OPACITY,
    ANGLE,
    DISTANCE,
    SIZE,
    def("反転(0/1)", Boolean, &["Invert"], Unbounded),
    COLOR,
];
static COLOR_OVERLAY: [PropertyDefinition; 3] = [BLEND, OPACITY, COLOR];
static GRADIENT_OVERLAY: [PropertyDefinition; 4] = [
    BLEND,
    OPACITY,
    ANGLE,
    def("スケール", Number, &["Scale"], Unbounded),
];
static STROKE: [PropertyDefinition; 5] = [
    BLEND,
    def("位置(外1/内2/中3)", Number, &["Position", "Style"], Unbounded),
    def("サイズ", Number, &["Size"], NonNegative),
    OPACITY,
    COLOR,
];

/// Editable properties of a style, in panel order.
///
/// The position in this slice is the property index used by every dispatcher operation. The
/// master style and unknown ids have no editable properties.
pub fn definitions(style_id: &str) -> &'static [PropertyDefinition] {
    match style_id {
        "dropShadow" => &DROP_SHADOW,
        "innerShadow" => &INNER_SHADOW,
        "outerGlow" => &OUTER_GLOW,
        "innerGlow" => &INNER_GLOW,
        "bevelEmboss" => &BEVEL_EMBOSS,
        "chromeFX" => &SATIN,
        "solidFill" => &COLOR_OVERLAY,
        "gradientFill" => &GRADIENT_OVERLAY,
        "frameFX" => &STROKE,
        _ => &[],
    }
}

/// Definition at `index` for `style_id`, if any.
pub fn definition(style_id: &str, index: usize) -> Option<&'static PropertyDefinition> {
    definitions(style_id).get(index)
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/props.rs"]
mod tests;
