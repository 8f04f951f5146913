use crate::catalog::props::ValueKind;
use crate::foundation::core::Rgb;
use crate::snapshot::hash::LayerHash;

/// Everything the control surface needs to render one frame of the panel.
///
/// Rebuilt from the host on every poll tick; it has no identity across ticks.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    /// Whether a layer is selected in an active composition.
    pub has_layer: bool,
    /// Selected layer's name.
    pub layer_name: String,
    /// Style the panel shows; may differ from the requested id after auto-correction.
    pub current_style_id: String,
    /// One entry per catalog style, in catalog order.
    pub style_nav: Vec<StyleNavState>,
    /// Fill opacity of the style stack's blend options, if present.
    pub fill_opacity: Option<FillOpacityState>,
    /// Resolved properties of the current style, in definition order.
    pub props: Vec<PropState>,
    /// Quick-access color slots of the recognized color-selection effect.
    pub p_colors: Vec<PColorState>,
    /// Playhead time every keyframe flag was computed at.
    pub comp_time: f64,
    /// Solo switch of the selected layer.
    pub is_solo_active: bool,
    /// Cheap change signature of the selection and its stacks.
    pub layer_hash: LayerHash,
}

impl PanelSnapshot {
    /// Snapshot for "nothing selected": every derived field empty or zeroed.
    pub fn empty(requested_style_id: &str) -> Self {
        Self {
            has_layer: false,
            layer_name: String::new(),
            current_style_id: requested_style_id.to_string(),
            style_nav: Vec::new(),
            fill_opacity: None,
            props: Vec::new(),
            p_colors: Vec::new(),
            comp_time: 0.0,
            is_solo_active: false,
            layer_hash: LayerHash::NONE,
        }
    }

    /// Resolved property for definition `index`, if it is present.
    pub fn prop(&self, index: usize) -> Option<&PropState> {
        self.props.iter().find(|p| p.index == index)
    }
}

/// Time-varying metadata of a property at the snapshot's `comp_time`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyframeState {
    /// Whether the property accepts keyframes at all.
    pub can_vary_over_time: bool,
    /// Number of keyframes.
    pub num_keys: usize,
    /// A key sits at the playhead (within tolerance).
    pub on_keyframe: bool,
    /// A key exists before the playhead.
    pub has_prev: bool,
    /// A key exists after the playhead.
    pub has_next: bool,
}

/// Presence of one catalog style on the selected layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleNavState {
    /// Catalog id.
    pub id: &'static str,
    /// The style's group exists in the stack.
    pub is_existing: bool,
    /// The style is switched on (for the master entry: the stack exists).
    pub is_enabled: bool,
}

/// Fill opacity value and its keyframe metadata.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOpacityState {
    /// Value rounded to one decimal.
    pub value: f64,
    /// Keyframe metadata.
    #[serde(flatten)]
    pub keys: KeyframeState,
}

/// Property value as shown by the panel, coerced by its [`ValueKind`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Rounded to one decimal.
    Number(f64),
    /// First three components.
    Color(Rgb),
    /// Host code, passed through.
    BlendMode(i32),
    /// Coerced flag.
    Bool(bool),
}

/// One resolved property of the current style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropState {
    /// Position in the style's definition list; the index every dispatcher call takes.
    pub index: usize,
    /// Display label.
    pub label: &'static str,
    /// Value kind.
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Coerced value.
    pub value: PropValue,
    /// Keyframe metadata.
    #[serde(flatten)]
    pub keys: KeyframeState,
}

/// One quick-access color slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PColorState {
    /// Slot color.
    pub color: Rgb,
    /// The slot's enable flag reads 0/false.
    pub is_disabled: bool,
    /// Name of the effect holding the slot.
    pub effect_name: String,
    /// Position of the color property among the effect's children.
    pub prop_index: usize,
    /// Position of the enable flag, when the preceding sibling is one.
    pub enable_index: Option<usize>,
}
