use crate::foundation::core::{KEY_EPSILON, NAV_TOLERANCE};
use crate::foundation::error::{StyleError, StyleResult};
use crate::host::{Host, Interpolation, NodeId};

/// Keyframe operation requested from the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeAction {
    /// Key the current value at the playhead.
    Add,
    /// Delete the key at the playhead.
    Remove,
    /// Move the playhead to the previous key.
    Prev,
    /// Move the playhead to the next key.
    Next,
    /// Make every key step (hold) on both sides.
    HoldAll,
}

impl std::str::FromStr for KeyframeAction {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "hold_all" => Ok(Self::HoldAll),
            other => Err(StyleError::validation(format!(
                "unknown keyframe action '{other}'"
            ))),
        }
    }
}

/// Apply `action` to `prop` with the playhead at `t`.
///
/// Only `prev`/`next` touch the playhead; the rest edit the key table.
pub fn apply_keyframe_action<H: Host + ?Sized>(
    host: &mut H,
    prop: NodeId,
    action: KeyframeAction,
    t: f64,
) -> StyleResult<()> {
    match action {
        KeyframeAction::Add => {
            let current = host.value(prop)?;
            host.set_value_at_time(prop, t, current)
        }
        KeyframeAction::Remove => {
            if let Some(idx) = key_at(host, prop, t)? {
                host.remove_key(prop, idx)?;
            }
            Ok(())
        }
        KeyframeAction::Prev => {
            if let Some(kt) = prev_key_time(host, prop, t)? {
                host.set_comp_time(kt)?;
            }
            Ok(())
        }
        KeyframeAction::Next => {
            if let Some(kt) = next_key_time(host, prop, t)? {
                host.set_comp_time(kt)?;
            }
            Ok(())
        }
        KeyframeAction::HoldAll => {
            for idx in 0..host.num_keys(prop)? {
                host.set_key_interpolation(prop, idx, Interpolation::Hold, Interpolation::Hold)?;
            }
            Ok(())
        }
    }
}

/// Index of the key within [`KEY_EPSILON`] of `t`, if any.
pub fn key_at<H: Host + ?Sized>(host: &H, prop: NodeId, t: f64) -> StyleResult<Option<usize>> {
    if host.num_keys(prop)? == 0 {
        return Ok(None);
    }
    let idx = host.nearest_key_index(prop, t)?;
    Ok(((host.key_time(prop, idx)? - t).abs() < KEY_EPSILON).then_some(idx))
}

/// Time of the key one step before `t`.
///
/// Starts from the nearest key and steps back once more when that key is not strictly earlier
/// than `t - NAV_TOLERANCE`.
pub fn prev_key_time<H: Host + ?Sized>(host: &H, prop: NodeId, t: f64) -> StyleResult<Option<f64>> {
    if host.num_keys(prop)? == 0 {
        return Ok(None);
    }
    let idx = host.nearest_key_index(prop, t)?;
    let target = if host.key_time(prop, idx)? >= t - NAV_TOLERANCE {
        idx.checked_sub(1)
    } else {
        Some(idx)
    };
    target.map(|i| host.key_time(prop, i)).transpose()
}

/// Time of the key one step after `t`; mirror of [`prev_key_time`].
pub fn next_key_time<H: Host + ?Sized>(host: &H, prop: NodeId, t: f64) -> StyleResult<Option<f64>> {
    let n = host.num_keys(prop)?;
    if n == 0 {
        return Ok(None);
    }
    let idx = host.nearest_key_index(prop, t)?;
    let target = if host.key_time(prop, idx)? <= t + NAV_TOLERANCE {
        idx + 1
    } else {
        idx
    };
    (target < n).then(|| host.key_time(prop, target)).transpose()
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/keyframe.rs"]
mod tests;
