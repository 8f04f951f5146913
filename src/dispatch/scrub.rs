use crate::catalog::props::{Constraint, PropertyDefinition, ValueKind};
use crate::host::HostValue;
use crate::snapshot::model::PropValue;

/// One horizontal drag over a numeric or boolean property.
///
/// Captures the value at drag start; every pointer move maps the total horizontal offset to a new
/// value for a "set property value" call. Callers send those without awaiting each one and refresh
/// once when the drag ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubGesture {
    start: f64,
    kind: ValueKind,
    constraint: Constraint,
}

impl ScrubGesture {
    /// Start a drag on `def` currently showing `current`.
    ///
    /// `None` for kinds that cannot be scrubbed (colors, blend modes) or a value of the wrong shape.
    pub fn begin(def: &PropertyDefinition, current: &PropValue) -> Option<Self> {
        if !def.kind.is_scrubbable() {
            return None;
        }
        let start = scalar(current)?;
        Some(Self {
            start,
            kind: def.kind,
            constraint: def.constraint,
        })
    }

    /// Value at drag start.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Value for a pointer `dx` pixels right of where the drag began.
    ///
    /// `start + dx * sensitivity`, constrained, then rounded to an integer.
    pub fn value_at(&self, dx: f64) -> HostValue {
        let v = self
            .constraint
            .apply(self.start + dx * self.constraint.sensitivity())
            .round();
        typed(self.kind, v)
    }
}

/// Value one stepper click away from `current`: 5 degrees for angles, else 1.
///
/// Steps are not constrained; the host clamps what it must.
pub fn nudge(def: &PropertyDefinition, current: &PropValue, up: bool) -> Option<HostValue> {
    if !def.kind.is_scrubbable() {
        return None;
    }
    let step = if def.kind == ValueKind::Number && def.constraint == Constraint::Angle {
        5.0
    } else {
        1.0
    };
    let v = scalar(current)? + if up { step } else { -step };
    Some(typed(def.kind, v))
}

fn scalar(v: &PropValue) -> Option<f64> {
    match *v {
        PropValue::Number(n) => Some(n),
        PropValue::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        PropValue::Color(_) | PropValue::BlendMode(_) => None,
    }
}

fn typed(kind: ValueKind, v: f64) -> HostValue {
    match kind {
        ValueKind::Boolean => HostValue::Bool(v != 0.0),
        _ => HostValue::Number(v),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/scrub.rs"]
mod tests;
