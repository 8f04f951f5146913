use crate::foundation::error::{StyleError, StyleResult};
use crate::snapshot::hash::LayerHash;
use std::time::{Duration, Instant};

/// Poll timing. Serialized with millisecond fields (`active_ms`, `idle_ms`, `idle_threshold_ms`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PollOpts {
    /// Delay between ticks while the layer is changing.
    #[serde(rename = "active_ms", with = "millis")]
    pub active_interval: Duration,
    /// Delay between ticks once the layer has been quiet for `idle_threshold`.
    #[serde(rename = "idle_ms", with = "millis")]
    pub idle_interval: Duration,
    /// Quiet time after the last change before switching to `idle_interval`.
    #[serde(rename = "idle_threshold_ms", with = "millis")]
    pub idle_threshold: Duration,
}

impl Default for PollOpts {
    fn default() -> Self {
        Self {
            active_interval: Duration::from_millis(200),
            idle_interval: Duration::from_millis(1000),
            idle_threshold: Duration::from_millis(3000),
        }
    }
}

impl PollOpts {
    /// Reject intervals the loop cannot run with.
    pub fn validate(&self) -> StyleResult<()> {
        if self.active_interval.is_zero() || self.idle_interval.is_zero() {
            return Err(StyleError::validation("poll intervals must be non-zero"));
        }
        if self.active_interval > self.idle_interval {
            return Err(StyleError::validation(format!(
                "active poll interval ({} ms) must not exceed the idle interval ({} ms)",
                self.active_interval.as_millis(),
                self.idle_interval.as_millis()
            )));
        }
        Ok(())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Adaptive schedule state: the last seen signature and when it last changed.
///
/// Pure; every call takes the current instant so tests can drive it with synthetic time.
#[derive(Clone, Debug)]
pub struct PollSchedule {
    opts: PollOpts,
    last_hash: Option<LayerHash>,
    last_changed: Instant,
}

impl PollSchedule {
    /// Fresh schedule. Starts in the active phase.
    pub fn new(opts: PollOpts, now: Instant) -> Self {
        Self {
            opts,
            last_hash: None,
            last_changed: now,
        }
    }

    /// Record a tick's signature. Returns whether it differs from the previous tick's.
    ///
    /// The first observation counts as a change.
    pub fn observe(&mut self, hash: LayerHash, now: Instant) -> bool {
        let changed = self.last_hash != Some(hash);
        if changed {
            self.last_hash = Some(hash);
            self.last_changed = now;
        }
        changed
    }

    /// Treat `now` as a change without touching the stored signature.
    pub fn force_refresh(&mut self, now: Instant) {
        self.last_changed = now;
    }

    /// Delay before the next tick.
    pub fn next_delay(&self, now: Instant) -> Duration {
        if self.is_idle(now) {
            self.opts.idle_interval
        } else {
            self.opts.active_interval
        }
    }

    /// Whether the layer has been quiet for at least the idle threshold.
    pub fn is_idle(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_changed) >= self.opts.idle_threshold
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poll/schedule.rs"]
mod tests;
