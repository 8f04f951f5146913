use crate::catalog::props::definition;
use crate::dispatch::dispatcher::{Action, Dispatcher};
use crate::dispatch::keyframe::KeyframeAction;
use crate::dispatch::scrub::{ScrubGesture, nudge};
use crate::foundation::error::StyleResult;
use crate::host::{Host, HostValue};
use crate::poll::schedule::PollOpts;
use crate::poll::worker::{PollHandle, PollUpdate, lock_host, spawn_poll};
use crate::snapshot::builder::build_snapshot;
use crate::snapshot::model::PanelSnapshot;
use std::sync::{Arc, Mutex};

/// The panel's boundary: one snapshot read plus one entry point per mutation.
///
/// Mutations return nothing. Callers observe their effect on the next snapshot; with polling
/// running, every completed mutation forces an immediate tick. Drag gestures are the exception:
/// [`Panel::scrub`] writes without refreshing and [`Panel::settle`] refreshes once at the end.
pub struct Panel<H: Host + ?Sized> {
    host: Arc<Mutex<H>>,
    poll: Option<PollHandle>,
}

impl<H: Host> Panel<H> {
    /// Panel that owns `host`.
    pub fn new(host: H) -> Self {
        Self::from_shared(Arc::new(Mutex::new(host)))
    }
}

impl<H: Host + ?Sized> Panel<H> {
    /// Panel over a host shared with other code.
    pub fn from_shared(host: Arc<Mutex<H>>) -> Self {
        Self { host, poll: None }
    }

    /// The shared host.
    pub fn host(&self) -> &Arc<Mutex<H>> {
        &self.host
    }

    /// Snapshot for `requested_style_id`; its `current_style_id` may be auto-corrected.
    pub fn get_snapshot(&self, requested_style_id: &str) -> PanelSnapshot {
        build_snapshot(&*lock_host(&self.host), requested_style_id)
    }

    /// Start polling in the background, replacing any running loop.
    pub fn start_polling<F>(
        &mut self,
        opts: PollOpts,
        style_id: &str,
        on_tick: F,
    ) -> StyleResult<()>
    where
        H: Send + 'static,
        F: FnMut(PollUpdate) + Send + 'static,
    {
        self.stop_polling();
        self.poll = Some(spawn_poll(
            Arc::clone(&self.host),
            opts,
            style_id,
            on_tick,
        )?);
        Ok(())
    }

    /// Stop the background loop, if any.
    pub fn stop_polling(&mut self) {
        if let Some(handle) = self.poll.take() {
            handle.stop();
        }
    }

    /// Whether a background loop is running.
    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    /// Switch the style the background loop reports on.
    pub fn set_style(&self, style_id: &str) {
        if let Some(poll) = &self.poll {
            poll.set_style(style_id);
        }
    }

    /// Refresh the background loop now, if one is running.
    pub fn settle(&self) {
        if let Some(poll) = &self.poll {
            poll.force_refresh();
        }
    }

    fn dispatch(&self, f: impl FnOnce(&mut Dispatcher<'_, H>)) {
        self.dispatch_quiet(f);
        self.settle();
    }

    fn dispatch_quiet(&self, f: impl FnOnce(&mut Dispatcher<'_, H>)) {
        let mut host = lock_host(&self.host);
        f(&mut Dispatcher::new(&mut *host));
    }

    /// Run a serialized action.
    pub fn apply(&self, action: &Action) {
        self.dispatch(|d| d.apply(action));
    }

    /// Write definition `index` of `style_id`.
    pub fn set_property_value(&self, style_id: &str, index: usize, value: HostValue) {
        self.dispatch(|d| d.set_property_value(style_id, index, value));
    }

    /// Keyframe operation on definition `index` of `style_id`.
    pub fn operate_keyframe(&self, style_id: &str, index: usize, action: KeyframeAction) {
        self.dispatch(|d| d.operate_keyframe(style_id, index, action));
    }

    /// Write the style stack's fill opacity.
    pub fn set_fill_opacity(&self, value: f64) {
        self.dispatch(|d| d.set_fill_opacity(value));
    }

    /// Keyframe operation on the style stack's fill opacity.
    pub fn operate_fill_opacity_keyframe(&self, action: KeyframeAction) {
        self.dispatch(|d| d.operate_fill_opacity_keyframe(action));
    }

    /// Insert `style_id` on the active layer.
    pub fn add_style(&self, style_id: &str) {
        self.dispatch(|d| d.add_style(style_id));
    }

    /// Delete an enabled style from the active layer.
    pub fn remove_style(&self, style_id: &str) {
        self.dispatch(|d| d.remove_style(style_id));
    }

    /// Rename the active layer.
    pub fn rename_layer(&self, name: &str) {
        self.dispatch(|d| d.rename_layer(name));
    }

    /// Replace the active layer's name with a preset.
    pub fn apply_base_name(&self, base_name: &str) {
        self.dispatch(|d| d.apply_base_name(base_name));
    }

    /// Append a suffix to the active layer's name.
    pub fn apply_name_suffix(&self, suffix: &str) {
        self.dispatch(|d| d.apply_name_suffix(suffix));
    }

    /// Flip the active layer's solo switch.
    pub fn toggle_solo(&self) {
        self.dispatch(|d| d.toggle_solo());
    }

    /// Flip every non-exempt effect on the active layer.
    pub fn toggle_fx_enabled(&self) {
        self.dispatch(|d| d.toggle_fx_enabled());
    }

    /// Move the playhead by whole frames.
    pub fn navigate_frame(&self, delta: i32) {
        self.dispatch(|d| d.navigate_frame(delta));
    }

    /// Show the active layer's animated properties.
    pub fn reveal_keyframes(&self) {
        self.dispatch(|d| d.reveal_keyframes());
    }

    /// Show a style, or the whole stack, in the timeline.
    pub fn expand_style_property(&self, style_id: &str) {
        self.dispatch(|d| d.expand_style_property(style_id));
    }

    /// Open the host's value editor on definition `index` of `style_id`.
    pub fn open_native_color_picker(&self, style_id: &str, index: usize) {
        self.dispatch(|d| d.open_native_color_picker(style_id, index));
    }

    /// Flip a color slot's enable flag.
    pub fn toggle_pcolor(&self, effect_name: &str, enable_index: usize) {
        self.dispatch(|d| d.toggle_pcolor(effect_name, enable_index));
    }

    /// Enable a color slot if needed, then open the host's value editor on it.
    pub fn open_pcolor_picker(
        &self,
        effect_name: &str,
        color_index: usize,
        enable_index: Option<usize>,
    ) {
        self.dispatch(|d| d.open_pcolor_picker(effect_name, color_index, enable_index));
    }

    /// Start a drag on definition `index` of `style_id`, from its current value.
    ///
    /// `None` when the style is not the current one, the property is unresolved, or its kind does
    /// not scrub.
    pub fn begin_scrub(&self, style_id: &str, index: usize) -> Option<ScrubGesture> {
        let snapshot = self.get_snapshot(style_id);
        if snapshot.current_style_id != style_id {
            return None;
        }
        let prop = snapshot.prop(index)?;
        ScrubGesture::begin(definition(style_id, index)?, &prop.value)
    }

    /// Write the value for a pointer `dx` pixels from the drag start. Does not refresh.
    pub fn scrub(&self, style_id: &str, index: usize, gesture: &ScrubGesture, dx: f64) {
        let value = gesture.value_at(dx);
        self.dispatch_quiet(|d| d.set_property_value(style_id, index, value));
    }

    /// Step definition `index` of `style_id` one stepper click up or down.
    pub fn nudge(&self, style_id: &str, index: usize, up: bool) {
        let snapshot = self.get_snapshot(style_id);
        if snapshot.current_style_id != style_id {
            return;
        }
        let Some(def) = definition(style_id, index) else {
            return;
        };
        let Some(value) = snapshot.prop(index).and_then(|p| nudge(def, &p.value, up)) else {
            return;
        };
        self.set_property_value(style_id, index, value);
    }
}

impl<H: Host + ?Sized> Drop for Panel<H> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/panel.rs"]
mod tests;
