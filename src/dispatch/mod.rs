//! Panel intents turned into host mutations.

/// Operation entry points and the serializable [`dispatcher::Action`].
pub mod dispatcher;
/// Keyframe add/remove/step/hold.
pub mod keyframe;
/// Drag and stepper value mapping.
pub mod scrub;
