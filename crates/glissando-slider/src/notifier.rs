use glissando_core::Reaction;

use crate::callbacks::CallbackEmitter;

/// Turns value changes during a drag into `on_change` events.
///
/// Every sample updates the remembered value, including samples taken while
/// idle, so a change is only reported when the value actually moved during
/// an active gesture. The snap at release happens after the session ends and
/// is reported through `on_confirm` alone.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    reaction: Reaction<f64>,
}

impl ChangeNotifier {
    pub fn new(initial: f64) -> Self {
        Self {
            reaction: Reaction::new(initial),
        }
    }

    pub fn last_observed(&self) -> Option<f64> {
        self.reaction.last().copied()
    }

    /// Returns true when an event was emitted.
    pub(crate) fn observe(
        &mut self,
        value: f64,
        gesture_active: bool,
        emitter: &CallbackEmitter,
    ) -> bool {
        if self.reaction.observe(value).is_none() || !gesture_active {
            return false;
        }
        log::trace!("value changed to {value}");
        emitter.change(value);
        true
    }
}
