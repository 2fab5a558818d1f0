use std::fmt;
use std::sync::Arc;

use glissando_core::LogicDispatcher;

/// Feedback pattern requested from the haptic engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    ImpactLight,
}

impl HapticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HapticKind::ImpactLight => "impactLight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticOptions {
    pub enable_vibrate_fallback: bool,
    pub ignore_android_system_settings: bool,
}

impl Default for HapticOptions {
    fn default() -> Self {
        Self {
            enable_vibrate_fallback: true,
            ignore_android_system_settings: true,
        }
    }
}

/// Platform haptic engine.
///
/// Invoked on the business-logic side at the end of a drag when the slider
/// has `haptic_feedback` enabled.
pub trait HapticFeedback: Send + Sync {
    fn trigger(&self, kind: HapticKind, options: HapticOptions);
}

/// Haptic capability resolved once when the slider is built.
#[derive(Clone)]
pub(crate) enum Haptics {
    Off,
    Available(Arc<dyn HapticFeedback>),
    /// Feedback was requested but no engine was provided.
    Missing,
}

impl Haptics {
    pub(crate) fn resolve(enabled: bool, engine: Option<Arc<dyn HapticFeedback>>) -> Self {
        match (enabled, engine) {
            (false, _) => Haptics::Off,
            (true, Some(engine)) => Haptics::Available(engine),
            (true, None) => {
                log::warn!("haptic feedback enabled but no haptic engine was provided");
                Haptics::Missing
            }
        }
    }

    /// Best-effort trigger; never fails the caller.
    pub(crate) fn fire(&self, dispatcher: &LogicDispatcher) {
        match self {
            Haptics::Off => {}
            Haptics::Available(engine) => {
                let engine = Arc::clone(engine);
                dispatcher.post(move || {
                    engine.trigger(HapticKind::ImpactLight, HapticOptions::default())
                });
            }
            Haptics::Missing => {
                log::warn!("a haptic engine is required when haptic feedback is enabled");
            }
        }
    }
}

impl fmt::Debug for Haptics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Haptics::Off => f.write_str("Off"),
            Haptics::Available(_) => f.write_str("Available"),
            Haptics::Missing => f.write_str("Missing"),
        }
    }
}
