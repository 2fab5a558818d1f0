//! Draggable, steppable slider controller.
//!
//! A [`Slider`] turns a horizontal drag into a quantized value inside a
//! [`Domain`], keeps the thumb position in sync with an externally controlled
//! value while idle, and reports `start`, `change` and `confirm` events to
//! the business-logic side without feedback loops.
//!
//! Rendering is left to the host: [`Slider::visuals`] describes where the
//! thumb and tracks go for the current frame.

mod callbacks;
mod color;
mod config;
mod gesture;
mod haptics;
mod notifier;
mod slider;
mod sync;
mod value_mapper;
mod visuals;

pub use callbacks::{SliderCallbacks, StartCallback, ValueCallback};
pub use color::Color;
pub use config::{ConfigurationError, Domain, SliderConfig};
pub use gesture::{DragEvent, DragPhase, GestureSession, GestureStateMachine};
pub use haptics::{HapticFeedback, HapticKind, HapticOptions};
pub use notifier::ChangeNotifier;
pub use slider::{Slider, SliderBuilder};
pub use sync::{ControlledValue, ControlledValueSync};
pub use value_mapper::{position_to_value, quantize, value_to_position};
pub use visuals::SliderVisuals;

pub use glissando_animation::{Easing, SpringSpec, TimingSpec};
