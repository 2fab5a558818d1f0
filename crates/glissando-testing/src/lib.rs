//! Testing utilities and harness for Glissando

pub mod recorder;
pub mod rule;

pub use recorder::{CallbackRecorder, RecordingHaptics, SliderEvent};
pub use rule::{SliderTestRule, FRAME_NANOS};

pub mod prelude {
    pub use crate::recorder::*;
    pub use crate::rule::*;
}
