//! Display-mode state machine for the demo screen.

use crate::controller::events::ScreenEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Placeholder,
    ShortText,
    WideText,
    /// Entered when the back button fires: visually the label is empty, but
    /// the machine behaves exactly like a cleared placeholder.
    Cleared,
}

/// Pure transition function. Segment indices other than 0 and 1 are a
/// deliberate no-op, and orientation changes never touch the display mode.
pub fn apply(mode: DisplayMode, event: ScreenEvent) -> DisplayMode {
    match event {
        ScreenEvent::SegmentSelected { index: 0 } => DisplayMode::ShortText,
        ScreenEvent::SegmentSelected { index: 1 } => DisplayMode::WideText,
        ScreenEvent::SegmentSelected { .. } => mode,
        ScreenEvent::BackActivated => DisplayMode::Cleared,
        ScreenEvent::OrientationChanged { .. } => mode,
    }
}
