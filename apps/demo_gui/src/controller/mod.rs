//! Controller layer: screen events and the display-mode state machine.

pub mod events;
pub mod reducer;
