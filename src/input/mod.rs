//! Input handling: platform-agnostic event types and the per-frame
//! sample tracker the engine consumes.

/// Platform-agnostic input events.
pub mod event;
/// Held-key set, cursor baseline, and per-frame delta accumulation.
pub mod state;

pub use event::{InputEvent, Key};
pub use state::InputState;
