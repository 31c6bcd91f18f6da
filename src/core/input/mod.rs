//=========================================================================
// Input System
//=========================================================================
//
// Keyboard input → movement intent.
//
// Architecture:
//   InputEvent → InputListener → channel → InputTracker → Direction
//
// Components:
// - `event`: Portable key codes and key events
// - `direction`: Movement directions and key bindings
// - `tracker`: Ordered held-key set and its event listener
//
//=========================================================================

//=== Module Declarations =================================================

pub mod direction;
pub mod event;
pub mod tracker;

//=== Public API ==========================================================

pub use direction::{Direction, KeyBindings};
pub use event::{InputEvent, KeyCode};
pub use tracker::{InputListener, InputTracker, ListenerState};
