//=========================================================================
// Input Event Types
//
// Engine-side representation of keyboard input.
//
// This module abstracts platform-specific keyboard events (Winit) into a
// small, portable format consumed by the input tracker.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputListener ──channel──> InputTracker
//         ↓
//    Direction (movement intent)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyW` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Keyboard event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down (OS auto-repeat produces repeated `KeyDown`s).
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),
}

impl InputEvent {
    /// Returns the key carried by the event.
    pub fn key(&self) -> KeyCode {
        match *self {
            Self::KeyDown(key) | Self::KeyUp(key) => key,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
