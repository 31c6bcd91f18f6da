//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard events into engine InputEvents.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → InputEvent → InputListener
//
// Only physical key codes are used, so bindings follow key position
// rather than layout. Keys outside the engine's `KeyCode` set are
// filtered (returns None). OS auto-repeat is passed through as repeated
// `KeyDown`s; the tracker treats them as no-ops.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit key events to engine InputEvents.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_physical_key(key_event.physical_key, key_event.state)
    }

    pub(crate) fn process_physical_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
    ) -> Option<InputEvent> {
        let key_code = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key_code),
            ElementState::Released => InputEvent::KeyUp(key_code),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, arrows, and a few special keys. Everything else returns
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn pressed_key_becomes_key_down() {
        let processor = InputProcessor::new();
        let event = processor.process_physical_key(PhysicalKey::Code(WinitKeyCode::KeyW), ElementState::Pressed);
        assert_eq!(event, Some(InputEvent::KeyDown(KeyCode::KeyW)));
    }

    #[test]
    fn released_key_becomes_key_up() {
        let processor = InputProcessor::new();
        let event = processor.process_physical_key(PhysicalKey::Code(WinitKeyCode::ArrowLeft), ElementState::Released);
        assert_eq!(event, Some(InputEvent::KeyUp(KeyCode::ArrowLeft)));
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_physical_key(PhysicalKey::Code(WinitKeyCode::F13), ElementState::Pressed),
            None
        );
        assert_eq!(
            processor.process_physical_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified), ElementState::Pressed),
            None
        );
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_arrows() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::ArrowUp);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowRight), KeyCode::ArrowRight);
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        assert!(matches!(KeyCode::from(WinitKeyCode::Digit1), KeyCode::Unidentified));
    }
}
