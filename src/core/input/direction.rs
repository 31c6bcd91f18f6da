//=========================================================================
// Direction & Key Bindings
//=========================================================================
//
// Movement directions and the key → direction lookup.
//
// Architecture:
//   KeyCode → HashMap → Direction
//
// Keys without a binding are not movement keys and are ignored by the
// input tracker.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== Direction ===========================================================

/// Apparent movement direction of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the displacement applied to the *world* when the player
    /// moves this way at `speed`.
    ///
    /// The player stays fixed on screen, so the world shifts the opposite
    /// way: walking up scrolls the world down (+y), walking right scrolls
    /// it left (-x).
    #[inline]
    pub const fn world_delta(self, speed: i32) -> (i32, i32) {
        match self {
            Self::Up => (0, speed),
            Self::Down => (0, -speed),
            Self::Left => (speed, 0),
            Self::Right => (-speed, 0),
        }
    }
}

//=== KeyBindings =========================================================

/// Maps physical keys to movement directions.
///
/// Several keys may share a direction (W and ArrowUp both walk up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Direction>,
}

impl KeyBindings {
    /// Creates an empty binding table (no movement keys).
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` to `direction`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, direction: Direction) {
        self.bindings.insert(key, direction);
    }

    /// Builder-style [`bind`](Self::bind).
    pub fn with(mut self, key: KeyCode, direction: Direction) -> Self {
        self.bind(key, direction);
        self
    }

    //--- Query API --------------------------------------------------------

    /// Returns the direction bound to `key`, if it is a movement key.
    #[inline]
    pub fn direction_of(&self, key: KeyCode) -> Option<Direction> {
        self.bindings.get(&key).copied()
    }

    #[inline]
    pub fn is_movement_key(&self, key: KeyCode) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    /// W/A/S/D plus the arrow keys.
    fn default() -> Self {
        Self::empty()
            .with(KeyCode::KeyW, Direction::Up)
            .with(KeyCode::KeyA, Direction::Left)
            .with(KeyCode::KeyS, Direction::Down)
            .with(KeyCode::KeyD, Direction::Right)
            .with(KeyCode::ArrowUp, Direction::Up)
            .with(KeyCode::ArrowLeft, Direction::Left)
            .with(KeyCode::ArrowDown, Direction::Down)
            .with(KeyCode::ArrowRight, Direction::Right)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_moves_opposite_to_player() {
        assert_eq!(Direction::Up.world_delta(3), (0, 3));
        assert_eq!(Direction::Down.world_delta(3), (0, -3));
        assert_eq!(Direction::Left.world_delta(3), (3, 0));
        assert_eq!(Direction::Right.world_delta(3), (-3, 0));
    }

    #[test]
    fn default_bindings_cover_wasd_and_arrows() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.len(), 8);
        assert_eq!(bindings.direction_of(KeyCode::KeyW), Some(Direction::Up));
        assert_eq!(bindings.direction_of(KeyCode::KeyA), Some(Direction::Left));
        assert_eq!(bindings.direction_of(KeyCode::KeyS), Some(Direction::Down));
        assert_eq!(bindings.direction_of(KeyCode::KeyD), Some(Direction::Right));
        assert_eq!(bindings.direction_of(KeyCode::ArrowRight), Some(Direction::Right));
        assert!(!bindings.is_movement_key(KeyCode::Space));
    }

    #[test]
    fn rebinding_replaces_direction() {
        let mut bindings = KeyBindings::empty();
        bindings.bind(KeyCode::KeyZ, Direction::Up);
        bindings.bind(KeyCode::KeyZ, Direction::Down);
        assert_eq!(bindings.direction_of(KeyCode::KeyZ), Some(Direction::Down));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn bindings_deserialize_as_map() {
        let bindings: KeyBindings = ron::from_str("{KeyI: Up, KeyK: Down}").unwrap();
        assert_eq!(bindings.direction_of(KeyCode::KeyI), Some(Direction::Up));
        assert_eq!(bindings.direction_of(KeyCode::KeyK), Some(Direction::Down));
        assert!(!bindings.is_movement_key(KeyCode::KeyW));
    }
}
