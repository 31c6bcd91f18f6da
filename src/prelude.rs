//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tile_walker::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Configuration
pub use crate::core::config::{ConfigError, GameConfig};

// Game loop
pub use crate::core::game_loop::{CollisionPolicy, GameLoop, LoopState, StepReport};

// Input
pub use crate::core::input::{Direction, InputEvent, InputListener, InputTracker, KeyBindings, KeyCode};

// Geometry & rendering
pub use crate::core::geometry::{Point, Rect, Size};
pub use crate::core::render::{RenderTarget, Renderable};
