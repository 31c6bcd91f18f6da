//=========================================================================
// Core Systems
//
// Platform-independent game logic for the tile walker.
//
// Responsibilities:
// - Geometry, collision tests and tile-map boundary extraction
// - Keyboard tracking fed through a bounded channel
// - Reversible world scrolling and the per-frame collision state machine
// - Drawables and the software render target
// - Configuration and background image loading
//
// Notes:
// Nothing here touches the window or the GPU surface. The platform layer
// hands a `RenderTarget` and a frame delta to `GameLoop::frame` and feeds
// key events through an `InputListener`; everything else lives here.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod collision;
pub mod config;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod render;
pub mod tilemap;
pub mod world;

//=== Public API ==========================================================

pub use assets::{AssetError, AssetKey, AssetLoader, ImageData};
pub use collision::{first_overlap, intersects};
pub use config::{ConfigError, GameConfig};
pub use game_loop::{CollisionPolicy, GameLoop, LoopState, StepReport};
pub use geometry::{Point, Rect, Size};
pub use movement::{MoveCommand, MovementController};
pub use render::{Renderable, RenderTarget};
pub use tilemap::TileMap;
pub use world::{Player, WorldState};
