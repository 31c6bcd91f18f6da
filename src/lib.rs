//=========================================================================
// Tile Walker — Library Root
//
// A top-down tile-map walker: the player stays centred on screen while
// the map scrolls under them and tile-derived boundaries block movement.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Keep the window/event-loop integration (`platform`) private
// - Publish the platform-independent game logic under `core`
//
// Typical usage:
// ```no_run
// use tile_walker::Engine;
//
// fn main() -> Result<(), tile_walker::EngineError> {
//     Engine::builder().build()?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the game logic (input, movement, collision, rendering).
// It is public so hosts and tests can drive a `GameLoop` directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window, the pixel surface and the winit event loop.
// `engine` wires configuration, game loop and platform together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::PlatformError;
