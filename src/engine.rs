//=========================================================================
// Tile Walker Engine
//
// Main entry point: wires configuration, game loop and platform.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Event Loop]
//         │                          │
//         ├─ with_config()           ├─ GameLoop::from_config()
//         ├─ with_config_file()      ├─ Platform::new()
//         ├─ with_collision_policy() └─ blocks until window closes
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::info;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::config::{ConfigError, GameConfig};
use crate::core::game_loop::{CollisionPolicy, GameLoop};
use crate::platform::{Platform, PlatformError};

//=== EngineError =========================================================

/// Anything that stops the engine from starting or running.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default()`]
/// - **Collision policy**: from config (`Sticky` by default)
/// - **Channel capacity**: from config (128 events)
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use tile_walker::EngineBuilder;
///
/// EngineBuilder::new().build()?.run()?;
/// # Ok::<(), tile_walker::EngineError>(())
/// ```
///
/// Advanced configuration:
/// ```no_run
/// use tile_walker::EngineBuilder;
/// use tile_walker::core::game_loop::CollisionPolicy;
///
/// EngineBuilder::new()
///     .with_config_file("assets/game.ron")?
///     .with_collision_policy(CollisionPolicy::Rewind)
///     .with_channel_capacity(256)
///     .build()?
///     .run()?;
/// # Ok::<(), tile_walker::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: GameConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a RON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// validated.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        self.config = GameConfig::load(path)?;
        Ok(self)
    }

    /// Overrides how the game reacts to the player hitting an obstacle.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    /// Sets the channel capacity for platform → game key events.
    ///
    /// Events beyond the capacity are dropped with a warning until the
    /// next frame drains the queue.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.input_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;
        info!(
            "Building engine (canvas: {}x{}, policy: {:?}, channel: {})",
            self.config.canvas.width,
            self.config.canvas.height,
            self.config.collision_policy,
            self.config.input_capacity
        );

        Ok(Engine { config: self.config })
    }
}

//=== Engine ==============================================================

/// Tile walker runtime.
///
/// Create via [`EngineBuilder`] or [`Engine::builder`].
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Event Loop)
///         ├─► Window + pixels surface
///         └─► GameLoop (one step per redraw)
///               └─► AssetLoader (background decode threads)
/// ```
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Builds the tile-map boundaries and the player from config
    /// 2. Starts background image loads
    /// 3. Runs the platform event loop (blocks here)
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the collision map cannot be loaded or the
    /// window/surface cannot be created.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime");

        let (game, listener) = GameLoop::from_config(&self.config)?;
        let platform = Platform::new(self.config.title.clone(), self.config.canvas, game, listener);
        info!("Platform initialized, entering event loop");

        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Size;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.config.input_capacity, 128);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.config.input_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_with_collision_policy() {
        let engine = EngineBuilder::new()
            .with_collision_policy(CollisionPolicy::Rewind)
            .build()
            .unwrap();
        assert_eq!(engine.config().collision_policy, CollisionPolicy::Rewind);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = GameConfig {
            canvas: Size::new(0, 576),
            ..GameConfig::default()
        };
        let result = EngineBuilder::new().with_config(config).build();
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn builder_with_missing_config_file() {
        let result = EngineBuilder::new().with_config_file("/no/such/game.ron");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn builder_chaining() {
        let engine = Engine::builder()
            .with_channel_capacity(64)
            .with_collision_policy(CollisionPolicy::Sticky)
            .build()
            .unwrap();
        assert_eq!(engine.config().input_capacity, 64);
    }
}
