//=========================================================================
// Game Configuration
//=========================================================================
//
// Tunables for the demo, loadable from RON.
//
// Defaults reproduce the original demo: a 1024x576 canvas, 48 px tiles,
// blocking code 1025, the map drawn at (-720, -610), and a player that
// walks 3 px per frame with a 4-frame sprite strip.
//
// Paths inside a config file are resolved relative to that file.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::game_loop::CollisionPolicy;
use super::geometry::{Point, Size};
use super::input::KeyBindings;
use super::tilemap::TileMap;

//=== ConfigError =========================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

//=== PlayerConfig ========================================================

/// Screen-fixed player settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Hitbox and on-screen frame size.
    pub size: Size,

    /// World scroll per frame, in pixels.
    pub speed: i32,

    /// Frames in the sprite strip.
    pub frames: u32,

    /// Time each animation frame is shown while walking.
    pub frame_millis: u64,
}

impl PlayerConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Size::new(48, 68),
            speed: 3,
            frames: 4,
            frame_millis: 150,
        }
    }
}

//=== AssetPaths ==========================================================

/// Image files; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub background: Option<PathBuf>,
    pub foreground: Option<PathBuf>,
    pub player: Option<PathBuf>,
}

//=== GameConfig ==========================================================

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub canvas: Size,
    pub tile_size: i32,
    pub blocking_code: i32,

    /// World position of tile (0, 0) and of the background/foreground layers.
    pub map_offset: Point,

    /// RON file holding a `TileMap`. No map means no obstacles.
    pub collision_map: Option<PathBuf>,

    pub player: PlayerConfig,
    pub collision_policy: CollisionPolicy,

    /// Draw obstacles and the player hitbox as coloured rectangles.
    pub show_boundaries: bool,

    pub assets: AssetPaths,
    pub bindings: KeyBindings,

    /// Capacity of the key event queue between platform and game.
    pub input_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Tile Walker".to_string(),
            canvas: Size::new(1024, 576),
            tile_size: 48,
            blocking_code: 1025,
            map_offset: Point::new(-720, -610),
            collision_map: None,
            player: PlayerConfig::default(),
            collision_policy: CollisionPolicy::default(),
            show_boundaries: true,
            assets: AssetPaths::default(),
            bindings: KeyBindings::default(),
            input_capacity: 128,
        }
    }
}

impl GameConfig {
    //--- Loading ----------------------------------------------------------

    /// Reads, parses and validates a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        config.validate()?;

        info!(target: "game", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses a RON string without touching the filesystem.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Makes relative paths relative to `dir`.
    pub fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p {
                if path.is_relative() {
                    *path = dir.join(&*path);
                }
            }
        };

        resolve(&mut self.collision_map);
        resolve(&mut self.assets.background);
        resolve(&mut self.assets.foreground);
        resolve(&mut self.assets.player);
    }

    /// Loads the collision map, or an empty map if none is configured.
    pub fn load_tile_map(&self) -> Result<TileMap, ConfigError> {
        let Some(path) = &self.collision_map else {
            debug!(target: "game", "No collision map configured");
            return Ok(TileMap::new(Vec::new(), 1));
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }

    //--- Validation -------------------------------------------------------

    /// Rejects values the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.canvas.is_positive() {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.tile_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "tile_size must be positive, got {}",
                self.tile_size
            )));
        }
        if !self.player.size.is_positive() {
            return Err(ConfigError::Invalid(format!(
                "player size must be positive, got {}x{}",
                self.player.size.width, self.player.size.height
            )));
        }
        if self.player.speed <= 0 {
            return Err(ConfigError::Invalid(format!(
                "player speed must be positive, got {}",
                self.player.speed
            )));
        }
        if self.player.frames == 0 {
            return Err(ConfigError::Invalid("player needs at least one frame".to_string()));
        }
        if self.input_capacity == 0 {
            return Err(ConfigError::Invalid("input_capacity must be positive".to_string()));
        }
        Ok(())
    }

    /// Top-left of the player hitbox: centred on the canvas.
    pub fn player_position(&self) -> Point {
        Point::new(
            self.canvas.width / 2 - self.player.size.width / 2,
            self.canvas.height / 2 - self.player.size.height / 2,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_original_demo() {
        let config = GameConfig::default();
        assert_eq!(config.canvas, Size::new(1024, 576));
        assert_eq!(config.tile_size, 48);
        assert_eq!(config.blocking_code, 1025);
        assert_eq!(config.map_offset, Point::new(-720, -610));
        assert_eq!(config.player.speed, 3);
        assert_eq!(config.player.frames, 4);
        assert_eq!(config.collision_policy, CollisionPolicy::Sticky);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn player_is_centred() {
        let config = GameConfig::default();
        assert_eq!(config.player_position(), Point::new(512 - 24, 288 - 34));
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = GameConfig::from_ron_str("(tile_size: 32, player: (speed: 5))").unwrap();
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.player.speed, 5);
        assert_eq!(config.player.frames, 4);
        assert_eq!(config.canvas, Size::new(1024, 576));
    }

    #[test]
    fn policy_parses_from_ron() {
        let config = GameConfig::from_ron_str("(collision_policy: Rewind)").unwrap();
        assert_eq!(config.collision_policy, CollisionPolicy::Rewind);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            GameConfig::from_ron_str("(tile_size: 0)"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_ron_str("(player: (speed: -1))"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GameConfig::from_ron_str("(input_capacity: 0)"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_ron_is_parse_error() {
        assert!(matches!(
            GameConfig::from_ron_str("(tile_size: "),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/no/such/config.ron"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn load_resolves_paths_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut map = std::fs::File::create(dir.path().join("map.ron")).unwrap();
        write!(map, "(stride: 2, codes: [1025, 0, 0, 1025])").unwrap();

        let config_path = dir.path().join("game.ron");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            "(collision_map: Some(\"map.ron\"), assets: (player: Some(\"player.png\")))"
        )
        .unwrap();

        let config = GameConfig::load(&config_path).unwrap();
        assert_eq!(config.collision_map, Some(dir.path().join("map.ron")));
        assert_eq!(config.assets.player, Some(dir.path().join("player.png")));

        let tiles = config.load_tile_map().unwrap();
        assert_eq!(tiles.columns(), 2);
        assert_eq!(tiles.rows(), 2);
    }

    #[test]
    fn no_collision_map_is_empty_map() {
        let tiles = GameConfig::default().load_tile_map().unwrap();
        assert_eq!(tiles.rows(), 0);
    }
}
