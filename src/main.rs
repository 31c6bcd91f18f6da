//=========================================================================
// Tile Walker — Binary
//
// Loads `assets/game.ron` when present (built-in defaults otherwise) and
// runs the engine. `RUST_LOG` controls verbosity.
//
//=========================================================================

use std::path::Path;

use log::info;
use tile_walker::{EngineBuilder, EngineError};

const CONFIG_PATH: &str = "assets/game.ron";

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let builder = if Path::new(CONFIG_PATH).exists() {
        EngineBuilder::new().with_config_file(CONFIG_PATH)?
    } else {
        info!("No {} found, using built-in defaults", CONFIG_PATH);
        EngineBuilder::new()
    };

    builder.build()?.run()
}
