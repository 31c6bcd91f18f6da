//=========================================================================
// Game Loop
//=========================================================================
//
// Per-frame orchestration of input, world scroll and collision.
//
// Frame:
// ```text
//   install loaded images
//        ↓
//   render  background → obstacles → player → foreground
//        ↓
//   poll input → desired direction
//        ↓
//   ┌─ Idle ────────────────────────┐   ┌─ Blocked { sticky } ─────────┐
//   │ move world toward desired     │   │ still overlapping?           │
//   │ overlap? → Blocked { move }   │──>│   yes → apply sticky inverse │
//   └───────────────────────────────┘<──│   no  → Idle                 │
//                                       └──────────────────────────────┘
// ```
//
// While blocked, held keys are still tracked but do not move the world;
// the move that caused the contact alone decides the correction, so
// swapping keys mid-contact cannot produce a wrong push-back.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::assets::{AssetKey, AssetLoader};
use super::collision::first_overlap;
use super::config::{ConfigError, GameConfig};
use super::geometry::Rect;
use super::input::{Direction, InputListener, InputTracker};
use super::movement::{MoveCommand, MovementController};
use super::render::{Animation, Color, RenderTarget};
use super::world::{Player, WorldState};

//=== Constants ===========================================================

const BOUNDARY_COLOR: Color = [255, 0, 0, 255];
const HITBOX_COLOR: Color = [255, 255, 0, 255];

//=== CollisionPolicy =====================================================

/// How the loop reacts when a move overlaps an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Enter `Blocked`, pin the entry move, and push the world back by its
    /// inverse every frame until the overlap clears. Input is ignored
    /// while blocked.
    ///
    /// Holding into a wall alternates between a one-step overlap and flush
    /// contact, a visible jitter of `speed` pixels; `Rewind` has none.
    #[default]
    Sticky,

    /// Undo the whole move within the same frame; never enters `Blocked`.
    Rewind,
}

//=== LoopState ===========================================================

/// Collision state carried between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No overlap after the previous frame.
    Idle,

    /// Overlapping; `sticky` is the move that caused it.
    Blocked { sticky: MoveCommand },
}

//=== StepReport ==========================================================

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// State after the step.
    pub state: LoopState,

    /// Displacement left applied to the world by this step.
    pub moved: Option<MoveCommand>,

    /// Whether the player overlapped an obstacle during the step.
    pub collided: bool,
}

//=== GameLoop ============================================================

/// Owns the world and advances it one frame at a time.
pub struct GameLoop {
    world: WorldState,
    player: Player,
    tracker: InputTracker,
    movement: MovementController,
    assets: AssetLoader,
    state: LoopState,
    policy: CollisionPolicy,
    show_boundaries: bool,
}

impl GameLoop {
    //--- Construction -----------------------------------------------------

    pub fn new(world: WorldState, player: Player, tracker: InputTracker, policy: CollisionPolicy) -> Self {
        Self {
            world,
            player,
            tracker,
            movement: MovementController::new(),
            assets: AssetLoader::new(),
            state: LoopState::Idle,
            policy,
            show_boundaries: false,
        }
    }

    /// Builds the loop from configuration and starts loading images.
    ///
    /// Returns the listener the platform feeds key events into.
    pub fn from_config(config: &GameConfig) -> Result<(Self, InputListener), ConfigError> {
        config.validate()?;

        let tiles = config.load_tile_map()?;
        let obstacles = tiles.build_boundaries(config.tile_size, config.map_offset, config.blocking_code);
        let world = WorldState::new(config.map_offset, obstacles);

        let hitbox = Rect::from_parts(config.player_position(), config.player.size);
        let animation = Animation::new(config.player.frames, config.player.frame_duration());
        let player = Player::new(hitbox, config.player.speed, animation);

        let (tracker, listener) = InputTracker::new(config.bindings.clone(), config.input_capacity);

        let mut game = Self::new(world, player, tracker, config.collision_policy);
        game.show_boundaries = config.show_boundaries;

        let paths = [
            (AssetKey::Background, &config.assets.background),
            (AssetKey::Foreground, &config.assets.foreground),
            (AssetKey::Player, &config.assets.player),
        ];
        for (key, path) in paths {
            if let Some(path) = path {
                game.assets.request(key, path.clone());
            }
        }

        debug!(
            target: "game",
            "Game loop ready: {} obstacles, player {:?}, policy {:?}",
            game.world.obstacles.len(),
            game.player.hitbox,
            game.policy
        );

        Ok((game, listener))
    }

    /// Enables debug drawing of obstacles and the player hitbox.
    pub fn with_boundaries_visible(mut self, visible: bool) -> Self {
        self.show_boundaries = visible;
        self
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one full frame: install images, render, then step.
    pub fn frame(&mut self, target: &mut dyn RenderTarget, dt: Duration) -> StepReport {
        self.install_assets();
        self.render(target);
        self.step(dt)
    }

    /// Draws the current state, back to front.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        self.world.background.draw(target);

        if self.show_boundaries {
            for obstacle in &self.world.obstacles {
                target.fill_rect(*obstacle, BOUNDARY_COLOR);
            }
            target.fill_rect(self.player.hitbox, HITBOX_COLOR);
        }

        self.player.sprite.draw(target);
        self.world.foreground.draw(target);
    }

    /// Advances input, movement and collision by one frame.
    pub fn step(&mut self, dt: Duration) -> StepReport {
        self.tracker.poll();
        let desired = self.tracker.current_direction();

        let report = match self.policy {
            CollisionPolicy::Sticky => self.step_sticky(desired),
            CollisionPolicy::Rewind => self.step_rewind(desired),
        };

        self.animate(desired.is_some() && report.state == LoopState::Idle, dt);

        trace!(target: "game", "Step: desired {:?} -> {:?}", desired, report);
        report
    }

    //--- Policies ---------------------------------------------------------

    fn step_sticky(&mut self, desired: Option<Direction>) -> StepReport {
        match self.state {
            LoopState::Idle => {
                let Some(direction) = desired else {
                    self.movement.clear();
                    return self.report(None, false);
                };

                let command = self
                    .movement
                    .apply_direction(self.world.movables_mut(), direction, self.player.speed);

                let collided = self.is_colliding();
                if collided {
                    debug!(target: "game", "Blocked moving {:?}", direction);
                    self.state = LoopState::Blocked { sticky: command };
                }
                self.report(Some(command), collided)
            }

            LoopState::Blocked { sticky } => {
                if self.is_colliding() {
                    let correction = sticky.inverse();
                    self.movement.apply(self.world.movables_mut(), correction);
                    self.report(Some(correction), true)
                } else {
                    debug!(target: "game", "Contact cleared");
                    self.state = LoopState::Idle;
                    self.movement.clear();
                    self.report(None, false)
                }
            }
        }
    }

    fn step_rewind(&mut self, desired: Option<Direction>) -> StepReport {
        let Some(direction) = desired else {
            self.movement.clear();
            return self.report(None, false);
        };

        let command = self
            .movement
            .apply_direction(self.world.movables_mut(), direction, self.player.speed);

        if self.is_colliding() {
            self.movement.undo_last(self.world.movables_mut());
            return self.report(None, true);
        }
        self.report(Some(command), false)
    }

    //--- Internal Helpers -------------------------------------------------

    fn report(&self, moved: Option<MoveCommand>, collided: bool) -> StepReport {
        StepReport {
            state: self.state,
            moved,
            collided,
        }
    }

    fn is_colliding(&self) -> bool {
        match first_overlap(&self.player.hitbox, &self.world.obstacles) {
            Some(index) => {
                trace!(target: "game", "Player overlaps obstacle #{}", index);
                true
            }
            None => false,
        }
    }

    fn animate(&mut self, walking: bool, dt: Duration) {
        if let Some(animation) = self.player.sprite.animation_mut() {
            if walking {
                animation.advance(dt);
            } else {
                animation.reset();
            }
        }
    }

    fn install_assets(&mut self) {
        for (key, image) in self.assets.poll() {
            let target = match key {
                AssetKey::Background => &mut self.world.background,
                AssetKey::Foreground => &mut self.world.foreground,
                AssetKey::Player => &mut self.player.sprite,
            };
            target.set_image(image);
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
