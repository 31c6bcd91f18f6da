//=========================================================================
// World State
//=========================================================================
//
// Everything the movement loop mutates, owned in one place.
//
// Layout:
//   WorldState (scrolls)              Player (screen-fixed)
//     ├─ background: Renderable         ├─ hitbox: Rect
//     ├─ foreground: Renderable         ├─ speed
//     └─ obstacles: Vec<Rect>           └─ sprite: Renderable
//
// Only `WorldState` positions are ever translated. The player hitbox and
// the obstacles are compared in screen space.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::iter;

//=== Internal Dependencies ===============================================

use super::geometry::{Point, Rect};
use super::render::{Animation, Renderable};

//=== WorldState ==========================================================

/// Scrolling layers and obstacles.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub background: Renderable,
    pub foreground: Renderable,
    pub obstacles: Vec<Rect>,
}

impl WorldState {
    /// Background and foreground anchored at `origin` plus `obstacles`.
    pub fn new(origin: Point, obstacles: Vec<Rect>) -> Self {
        Self {
            background: Renderable::image(origin),
            foreground: Renderable::image(origin),
            obstacles,
        }
    }

    /// Every world-anchored position, each exactly once.
    pub fn movables_mut(&mut self) -> impl Iterator<Item = &mut Point> + '_ {
        iter::once(self.background.position_mut())
            .chain(iter::once(self.foreground.position_mut()))
            .chain(self.obstacles.iter_mut().map(|obstacle| &mut obstacle.position))
    }
}

//=== Player ==============================================================

/// The screen-fixed player.
#[derive(Debug, Clone)]
pub struct Player {
    pub hitbox: Rect,
    pub speed: i32,
    pub sprite: Renderable,
}

impl Player {
    pub fn new(hitbox: Rect, speed: i32, animation: Animation) -> Self {
        Self {
            hitbox,
            speed,
            sprite: Renderable::sprite(hitbox.position, animation),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
