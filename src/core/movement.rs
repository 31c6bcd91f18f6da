//=========================================================================
// Movement Controller
//=========================================================================
//
// Scrolls every world-anchored position by one shared displacement.
//
// Architecture:
//   Direction + speed → MoveCommand → (dx, dy) → every movable position
//
// The player never moves; background, foreground and obstacles all
// receive the same delta, which keeps them aligned with each other while
// the screen-fixed player hitbox stays put.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::geometry::Point;
use super::input::Direction;

//=== MoveCommand =========================================================

/// One world displacement: `magnitude` pixels in `direction`.
///
/// A negative magnitude moves the world the other way; this is how the
/// inverse of a command is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    pub direction: Direction,
    pub magnitude: i32,
}

impl MoveCommand {
    #[inline]
    pub const fn new(direction: Direction, magnitude: i32) -> Self {
        Self { direction, magnitude }
    }

    /// World displacement vector `(dx, dy)`.
    #[inline]
    pub const fn delta(&self) -> (i32, i32) {
        self.direction.world_delta(self.magnitude)
    }

    /// The command that exactly cancels this one.
    #[inline]
    pub const fn inverse(&self) -> Self {
        Self {
            direction: self.direction,
            magnitude: -self.magnitude,
        }
    }
}

//=== MovementController ==================================================

/// Applies displacements to movable positions and remembers the last one.
#[derive(Debug, Default)]
pub struct MovementController {
    last: Option<MoveCommand>,
}

impl MovementController {
    pub fn new() -> Self {
        Self { last: None }
    }

    //--- Movement ---------------------------------------------------------

    /// Moves every position for a player walking `direction` at `speed`.
    pub fn apply_direction<'a, I>(&mut self, movables: I, direction: Direction, speed: i32) -> MoveCommand
    where
        I: IntoIterator<Item = &'a mut Point>,
    {
        let command = MoveCommand::new(direction, speed);
        self.apply(movables, command);
        command
    }

    /// Applies `command` to every position and records it as the last move.
    pub fn apply<'a, I>(&mut self, movables: I, command: MoveCommand)
    where
        I: IntoIterator<Item = &'a mut Point>,
    {
        let (dx, dy) = command.delta();
        for position in movables {
            position.translate(dx, dy);
        }

        trace!(target: "game", "World shifted by ({}, {})", dx, dy);
        self.last = Some(command);
    }

    /// Reverts the last recorded move, restoring positions exactly.
    ///
    /// Returns the command that was undone. A second call is a no-op.
    pub fn undo_last<'a, I>(&mut self, movables: I) -> Option<MoveCommand>
    where
        I: IntoIterator<Item = &'a mut Point>,
    {
        let command = self.last.take()?;
        let (dx, dy) = command.inverse().delta();
        for position in movables {
            position.translate(dx, dy);
        }

        trace!(target: "game", "Undid {:?}", command);
        Some(command)
    }

    /// Forgets the last move (a frame without movement).
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<MoveCommand> {
        self.last
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
