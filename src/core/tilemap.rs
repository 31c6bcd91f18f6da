//=========================================================================
// Tile Map
//=========================================================================
//
// Flat collision map and boundary construction.
//
// Architecture:
//   [codes..] + stride → rows → cells == blocking code → Vec<Rect>
//
// The map is an inert asset: it is read once at startup, turned into
// world-space obstacle rectangles, and never consulted again.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::geometry::{Point, Rect};

//=== TileMap =============================================================

/// Row-major grid of integer tile codes.
///
/// `codes.len()` is expected to be a multiple of `stride`. When it is not,
/// the trailing partial row is dropped: it is never read and produces no
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    stride: usize,
    codes: Vec<i32>,
}

impl TileMap {
    /// Creates a map from a flat code sequence with `stride` columns per row.
    pub fn new(codes: Vec<i32>, stride: usize) -> Self {
        Self { stride, codes }
    }

    /// Number of columns per row.
    pub fn columns(&self) -> usize {
        self.stride
    }

    /// Number of complete rows (a trailing partial row is not counted).
    pub fn rows(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.codes.len() / self.stride
        }
    }

    /// Number of codes past the last complete row.
    pub fn trailing_codes(&self) -> usize {
        if self.stride == 0 {
            self.codes.len()
        } else {
            self.codes.len() % self.stride
        }
    }

    /// Returns the code at `(col, row)` if the cell lies in a complete row.
    pub fn code_at(&self, col: usize, row: usize) -> Option<i32> {
        if col >= self.stride || row >= self.rows() {
            return None;
        }
        self.codes.get(row * self.stride + col).copied()
    }

    /// Iterates over complete rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        // chunks_exact() leaves the partial remainder out
        let stride = self.stride.max(1);
        let rows = self.rows();
        self.codes.chunks_exact(stride).take(rows)
    }

    /// Builds one `tile_size` square obstacle for every cell equal to
    /// `blocking_code`.
    ///
    /// The cell at `(col, row)` is placed at
    /// `(col * tile_size + offset.x, row * tile_size + offset.y)`.
    /// Output order is row-major.
    ///
    /// # Panics
    ///
    /// Panics if `tile_size <= 0`.
    pub fn build_boundaries(&self, tile_size: i32, offset: Point, blocking_code: i32) -> Vec<Rect> {
        assert!(tile_size > 0, "Tile size must be positive, got {}", tile_size);

        if self.stride == 0 {
            warn!(target: "tilemap", "Stride is zero, map of {} codes yields no boundaries", self.codes.len());
            return Vec::new();
        }

        let trailing = self.trailing_codes();
        if trailing > 0 {
            warn!(
                target: "tilemap",
                "Map length {} is not a multiple of stride {}, dropping {} trailing codes",
                self.codes.len(),
                self.stride,
                trailing
            );
        }

        let boundaries: Vec<Rect> = self
            .iter_rows()
            .enumerate()
            .flat_map(move |(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(move |(_, code)| **code == blocking_code)
                    .map(move |(col, _)| {
                        Rect::new(
                            col as i32 * tile_size + offset.x,
                            row as i32 * tile_size + offset.y,
                            tile_size,
                            tile_size,
                        )
                    })
            })
            .collect();

        debug!(
            target: "tilemap",
            "Built {} boundaries from {}x{} map (code {})",
            boundaries.len(),
            self.columns(),
            self.rows(),
            blocking_code
        );

        boundaries
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: i32 = 1025;

    #[test]
    fn builds_boundaries_at_cell_positions() {
        let map = TileMap::new(vec![0, BLOCK, 0, BLOCK, 0, 0], 3);
        let boundaries = map.build_boundaries(48, Point::ORIGIN, BLOCK);

        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0], Rect::new(48, 0, 48, 48));
        assert_eq!(boundaries[1], Rect::new(0, 48, 48, 48));
    }

    #[test]
    fn offset_shifts_every_boundary() {
        let map = TileMap::new(vec![BLOCK, 0, 0, BLOCK], 2);
        let boundaries = map.build_boundaries(48, Point::new(-720, -610), BLOCK);

        assert_eq!(boundaries[0].position, Point::new(-720, -610));
        assert_eq!(boundaries[1].position, Point::new(-672, -562));
    }

    #[test]
    fn trailing_partial_row_is_dropped() {
        let map = TileMap::new(vec![0, 0, BLOCK, BLOCK], 3);

        assert_eq!(map.rows(), 1);
        assert_eq!(map.trailing_codes(), 1);

        let boundaries = map.build_boundaries(48, Point::ORIGIN, BLOCK);
        assert_eq!(boundaries, vec![Rect::new(96, 0, 48, 48)]);
    }

    #[test]
    fn other_codes_are_passable() {
        let map = TileMap::new(vec![0, 1, 1024, 1026], 2);
        assert!(map.build_boundaries(48, Point::ORIGIN, BLOCK).is_empty());
    }

    #[test]
    fn zero_stride_yields_nothing() {
        let map = TileMap::new(vec![BLOCK, BLOCK], 0);
        assert_eq!(map.rows(), 0);
        assert!(map.build_boundaries(48, Point::ORIGIN, BLOCK).is_empty());
    }

    #[test]
    fn code_at_respects_complete_rows() {
        let map = TileMap::new(vec![1, 2, 3, 4, 5], 2);
        assert_eq!(map.code_at(1, 0), Some(2));
        assert_eq!(map.code_at(0, 1), Some(3));
        assert_eq!(map.code_at(0, 2), None);
        assert_eq!(map.code_at(2, 0), None);
    }

    #[test]
    #[should_panic(expected = "Tile size must be positive")]
    fn zero_tile_size_panics() {
        TileMap::new(vec![BLOCK], 1).build_boundaries(0, Point::ORIGIN, BLOCK);
    }

    #[test]
    fn deserializes_from_ron() {
        let map: TileMap = ron::from_str("(stride: 2, codes: [0, 1025, 1025, 0])").unwrap();
        assert_eq!(map.columns(), 2);
        assert_eq!(map.build_boundaries(48, Point::ORIGIN, BLOCK).len(), 2);
    }
}
