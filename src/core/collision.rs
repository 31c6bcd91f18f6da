//=========================================================================
// Collision Detection
//=========================================================================
//
// Axis-aligned rectangle overlap.
//
// Overlap uses strict inequalities on both axes, so rectangles that only
// share an edge do not collide. A player walking flush along a wall is
// therefore never reported as blocked.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::geometry::Rect;

//=== Public API ==========================================================

/// Returns `true` if `a` and `b` overlap on both axes.
///
/// ```
/// use tile_walker::core::{collision::intersects, geometry::Rect};
///
/// let wall = Rect::new(10, 0, 10, 10);
/// assert!(intersects(&Rect::new(5, 0, 10, 10), &wall));
/// assert!(!intersects(&Rect::new(0, 0, 10, 10), &wall)); // touching
/// ```
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left() && a.left() < b.right() && a.bottom() > b.top() && a.top() < b.bottom()
}

/// Returns the index of the first obstacle overlapping `hitbox`.
///
/// Only the boolean outcome matters to the movement loop, so the scan
/// stops at the first hit without any priority ordering.
pub fn first_overlap(hitbox: &Rect, obstacles: &[Rect]) -> Option<usize> {
    obstacles.iter().position(|obstacle| intersects(hitbox, obstacle))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Rect> {
        vec![
            Rect::new(0, 0, 10, 10),
            Rect::new(10, 0, 10, 10),
            Rect::new(5, 5, 10, 10),
            Rect::new(-20, -20, 48, 48),
            Rect::new(0, 10, 10, 10),
            Rect::new(100, 100, 1, 1),
            Rect::new(9, 9, 1, 1),
        ]
    }

    //=====================================================================
    // intersects()
    //=====================================================================

    #[test]
    fn intersects_is_symmetric() {
        let rects = samples();
        for a in &rects {
            for b in &rects {
                assert_eq!(intersects(a, b), intersects(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn rect_overlaps_itself() {
        for r in samples() {
            assert!(intersects(&r, &r), "{:?} should overlap itself", r);
        }
    }

    #[test]
    fn touching_on_x_does_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn touching_on_y_does_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(0, 10, 10, 10);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn touching_corner_does_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 10, 10, 10);
        assert!(!intersects(&a, &b));
    }

    #[test]
    fn one_pixel_overlap_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(9, 9, 10, 10);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn containment_intersects() {
        let outer = Rect::new(0, 0, 48, 48);
        let inner = Rect::new(10, 10, 4, 4);
        assert!(intersects(&outer, &inner));
    }

    #[test]
    fn overlap_on_one_axis_only_does_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 50, 10, 10);
        assert!(!intersects(&a, &b));
    }

    //=====================================================================
    // first_overlap()
    //=====================================================================

    #[test]
    fn first_overlap_finds_first_hit() {
        let hitbox = Rect::new(0, 0, 10, 10);
        let obstacles = [
            Rect::new(50, 50, 10, 10),
            Rect::new(5, 5, 10, 10),
            Rect::new(0, 0, 10, 10),
        ];
        assert_eq!(first_overlap(&hitbox, &obstacles), Some(1));
    }

    #[test]
    fn first_overlap_none_when_clear() {
        let hitbox = Rect::new(0, 0, 10, 10);
        let obstacles = [Rect::new(10, 0, 10, 10), Rect::new(-10, 0, 10, 10)];
        assert_eq!(first_overlap(&hitbox, &obstacles), None);
        assert_eq!(first_overlap(&hitbox, &[]), None);
    }
}
