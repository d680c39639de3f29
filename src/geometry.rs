//! Geometry value types for easel
//!
//! Plain `Copy` value types with no ownership relationships. Rectangles may
//! carry negative width/height (convenient for animating shrinking shapes);
//! a normalized form is derived on demand, never stored.

/// A position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle. Width and height may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of an ellipse centered at `center` with the given radii.
    /// Handy together with [`crate::mouse::Mouse::is_in_rect`].
    pub fn around_ellipse(center: Point, radius_x: i32, radius_y: i32) -> Self {
        Self::new(
            center.x - radius_x,
            center.y - radius_y,
            radius_x * 2,
            radius_y * 2,
        )
    }

    /// Bounding box of a circle centered at `center` with the given radius.
    pub fn around_circle(center: Point, radius: i32) -> Self {
        Self::around_ellipse(center, radius, radius)
    }

    /// Fixes up rectangles with negative width or height, moving the origin
    /// so that width and height come out non-negative. Idempotent.
    pub fn normalize(self) -> Self {
        Self {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// True if the two rectangles overlap on both axes. Edges that merely
    /// touch do not count as overlapping, unlike the inclusive bounds of
    /// [`Rect::contains`]. The mismatch is inherited behavior; callers rely
    /// on it, so do not unify the two conventions.
    pub fn overlaps(self, other: Rect) -> bool {
        let overlap_in_x = self.x < other.x + other.width && self.x + self.width > other.x;
        let overlap_in_y = self.y < other.y + other.height && self.y + self.height > other.y;

        overlap_in_x && overlap_in_y
    }

    /// True if the point lies inside the rectangle, inclusive on all four
    /// bounds. A zero-sized rectangle still contains the point exactly on it.
    pub fn contains(self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.x + self.width && self.y <= p.y && p.y <= self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_flips_negative_extents() {
        let r = Rect::new(10, 10, -5, -5).normalize();
        assert_eq!(r, Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn normalize_is_idempotent() {
        let cases = [
            Rect::new(0, 0, 10, 10),
            Rect::new(10, 10, -5, -5),
            Rect::new(-3, 7, 0, -20),
            Rect::new(5, -5, -1, 1),
        ];
        for r in cases {
            let once = r.normalize();
            assert_eq!(once.normalize(), once);
            assert!(once.width >= 0);
            assert!(once.height >= 0);
        }
    }

    #[test]
    fn touching_edges_do_not_overlap_but_do_contain() {
        let left = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        assert!(!left.overlaps(right));
        assert!(!right.overlaps(left));

        // The shared edge point hits both rectangles inclusively.
        let edge = Point::new(10, 5);
        assert!(left.contains(edge));
        assert!(right.contains(edge));
    }

    #[test]
    fn overlapping_rects_overlap_both_ways() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
    }

    #[test]
    fn zero_sized_rect_contains_its_own_corner() {
        let r = Rect::new(4, 4, 0, 0);
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 4)));
        assert!(!r.overlaps(Rect::new(4, 4, 10, 10)));
    }

    #[test]
    fn circle_bounding_box() {
        let r = Rect::around_circle(Point::new(100, 100), 10);
        assert_eq!(r, Rect::new(90, 90, 20, 20));
    }
}
