//! Read-only view of the shared world for one tick
//!
//! The engine owns the object, goal and walls. Every core component receives a
//! `WorldView` by reference and never writes to it.

use super::types::Point2;

/// Axis-aligned wall rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub center: Point2,
    /// Full width and height
    pub size: Point2,
}

impl WallSpec {
    pub fn new(center: Point2, size: Point2) -> Self {
        Self { center, size }
    }

    /// Copy of this wall with every side pushed out by `gap`
    pub fn inflated(&self, gap: f32) -> Self {
        Self {
            center: self.center,
            size: self.size + Point2::new(2.0 * gap, 2.0 * gap),
        }
    }

    /// Corners in order: top-right, bottom-right, bottom-left, top-left
    pub fn corners(&self) -> [Point2; 4] {
        let h = self.size * 0.5;
        [
            self.center + Point2::new(h.x, h.y),
            self.center + Point2::new(h.x, -h.y),
            self.center + Point2::new(-h.x, -h.y),
            self.center + Point2::new(-h.x, h.y),
        ]
    }

    /// The four boundary edges as (start, end) pairs
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Whether a circle of `radius` at `point` touches this rectangle's bounding box
    pub fn overlaps_circle_box(&self, point: Point2, radius: f32) -> bool {
        let h = self.size * 0.5;
        point.x + radius >= self.center.x - h.x
            && point.x - radius <= self.center.x + h.x
            && point.y + radius >= self.center.y - h.y
            && point.y - radius <= self.center.y + h.y
    }
}

/// Everything the core reads about the shared world in a tick
#[derive(Debug, Clone, PartialEq)]
pub struct WorldView {
    pub object_position: Point2,
    /// Full extent of the object's footprint
    pub object_size: Point2,
    pub goal_position: Point2,
    pub goal_radius: f32,
    pub walls: Vec<WallSpec>,
    /// The arena is the square [-half_extent, half_extent]^2
    pub half_extent: f32,
}

impl WorldView {
    /// Obstacle-free arena with the given object and goal placement
    pub fn open_arena(object_position: Point2, goal_position: Point2) -> Self {
        Self {
            object_position,
            object_size: Point2::new(0.4, 0.4),
            goal_position,
            goal_radius: 0.2,
            walls: Vec::new(),
            half_extent: 1.5,
        }
    }

    pub fn with_walls(mut self, walls: Vec<WallSpec>) -> Self {
        self.walls = walls;
        self
    }

    /// Radius of the circle that covers the object's footprint
    pub fn object_bounding_radius(&self) -> f32 {
        self.object_size.x.max(self.object_size.y) * std::f32::consts::SQRT_2 * 0.5
    }

    /// Whether a point lies strictly inside the arena
    pub fn in_arena(&self, point: Point2) -> bool {
        point.x.abs() < self.half_extent && point.y.abs() < self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_inflated_wall_grows_both_axes() {
        let wall = WallSpec::new(Point2::new(0.0, 0.0), Point2::new(1.5, 0.5));
        let inflated = wall.inflated(0.2);
        assert_abs_diff_eq!(inflated.size.x, 1.9, epsilon = 1e-6);
        assert_abs_diff_eq!(inflated.size.y, 0.9, epsilon = 1e-6);
        let top_right = inflated.corners()[0];
        assert_abs_diff_eq!(top_right.x, 0.95, epsilon = 1e-6);
        assert_abs_diff_eq!(top_right.y, 0.45, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_box_overlap() {
        let wall = WallSpec::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        assert!(wall.overlaps_circle_box(Point2::new(0.6, 0.0), 0.2));
        assert!(!wall.overlaps_circle_box(Point2::new(0.8, 0.0), 0.2));
    }

    #[test]
    fn test_in_arena_excludes_boundary() {
        let world = WorldView::open_arena(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
        assert!(world.in_arena(Point2::new(1.49, -1.49)));
        assert!(!world.in_arena(Point2::new(1.5, 0.0)));
    }
}
