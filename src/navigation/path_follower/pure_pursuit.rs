//! Lookahead pursuit along a polyline

use super::PathFollower;
use crate::common::Point2;
use crate::error::{PusherError, Result};
use log::debug;
use std::collections::HashMap;

/// Steers toward the point a fixed arc length along the path from its start
#[derive(Debug, Clone, PartialEq)]
pub struct LookaheadPursuit {
    lookahead_distance: f32,
}

impl LookaheadPursuit {
    pub fn with_lookahead(lookahead_distance: f32) -> Self {
        Self { lookahead_distance }
    }
}

/// Point at arc length `distance` along `path`
///
/// Paths shorter than `distance` yield their last point.
pub fn point_at_distance(path: &[Point2], distance: f32) -> Option<Point2> {
    let Some(&last) = path.last() else {
        debug!("Path is empty");
        return None;
    };

    let mut accumulated = 0.0;
    for segment in path.windows(2) {
        let (from, to) = (segment[0], segment[1]);
        let length = (to - from).norm();
        if length > 0.0 && accumulated + length >= distance {
            let fraction = (distance - accumulated) / length;
            return Some(from + (to - from) * fraction);
        }
        accumulated += length;
    }

    Some(last)
}

impl PathFollower for LookaheadPursuit {
    fn new() -> Self {
        LookaheadPursuit {
            lookahead_distance: 0.5,
        }
    }

    fn target(&self, path: &[Point2]) -> Option<Point2> {
        point_at_distance(path, self.lookahead_distance)
    }

    fn name(&self) -> &str {
        "LookaheadPursuit"
    }

    fn configure(&mut self, params: &HashMap<String, f32>) -> Result<()> {
        if let Some(&lookahead) = params.get("lookahead_distance") {
            if lookahead < 0.0 {
                return Err(PusherError::Config(
                    "Lookahead distance must be non-negative".to_string(),
                ));
            }
            self.lookahead_distance = lookahead;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_interpolates_within_segment() {
        let path = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        let target = point_at_distance(&path, 1.5).unwrap();
        assert_relative_eq!(target.x, 1.0);
        assert_relative_eq!(target.y, 0.5);
    }

    #[test]
    fn test_short_path_returns_last_point() {
        let path = [p(0.0, 0.0), p(0.2, 0.0)];
        assert_eq!(point_at_distance(&path, 0.5), Some(p(0.2, 0.0)));
    }

    #[test]
    fn test_empty_path_has_no_target() {
        assert_eq!(point_at_distance(&[], 0.5), None);
    }

    #[test]
    fn test_duplicate_waypoints_are_skipped() {
        let path = [p(0.0, 0.0), p(0.0, 0.0), p(0.0, 2.0)];
        let target = point_at_distance(&path, 0.0).unwrap();
        assert!(target.x.is_finite() && target.y.is_finite());
        assert_eq!(target, p(0.0, 0.0));
    }

    #[test]
    fn test_configure_validates_lookahead() {
        let mut follower = LookaheadPursuit::new();
        assert_eq!(follower.name(), "LookaheadPursuit");

        let mut params = HashMap::new();
        params.insert("lookahead_distance".to_string(), -1.0);
        assert!(follower.configure(&params).is_err());
        let path = [p(0.0, 0.0), p(2.0, 0.0)];
        assert_eq!(follower.target(&path), Some(p(0.5, 0.0)));

        params.insert("lookahead_distance".to_string(), 0.8);
        follower.configure(&params).unwrap();
        assert_eq!(follower.target(&path), Some(p(0.8, 0.0)));
    }
}
