//! Visibility graph over inflated wall corners
//!
//! Nodes are the corners of every wall grown by a clearance gap, plus the goal
//! and the object. Two nodes are connected when the straight segment between
//! them crosses none of the original wall edges. The graph is rebuilt from the
//! world view on every call and owns no state between calls.

use crate::common::{Point2, WorldView};
use crate::config::PlannerConfig;
use log::trace;

/// Whether segments `a1-a2` and `b1-b2` intersect
///
/// Segments whose direction cross product is below `epsilon` in magnitude are
/// treated as parallel and never intersect. Touching endpoints count as a hit.
pub fn segments_intersect(a1: Point2, a2: Point2, b1: Point2, b2: Point2, epsilon: f32) -> bool {
    let cross = |u: Point2, v: Point2| u.x * v.y - u.y * v.x;

    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let denominator = cross(d1, d2);
    if denominator.abs() < epsilon {
        return false;
    }

    let d3 = b1 - a1;
    let t1 = cross(d3, d2) / denominator;
    let t2 = cross(d3, d1) / denominator;
    (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2)
}

/// Undirected weighted graph of mutually visible points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityGraph {
    pub nodes: Vec<Point2>,
    /// adjacency[i] = [(neighbor, distance), ...]
    pub adjacency: Vec<Vec<(usize, f32)>>,
    /// None when the object lies outside the arena
    pub object: Option<usize>,
    /// None when the goal lies outside the arena
    pub goal: Option<usize>,
}

impl VisibilityGraph {
    /// Build the graph for the current world
    pub fn build(world: &WorldView, config: &PlannerConfig) -> Self {
        let mut nodes: Vec<Point2> = world
            .walls
            .iter()
            .flat_map(|wall| wall.inflated(config.clearance_gap).corners())
            .filter(|&p| world.in_arena(p))
            .collect();

        let mut push_landmark = |p: Point2| {
            if world.in_arena(p) {
                nodes.push(p);
                Some(nodes.len() - 1)
            } else {
                None
            }
        };
        let goal = push_landmark(world.goal_position);
        let object = push_landmark(world.object_position);

        let wall_edges: Vec<(Point2, Point2)> = world.walls.iter().flat_map(|w| w.edges()).collect();
        let blocked = |a: Point2, b: Point2| {
            wall_edges
                .iter()
                .any(|&(c, d)| segments_intersect(a, b, c, d, config.parallel_epsilon))
        };

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for i in 0..nodes.len() {
            for j in i + 1..nodes.len() {
                if !blocked(nodes[i], nodes[j]) {
                    let distance = (nodes[j] - nodes[i]).norm();
                    adjacency[i].push((j, distance));
                    adjacency[j].push((i, distance));
                }
            }
        }

        let graph = Self {
            nodes,
            adjacency,
            object,
            goal,
        };
        trace!(
            "Visibility graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edge_count()
        );
        graph
    }

    /// Each undirected edge once, as (i, j) with i < j
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |&&(j, _)| i < j)
                    .map(move |&(j, _)| (i, j))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}
