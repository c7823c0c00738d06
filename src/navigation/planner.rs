//! Path planning module

use super::dijkstra::shortest_path;
use super::visibility::VisibilityGraph;
use crate::common::{Point2, WorldView};
use crate::config::PlannerConfig;
use log::warn;

/// A planned path together with the graph it was found in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub graph: VisibilityGraph,
    /// Waypoints from the object to the goal, empty when there is no route
    pub path: Vec<Point2>,
    /// Total path length, None when there is no route
    pub length: Option<f32>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Trait for path planning algorithms
pub trait PathPlanner: Send + Sync {
    /// Plan a route that takes the object to the goal
    fn plan(&self, world: &WorldView) -> Plan;
}

/// Shortest object-to-goal route through a visibility graph
#[derive(Debug, Clone, Default)]
pub struct VisibilityPlanner {
    config: PlannerConfig,
}

impl VisibilityPlanner {
    /// Create a new path planner
    pub fn new(config: PlannerConfig) -> Self {
        VisibilityPlanner { config }
    }
}

impl PathPlanner for VisibilityPlanner {
    fn plan(&self, world: &WorldView) -> Plan {
        let graph = VisibilityGraph::build(world, &self.config);

        let route = match (graph.object, graph.goal) {
            (Some(object), Some(goal)) => shortest_path(&graph.adjacency, object, goal),
            _ => None,
        };

        match route {
            Some(route) => Plan {
                path: route.nodes.iter().map(|&i| graph.nodes[i]).collect(),
                length: Some(route.distance),
                graph,
            },
            None => {
                warn!(
                    "No path from object {:?} to goal {:?}",
                    world.object_position, world.goal_position
                );
                Plan {
                    graph,
                    path: Vec::new(),
                    length: None,
                }
            }
        }
    }
}
