//! Dijkstra's shortest path over an adjacency list

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Priority queue entry
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    cost: f32,
    node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a shortest path search
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    /// Node indices from start to goal
    pub nodes: Vec<usize>,
    pub distance: f32,
}

/// Find the shortest path from `start` to `goal`
///
/// `edges[i]` lists `(neighbor, distance)` pairs. Returns None when the goal
/// is unreachable or an index is out of range.
pub fn shortest_path(edges: &[Vec<(usize, f32)>], start: usize, goal: usize) -> Option<ShortestPath> {
    let n = edges.len();
    if start >= n || goal >= n {
        return None;
    }
    if start == goal {
        return Some(ShortestPath {
            nodes: vec![start],
            distance: 0.0,
        });
    }

    let mut dist = vec![f32::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    dist[start] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry { cost: 0.0, node: start });

    while let Some(QueueEntry { cost, node }) = heap.pop() {
        if node == goal {
            break;
        }
        // Stale entry
        if cost > dist[node] {
            continue;
        }

        for &(neighbor, edge_dist) in &edges[node] {
            let candidate = cost + edge_dist;
            if candidate < dist[neighbor] {
                dist[neighbor] = candidate;
                prev[neighbor] = Some(node);
                heap.push(QueueEntry {
                    cost: candidate,
                    node: neighbor,
                });
            }
        }
    }

    if prev[goal].is_none() {
        return None;
    }

    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(p) = prev[current] {
        nodes.push(p);
        current = p;
    }
    nodes.reverse();

    Some(ShortestPath {
        nodes,
        distance: dist[goal],
    })
}
