//! Search runners: array scans and graph traversals.

mod bfs;
mod binary;
mod dfs;
mod dijkstra;
mod linear;

pub use bfs::Bfs;
pub use binary::BinarySearch;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use linear::LinearSearch;

use alloc::vec::Vec;

use sv_ir::{Dataset, Graph, NodeId};

use crate::stepper::{Step, Stepper};

/// Which graph traversal to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

impl SearchAlgorithm {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bfs" | "breadth" | "breadth-search" => Some(Self::Bfs),
            "dfs" | "depth" | "depth-search" => Some(Self::Dfs),
            "dijkstra" => Some(Self::Dijkstra),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
            Self::Dijkstra => "Dijkstra Algorithm",
        }
    }
}

/// Which array search to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArraySearchAlgorithm {
    Linear,
    Binary,
}

impl ArraySearchAlgorithm {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "linear" | "linear-search" => Some(Self::Linear),
            "binary" | "binary-search" => Some(Self::Binary),
            _ => None,
        }
    }
}

/// A graph traversal run: one algorithm bound to one graph.
pub enum GraphSearch {
    Bfs(Bfs),
    Dfs(Dfs),
    Dijkstra(Dijkstra),
}

impl GraphSearch {
    pub fn new(algorithm: SearchAlgorithm, graph: Graph, start: NodeId, target: NodeId) -> Self {
        match algorithm {
            SearchAlgorithm::Bfs => Self::Bfs(Bfs::new(graph, start, target)),
            SearchAlgorithm::Dfs => Self::Dfs(Dfs::new(graph, start, target)),
            SearchAlgorithm::Dijkstra => Self::Dijkstra(Dijkstra::new(graph, start, target)),
        }
    }

    /// Nodes in visitation (settle) order so far.
    pub fn visit_order(&self) -> &[NodeId] {
        match self {
            Self::Bfs(s) => s.visit_order(),
            Self::Dfs(s) => s.visit_order(),
            Self::Dijkstra(s) => s.visit_order(),
        }
    }

    /// Shortest path, once found (Dijkstra only).
    pub fn path(&self) -> Option<Vec<NodeId>> {
        match self {
            Self::Dijkstra(s) => s.path(),
            _ => None,
        }
    }

    /// Shortest distance to the target, once found (Dijkstra only).
    pub fn distance(&self) -> Option<u32> {
        match self {
            Self::Dijkstra(s) => s.distance(),
            _ => None,
        }
    }
}

impl Stepper for GraphSearch {
    fn step(&mut self) -> Step {
        match self {
            Self::Bfs(s) => s.step(),
            Self::Dfs(s) => s.step(),
            Self::Dijkstra(s) => s.step(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Bfs(s) => s.is_complete(),
            Self::Dfs(s) => s.is_complete(),
            Self::Dijkstra(s) => s.is_complete(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Bfs(s) => s.reset(),
            Self::Dfs(s) => s.reset(),
            Self::Dijkstra(s) => s.reset(),
        }
    }
}

/// An array search run.
pub enum ArraySearch {
    Linear(LinearSearch),
    Binary(BinarySearch),
}

impl ArraySearch {
    pub fn new(algorithm: ArraySearchAlgorithm, data: Dataset, target: u32) -> Self {
        match algorithm {
            ArraySearchAlgorithm::Linear => Self::Linear(LinearSearch::new(data, target)),
            ArraySearchAlgorithm::Binary => Self::Binary(BinarySearch::new(data, target)),
        }
    }

    /// Index of the match, once found.
    pub fn found_index(&self) -> Option<usize> {
        match self {
            Self::Linear(s) => s.found_index(),
            Self::Binary(s) => s.found_index(),
        }
    }
}

impl Stepper for ArraySearch {
    fn step(&mut self) -> Step {
        match self {
            Self::Linear(s) => s.step(),
            Self::Binary(s) => s.step(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Self::Linear(s) => s.is_complete(),
            Self::Binary(s) => s.is_complete(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Linear(s) => s.reset(),
            Self::Binary(s) => s.reset(),
        }
    }
}
