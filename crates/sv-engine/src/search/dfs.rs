//! Depth-first traversal stepper.

use alloc::vec;
use alloc::vec::Vec;

use sv_ir::{Checkpoint, CheckpointKind, Graph, NodeId, Outcome};

use crate::stepper::{Step, Stepper};

/// Stack-driven pre-order traversal.
///
/// Children are pushed right-to-left so the leftmost child pops first.
/// Nodes are marked visited at pop time; stale stack entries for
/// already-visited nodes are skipped without consuming a step.
pub struct Dfs {
    graph: Graph,
    start: NodeId,
    target: NodeId,
    stack: Vec<(NodeId, Option<NodeId>)>,
    visited: Vec<bool>,
    visits: Vec<NodeId>,
    outcome: Option<Outcome>,
}

impl Dfs {
    pub fn new(graph: Graph, start: NodeId, target: NodeId) -> Self {
        let mut search = Self {
            graph,
            start,
            target,
            stack: Vec::new(),
            visited: Vec::new(),
            visits: Vec::new(),
            outcome: None,
        };
        Stepper::reset(&mut search);
        search
    }

    pub fn visit_order(&self) -> &[NodeId] {
        &self.visits
    }
}

impl Stepper for Dfs {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }
        let (node, from) = loop {
            let Some(entry) = self.stack.pop() else {
                self.outcome = Some(Outcome::NotFound);
                return Step::Done(Outcome::NotFound);
            };
            if !self.visited[entry.0 as usize] {
                break entry;
            }
        };

        self.visited[node as usize] = true;
        self.visits.push(node);
        if node == self.target {
            self.outcome = Some(Outcome::Found);
        } else {
            for edge in self.graph.neighbors(node).iter().rev() {
                if !self.visited[edge.to as usize] {
                    self.stack.push((edge.to, Some(node)));
                }
            }
        }
        Step::Emit(Checkpoint::graph(CheckpointKind::Visit { node, from }))
    }

    fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    fn reset(&mut self) {
        self.visited = vec![false; self.graph.node_count()];
        self.stack.clear();
        self.stack.push((self.start, None));
        self.visits.clear();
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(search: &mut Dfs) -> Outcome {
        loop {
            if let Step::Done(outcome) = search.step() {
                return outcome;
            }
        }
    }

    fn labels<'g>(graph: &'g Graph, ids: &[NodeId]) -> Vec<&'g str> {
        ids.iter().map(|&id| graph.label(id)).collect()
    }

    #[test]
    fn visits_tree_in_pre_order() {
        let graph = Graph::sample_tree();
        let target = graph.find("G").unwrap();
        let mut search = Dfs::new(graph.clone(), 0, target);
        assert_eq!(drive(&mut search), Outcome::Found);
        assert_eq!(
            labels(&graph, search.visit_order()),
            ["A", "B", "D", "E", "C", "F", "G"]
        );
    }

    #[test]
    fn stops_at_target() {
        let graph = Graph::sample_tree();
        let target = graph.find("E").unwrap();
        let mut search = Dfs::new(graph.clone(), 0, target);
        assert_eq!(drive(&mut search), Outcome::Found);
        assert_eq!(labels(&graph, search.visit_order()), ["A", "B", "D", "E"]);
    }

    #[test]
    fn unreachable_target_is_not_found() {
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let _isolated = graph.add_node("C");
        graph.add_edge(a, b, 1);
        let mut search = Dfs::new(graph, a, 2);
        assert_eq!(drive(&mut search), Outcome::NotFound);
    }

    #[test]
    fn diamond_graph_visits_each_node_once() {
        // A -> B, A -> C, B -> D, C -> D: D is reachable twice but
        // must be visited once.
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        // Unreachable target so the traversal exhausts the frontier.
        let z = graph.add_node("Z");
        graph.add_edge(a, b, 1);
        graph.add_edge(a, c, 1);
        graph.add_edge(b, d, 1);
        graph.add_edge(c, d, 1);
        let mut search = Dfs::new(graph.clone(), a, z);
        assert_eq!(drive(&mut search), Outcome::NotFound);
        assert_eq!(labels(&graph, search.visit_order()), ["A", "B", "D", "C"]);
    }
}
