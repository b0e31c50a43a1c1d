//! Breadth-first traversal stepper.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use sv_ir::{Checkpoint, CheckpointKind, Graph, NodeId, Outcome};

use crate::stepper::{Step, Stepper};

/// Frontier-driven level-order traversal.
///
/// Nodes are deduplicated at enqueue time, so each enters the frontier
/// once. One visit checkpoint per dequeue, carrying the predecessor
/// that discovered the node.
pub struct Bfs {
    graph: Graph,
    start: NodeId,
    target: NodeId,
    queue: VecDeque<(NodeId, Option<NodeId>)>,
    enqueued: Vec<bool>,
    visits: Vec<NodeId>,
    outcome: Option<Outcome>,
}

impl Bfs {
    pub fn new(graph: Graph, start: NodeId, target: NodeId) -> Self {
        let mut search = Self {
            graph,
            start,
            target,
            queue: VecDeque::new(),
            enqueued: Vec::new(),
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

impl Stepper for Bfs {
    fn step(&mut self) -> Step {
        if let Some(outcome) = self.outcome {
            return Step::Done(outcome);
        }
        let Some((node, from)) = self.queue.pop_front() else {
            self.outcome = Some(Outcome::NotFound);
            return Step::Done(Outcome::NotFound);
        };

        self.visits.push(node);
        if node == self.target {
            self.outcome = Some(Outcome::Found);
        } else {
            for edge in self.graph.neighbors(node) {
                if !self.enqueued[edge.to as usize] {
                    self.enqueued[edge.to as usize] = true;
                    self.queue.push_back((edge.to, Some(node)));
                }
            }
        }
        Step::Emit(Checkpoint::graph(CheckpointKind::Visit { node, from }))
    }

    fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    fn reset(&mut self) {
        self.enqueued = vec![false; self.graph.node_count()];
        self.enqueued[self.start as usize] = true;
        self.queue.clear();
        self.queue.push_back((self.start, None));
        self.visits.clear();
        self.outcome = None;
    }
}
