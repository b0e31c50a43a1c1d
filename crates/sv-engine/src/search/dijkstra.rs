//! Dijkstra shortest-path stepper.

use alloc::vec;
use alloc::vec::Vec;

use sv_ir::{Checkpoint, CheckpointKind, Graph, NodeId, Outcome};

use crate::stepper::{Step, Stepper};

const INFINITY: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
enum State {
    /// Pick the unvisited node with the smallest tentative distance.
    Select,
    /// Relax the outgoing edges of the settled node, one per step.
    Relax { current: NodeId, edge: usize },
    /// Walk the reconstructed path for the final highlight pass.
    Trace { leg: usize },
    Finished(Outcome),
}

/// Tentative-distance shortest path search.
///
/// Minimum selection breaks ties on the lowest node id, which makes
/// the settle order fully deterministic. A relax step is emitted only
/// when it improves a distance; non-improving edge checks are silent
/// bookkeeping. After the target settles, the path is replayed as
/// trace checkpoints before the run reports Found.
pub struct Dijkstra {
    graph: Graph,
    start: NodeId,
    target: NodeId,
    dist: Vec<u32>,
    prev: Vec<Option<NodeId>>,
    unvisited: Vec<bool>,
    visits: Vec<NodeId>,
    path: Option<Vec<NodeId>>,
    state: State,
}

impl Dijkstra {
    pub fn new(graph: Graph, start: NodeId, target: NodeId) -> Self {
        let mut search = Self {
            graph,
            start,
            target,
            dist: Vec::new(),
            prev: Vec::new(),
            unvisited: Vec::new(),
            visits: Vec::new(),
            path: None,
            state: State::Finished(Outcome::NotFound),
        };
        Stepper::reset(&mut search);
        search
    }

    pub fn visit_order(&self) -> &[NodeId] {
        &self.visits
    }

    /// The shortest path, once the target has settled.
    pub fn path(&self) -> Option<Vec<NodeId>> {
        self.path.clone()
    }

    /// The shortest distance to the target, once it has settled.
    pub fn distance(&self) -> Option<u32> {
        self.path.as_ref().map(|_| self.dist[self.target as usize])
    }

    /// Unvisited node with the smallest finite distance, lowest id on
    /// ties.
    fn select_min(&self) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for id in 0..self.graph.node_count() as NodeId {
            if !self.unvisited[id as usize] || self.dist[id as usize] == INFINITY {
                continue;
            }
            match best {
                Some(b) if self.dist[b as usize] <= self.dist[id as usize] => {}
                _ => best = Some(id),
            }
        }
        best
    }

    fn reconstruct_path(&self) -> Vec<NodeId> {
        let mut path = vec![self.target];
        let mut current = self.target;
        while let Some(p) = self.prev[current as usize] {
            path.push(p);
            current = p;
        }
        path.reverse();
        path
    }
}

impl Stepper for Dijkstra {
    fn step(&mut self) -> Step {
        loop {
            match self.state {
                State::Finished(outcome) => return Step::Done(outcome),
                State::Select => {
                    let Some(current) = self.select_min() else {
                        // Frontier exhausted without settling the target.
                        self.state = State::Finished(Outcome::NotFound);
                        continue;
                    };
                    self.unvisited[current as usize] = false;
                    self.visits.push(current);
                    let from = self.prev[current as usize];
                    if current == self.target {
                        self.path = Some(self.reconstruct_path());
                        self.state = State::Trace { leg: 0 };
                    } else {
                        self.state = State::Relax { current, edge: 0 };
                    }
                    return Step::Emit(Checkpoint::graph(CheckpointKind::Visit {
                        node: current,
                        from,
                    }));
                }
                State::Relax { current, edge } => {
                    let base = self.dist[current as usize];
                    let edges = self.graph.neighbors(current);
                    let mut improved = None;
                    for (offset, e) in edges.iter().enumerate().skip(edge) {
                        let candidate = base.saturating_add(e.weight);
                        if self.unvisited[e.to as usize]
                            && candidate < self.dist[e.to as usize]
                        {
                            improved = Some((offset, e.to, candidate));
                            break;
                        }
                    }
                    let Some((offset, to, candidate)) = improved else {
                        self.state = State::Select;
                        continue;
                    };
                    self.dist[to as usize] = candidate;
                    self.prev[to as usize] = Some(current);
                    self.state = State::Relax {
                        current,
                        edge: offset + 1,
                    };
                    return Step::Emit(Checkpoint::graph(CheckpointKind::EdgeRelax {
                        from: current,
                        to,
                        distance: candidate,
                    }));
                }
                State::Trace { leg } => {
                    let path = self.path.as_ref().unwrap();
                    if leg + 1 >= path.len() {
                        self.state = State::Finished(Outcome::Found);
                        continue;
                    }
                    let (from, to) = (path[leg], path[leg + 1]);
                    self.state = State::Trace { leg: leg + 1 };
                    return Step::Emit(Checkpoint::graph(CheckpointKind::PathTrace {
                        from,
                        to,
                    }));
                }
            }
        }
    }

    fn is_complete(&self) -> bool {
        matches!(self.state, State::Finished(_))
    }

    fn reset(&mut self) {
        let n = self.graph.node_count();
        self.dist = vec![INFINITY; n];
        self.dist[self.start as usize] = 0;
        self.prev = vec![None; n];
        self.unvisited = vec![true; n];
        self.visits.clear();
        self.path = None;
        self.state = State::Select;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(search: &mut Dijkstra) -> Outcome {
        loop {
            if let Step::Done(outcome) = search.step() {
                return outcome;
            }
        }
    }

    fn path_labels<'g>(graph: &'g Graph, search: &Dijkstra) -> Vec<&'g str> {
        search
            .path()
            .unwrap()
            .iter()
            .map(|&id| graph.label(id))
            .collect()
    }

    #[test]
    fn shortest_path_a_to_g_is_16_via_abdefg() {
        // A->B->D->E->F->G = 4+1+3+2+6.
        let graph = Graph::sample_weighted();
        let (a, g) = (graph.find("A").unwrap(), graph.find("G").unwrap());
        let mut search = Dijkstra::new(graph.clone(), a, g);
        assert_eq!(drive(&mut search), Outcome::Found);
        assert_eq!(search.distance(), Some(16));
        assert_eq!(path_labels(&graph, &search), ["A", "B", "D", "E", "F", "G"]);
    }

    #[test]
    fn start_equals_target_is_distance_zero() {
        let graph = Graph::sample_weighted();
        let a = graph.find("A").unwrap();
        let mut search = Dijkstra::new(graph, a, a);
        assert_eq!(drive(&mut search), Outcome::Found);
        assert_eq!(search.distance(), Some(0));
        assert_eq!(search.path().unwrap().len(), 1);
    }

    #[test]
    fn unreachable_target_is_not_found() {
        // Edges are directed; nothing leads back to A from G.
        let graph = Graph::sample_weighted();
        let (a, g) = (graph.find("A").unwrap(), graph.find("G").unwrap());
        let mut search = Dijkstra::new(graph, g, a);
        assert_eq!(drive(&mut search), Outcome::NotFound);
        assert_eq!(search.distance(), None);
        assert_eq!(search.path(), None);
    }

    #[test]
    fn relax_checkpoints_report_improved_distances() {
        let graph = Graph::sample_weighted();
        let (a, g) = (graph.find("A").unwrap(), graph.find("G").unwrap());
        let mut search = Dijkstra::new(graph, a, g);
        let mut first_relaxes = Vec::new();
        while first_relaxes.len() < 2 {
            match search.step() {
                Step::Emit(cp) => {
                    if let CheckpointKind::EdgeRelax { to, distance, .. } = cp.kind {
                        first_relaxes.push((to, distance));
                    }
                }
                Step::Done(_) => break,
            }
        }
        // A settles first and relaxes B to 4, C to 2.
        assert_eq!(first_relaxes, [(1, 4), (2, 2)]);
    }

    #[test]
    fn trace_follows_the_reported_path() {
        let graph = Graph::sample_weighted();
        let (a, g) = (graph.find("A").unwrap(), graph.find("G").unwrap());
        let mut search = Dijkstra::new(graph, a, g);
        let mut traces = Vec::new();
        loop {
            match search.step() {
                Step::Emit(cp) => {
                    if let CheckpointKind::PathTrace { from, to } = cp.kind {
                        traces.push((from, to));
                    }
                }
                Step::Done(_) => break,
            }
        }
        let path = search.path().unwrap();
        let legs: Vec<(NodeId, NodeId)> =
            path.windows(2).map(|w| (w[0], w[1])).collect();
        assert_eq!(traces, legs);
    }

    #[test]
    fn ties_settle_lowest_id_first() {
        // B and C both at distance 1 from A; B (lower id) must settle
        // first.
        let mut graph = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        let d = graph.add_node("D");
        graph.add_edge(a, b, 1);
        graph.add_edge(a, c, 1);
        graph.add_edge(b, d, 5);
        graph.add_edge(c, d, 5);
        let mut search = Dijkstra::new(graph, a, d);
        assert_eq!(drive(&mut search), Outcome::Found);
        assert_eq!(search.visit_order(), [a, b, c, d]);
    }
}
