//! Graph search session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use sv_engine::{AudioEmitter, GraphSearch, NullToneSink, SearchAlgorithm};
use sv_ir::{CancellationToken, CheckpointSink, Graph, Outcome};

use crate::driver::run_to_completion;
use crate::pacing::Pacing;
use crate::SessionError;

/// What a finished (or stopped) search reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: Outcome,
    /// Node labels in visitation order.
    pub visited: Vec<String>,
    /// Shortest-path labels (Dijkstra, when found).
    pub path: Option<Vec<String>>,
    /// Shortest distance (Dijkstra, when found).
    pub distance: Option<u32>,
    /// Human-readable summary for the message area.
    pub message: String,
}

struct SearchRun {
    token: CancellationToken,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<SearchReport>>,
}

/// Runs one traversal over a graph on its own thread.
pub struct SearchSession {
    graph: Graph,
    algorithm: SearchAlgorithm,
    pacing: Pacing,
    run: Option<SearchRun>,
    report: Option<SearchReport>,
}

impl SearchSession {
    pub fn new(graph: Graph, algorithm: SearchAlgorithm) -> Self {
        Self {
            graph,
            algorithm,
            pacing: Pacing::search_default(algorithm),
            run: None,
            report: None,
        }
    }

    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn report(&self) -> Option<&SearchReport> {
        self.report.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|r| !r.finished.load(Ordering::Relaxed))
    }

    /// Validate the node labels and start the traversal.
    ///
    /// Rejected input (empty or unknown labels) leaves no run behind.
    pub fn start<CS>(
        &mut self,
        start_label: &str,
        target_label: &str,
        sink: CS,
    ) -> Result<(), SessionError>
    where
        CS: CheckpointSink + Send + 'static,
    {
        if start_label.is_empty() || target_label.is_empty() {
            return Err(SessionError::MissingTarget);
        }
        let start = self
            .graph
            .find(start_label)
            .ok_or_else(|| SessionError::UnknownNode(start_label.into()))?;
        let target = self
            .graph
            .find(target_label)
            .ok_or_else(|| SessionError::UnknownNode(target_label.into()))?;

        self.stop();
        let token = CancellationToken::new();
        let finished = Arc::new(AtomicBool::new(false));

        let graph = self.graph.clone();
        let algorithm = self.algorithm;
        let pacing = self.pacing;
        let target_name = String::from(target_label);
        let run_token = token.clone();
        let run_finished = finished.clone();
        let mut sink = sink;

        let thread = std::thread::spawn(move || {
            let mut search = GraphSearch::new(algorithm, graph.clone(), start, target);
            // Traversals are silent; the muted emitter keeps the
            // driver shape uniform.
            let mut emitter = AudioEmitter::new(NullToneSink);
            let outcome = run_to_completion(
                &mut search,
                &mut sink,
                &mut emitter,
                &run_token,
                &pacing,
                0,
            );
            let report = build_report(&graph, algorithm, &search, outcome, &target_name);
            run_finished.store(true, Ordering::Relaxed);
            report
        });

        self.run = Some(SearchRun {
            token,
            finished,
            thread: Some(thread),
        });
        Ok(())
    }

    /// Request cancellation and collect the report.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.token.cancel();
            if let Some(thread) = run.thread {
                if let Ok(report) = thread.join() {
                    self.report = Some(report);
                }
            }
        }
    }

    /// Block until the traversal ends, returning its report.
    pub fn wait(&mut self) -> Option<&SearchReport> {
        if let Some(run) = self.run.take() {
            if let Some(thread) = run.thread {
                if let Ok(report) = thread.join() {
                    self.report = Some(report);
                }
            }
        }
        self.report.as_ref()
    }
}

fn build_report(
    graph: &Graph,
    algorithm: SearchAlgorithm,
    search: &GraphSearch,
    outcome: Outcome,
    target_label: &str,
) -> SearchReport {
    let visited = search
        .visit_order()
        .iter()
        .map(|&id| String::from(graph.label(id)))
        .collect();
    let path: Option<Vec<String>> = search
        .path()
        .map(|ids| ids.iter().map(|&id| String::from(graph.label(id))).collect());
    let distance = search.distance();

    let message = match (outcome, algorithm) {
        (Outcome::Cancelled, _) => String::from("Stopped by user."),
        (Outcome::Found, SearchAlgorithm::Dijkstra) => {
            let path = path.as_ref().expect("found implies path");
            format!(
                "Shortest path: {} (Distance: {})",
                path.join(" \u{2192} "),
                distance.expect("found implies distance")
            )
        }
        (Outcome::Found, _) => format!("Found {}!", target_label),
        (_, SearchAlgorithm::Dijkstra) => format!("No path found to {}", target_label),
        _ => String::from("Target not found."),
    };

    SearchReport {
        outcome,
        visited,
        path,
        distance,
        message,
    }
}
