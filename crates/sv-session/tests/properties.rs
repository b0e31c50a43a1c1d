//! End-to-end properties of the session layer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sv_session::{
    run_to_completion, AudioEmitter, CancellationToken, Checkpoint, CheckpointKind,
    CheckpointSink, CollectSink, ComparisonSession, Dataset, DatasetGenerator, Graph,
    GraphSearch, NullSink, NullToneSink, Outcome, Pacing, SearchAlgorithm, SearchSession,
    Side, SortAlgorithm, SortConfig, SortRunner, SortSession, Step, Stepper, ToneCommand,
    ToneSink,
};

/// Checkpoint sink that can cross a thread boundary.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<Checkpoint>>>);

impl SharedSink {
    fn checkpoints(&self) -> Vec<Checkpoint> {
        self.0.lock().unwrap().clone()
    }
}

impl CheckpointSink for SharedSink {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        self.0.lock().unwrap().push(checkpoint.clone());
    }
}

/// Tone sink that counts scheduled tones across threads.
#[derive(Clone, Default)]
struct CountingToneSink(Arc<Mutex<usize>>);

impl CountingToneSink {
    fn count(&self) -> usize {
        *self.0.lock().unwrap()
    }
}

impl ToneSink for CountingToneSink {
    fn schedule(&mut self, _tone: ToneCommand) {
        *self.0.lock().unwrap() += 1;
    }
}

fn run_sort(algorithm: SortAlgorithm, values: Vec<u32>) -> (Outcome, Vec<u32>, Vec<Checkpoint>) {
    let mut runner = SortRunner::new(algorithm, Dataset::from_values(values));
    let mut sink = CollectSink::new();
    let mut emitter = AudioEmitter::new(NullToneSink);
    let token = CancellationToken::new();
    let max = runner.dataset().max();
    let outcome = run_to_completion(
        &mut runner,
        &mut sink,
        &mut emitter,
        &token,
        &Pacing::zero(),
        max,
    );
    (
        outcome,
        runner.into_dataset().into_values(),
        sink.checkpoints,
    )
}

fn assert_permutation(actual: &[u32], original: &[u32]) {
    let mut a = actual.to_vec();
    let mut b = original.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b, "values are not a permutation of the original");
}

fn sample_inputs() -> Vec<Vec<u32>> {
    let mut inputs = vec![
        vec![],
        vec![42],
        vec![1, 2, 3, 4, 5, 6, 7, 8],
        vec![8, 7, 6, 5, 4, 3, 2, 1],
        vec![5, 5, 5, 5, 5],
        vec![2, 1, 2, 1, 2, 1],
    ];
    for seed in [3, 17, 99] {
        inputs.push(
            DatasetGenerator::new(seed)
                .generate(60)
                .into_values(),
        );
    }
    inputs
}

// === Sort correctness ===

#[test]
fn completed_sorts_are_sorted_permutations() {
    for algorithm in [
        SortAlgorithm::Bubble,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
    ] {
        for input in sample_inputs() {
            let (outcome, sorted, _) = run_sort(algorithm, input.clone());
            assert_eq!(outcome, Outcome::Completed);
            assert!(
                sorted.windows(2).all(|w| w[0] <= w[1]),
                "{:?} left {:?} unsorted",
                algorithm,
                sorted
            );
            assert_permutation(&sorted, &input);
        }
    }
}

#[test]
fn all_algorithms_agree_on_the_final_order() {
    for input in sample_inputs() {
        let (_, bubble, _) = run_sort(SortAlgorithm::Bubble, input.clone());
        let (_, quick, _) = run_sort(SortAlgorithm::Quick, input.clone());
        let (_, merge, _) = run_sort(SortAlgorithm::Merge, input);
        assert_eq!(bubble, quick);
        assert_eq!(bubble, merge);
    }
}

#[test]
fn final_checkpoint_snapshot_is_a_permutation() {
    let input = DatasetGenerator::new(5).generate(30).into_values();
    for algorithm in [
        SortAlgorithm::Bubble,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
    ] {
        let (_, _, checkpoints) = run_sort(algorithm, input.clone());
        let last = checkpoints.last().unwrap();
        assert_permutation(&last.values, &input);
    }
}

// === Cancellation ===

#[test]
fn cancelled_sort_reports_cancelled_with_intact_values() {
    let mut config = SortConfig::new(SortAlgorithm::Bubble, 50);
    config.pacing = Pacing::zero();
    config.pacing.compare_ms = 10;
    config.musical_finale = false;
    let mut session = SortSession::new(config).unwrap();
    let original = session.dataset().values().to_vec();

    session.start(NullSink, AudioEmitter::new(NullToneSink));
    std::thread::sleep(Duration::from_millis(50));
    session.stop();

    assert_eq!(session.outcome(), Some(Outcome::Cancelled));
    assert_permutation(session.dataset().values(), &original);
    assert!(!session.dataset().is_sorted());
}

// === Dijkstra against a reference ===

const INF: u64 = u64::MAX / 4;

fn reference_distances(graph: &Graph) -> Vec<Vec<u64>> {
    let n = graph.node_count();
    let mut dist = vec![vec![INF; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0;
    }
    for from in 0..n {
        for edge in graph.neighbors(from as u16) {
            let to = edge.to as usize;
            dist[from][to] = dist[from][to].min(edge.weight as u64);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    dist
}

#[test]
fn dijkstra_matches_reference_for_every_pair() {
    let graph = Graph::sample_weighted();
    let reference = reference_distances(&graph);
    for start in 0..graph.node_count() as u16 {
        for target in 0..graph.node_count() as u16 {
            let mut search =
                GraphSearch::new(SearchAlgorithm::Dijkstra, graph.clone(), start, target);
            let outcome = loop {
                if let Step::Done(outcome) = search.step() {
                    break outcome;
                }
            };
            let expected = reference[start as usize][target as usize];
            if expected == INF {
                assert_eq!(outcome, Outcome::NotFound);
                assert_eq!(search.distance(), None);
            } else {
                assert_eq!(outcome, Outcome::Found);
                assert_eq!(search.distance(), Some(expected as u32));
            }
        }
    }
}

#[test]
fn dijkstra_a_to_g_is_16() {
    let mut session = SearchSession::new(Graph::sample_weighted(), SearchAlgorithm::Dijkstra);
    session.set_pacing(Pacing::zero());
    session.start("A", "G", NullSink).unwrap();
    let report = session.wait().unwrap();
    assert_eq!(report.distance, Some(16));
    assert_eq!(
        report.path.as_deref().unwrap(),
        ["A", "B", "D", "E", "F", "G"]
    );
}

// === Traversal orders ===

#[test]
fn bfs_visits_in_level_order_and_stops_at_target() {
    let mut session = SearchSession::new(Graph::sample_tree(), SearchAlgorithm::Bfs);
    session.set_pacing(Pacing::zero());
    session.start("A", "E", NullSink).unwrap();
    let report = session.wait().unwrap();
    assert_eq!(report.outcome, Outcome::Found);
    assert_eq!(report.visited, ["A", "B", "C", "D", "E"]);
}

#[test]
fn dfs_visits_in_pre_order() {
    let mut session = SearchSession::new(Graph::sample_tree(), SearchAlgorithm::Dfs);
    session.set_pacing(Pacing::zero());
    session.start("A", "G", NullSink).unwrap();
    let report = session.wait().unwrap();
    assert_eq!(report.visited, ["A", "B", "D", "E", "C", "F", "G"]);
}

// === Comparison sessions ===

#[test]
fn comparison_of_quick_and_merge_sorts_both_sides() {
    let mut session =
        ComparisonSession::new(SortAlgorithm::Quick, SortAlgorithm::Merge, 50).unwrap();
    session.set_pacing(Pacing::zero(), Pacing::zero());
    session.generate(11);
    let first_sink = SharedSink::default();
    let second_sink = SharedSink::default();
    session.start(
        first_sink.clone(),
        second_sink.clone(),
        NullToneSink,
        NullToneSink,
    );
    let (first, second) = session.wait().unwrap();
    assert_eq!(first, Outcome::Completed);
    assert_eq!(second, Outcome::Completed);

    let (a, b) = session.datasets().unwrap();
    assert!(a.is_sorted());
    assert!(b.is_sorted());
    assert!(!first_sink.checkpoints().is_empty());
    assert!(!second_sink.checkpoints().is_empty());
}

#[test]
fn cancelling_one_side_leaves_the_other_running_to_completion() {
    let mut session =
        ComparisonSession::new(SortAlgorithm::Bubble, SortAlgorithm::Quick, 50).unwrap();
    let mut slow = Pacing::zero();
    slow.compare_ms = 20;
    session.set_pacing(slow, Pacing::zero());
    session.start(NullSink, NullSink, NullToneSink, NullToneSink);
    session.cancel_side(Side::First);
    let (first, second) = session.wait().unwrap();
    assert_eq!(first, Outcome::Cancelled);
    assert_eq!(second, Outcome::Completed);

    let (a, b) = session.datasets().unwrap();
    assert!(b.is_sorted());
    // The cancelled side is untouched or partially sorted, but never
    // corrupted.
    let mut sorted = a.values().to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, b.values());
}

// === Audio gating ===

#[test]
fn disabled_audio_schedules_no_tones_for_a_whole_run() {
    let mut config = SortConfig::new(SortAlgorithm::Quick, 20);
    config.pacing = Pacing::zero();
    config.musical_finale = true;
    let mut session = SortSession::new(config).unwrap();

    let tones = CountingToneSink::default();
    let emitter = AudioEmitter::new(tones.clone());
    emitter.controls().set_enabled(false);
    session.start(NullSink, emitter);
    assert_eq!(session.wait(), Some(Outcome::Completed));
    assert_eq!(tones.count(), 0);
}

#[test]
fn musical_finale_highlights_every_bar_and_plays_tones() {
    let mut config = SortConfig::new(SortAlgorithm::Merge, 10);
    config.pacing = Pacing::zero();
    config.musical_finale = true;
    let mut session = SortSession::new(config).unwrap();

    let sink = SharedSink::default();
    let tones = CountingToneSink::default();
    session.start(sink.clone(), AudioEmitter::new(tones.clone()));
    session.wait();

    let highlights = sink
        .checkpoints()
        .iter()
        .filter(|cp| matches!(cp.kind, CheckpointKind::Highlight { .. }))
        .count();
    assert_eq!(highlights, 10);
    // Per-bar sequence tones plus the final chord, plus the run's own
    // comparison/assign tones.
    assert!(tones.count() > 20);
}
