//! sonaviz CLI — watch and hear algorithms run in the terminal.
//!
//! Usage:
//!   sonaviz sort <bubble|quick|merge> [--size N] [--seed N] [--fast] [--mute] [--volume V] [--no-finale]
//!   sonaviz compare <algo> <algo> [--size N] [--seed N] [--fast]
//!   sonaviz search <bfs|dfs|dijkstra> [--start A] --target G [--fast]
//!   sonaviz find <linear|binary> --target N [--size N] [--seed N]

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use sv_audio::AudioHandle;
use sv_session::{
    run_to_completion, ArraySearch, ArraySearchAlgorithm, AudioEmitter, CancellationToken,
    Checkpoint, CheckpointKind, CheckpointSink, ComparisonSession, Dataset, DatasetGenerator,
    Graph, NullToneSink, Outcome, Pacing, SearchAlgorithm, SearchSession, SessionError,
    SortAlgorithm, SortConfig, SortSession, ToneSink,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).cloned().unwrap_or_default();
    let result = match command.as_str() {
        "sort" => cmd_sort(&args),
        "compare" => cmd_compare(&args),
        "search" => cmd_search(&args),
        "find" => cmd_find(&args),
        _ => {
            usage();
            std::process::exit(1);
        }
    };
    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn usage() {
    eprintln!("Usage:");
    eprintln!("  sonaviz sort <bubble|quick|merge> [--size N] [--seed N] [--fast] [--mute] [--volume V] [--no-finale]");
    eprintln!("  sonaviz compare <algo> <algo> [--size N] [--seed N] [--fast]");
    eprintln!("  sonaviz search <bfs|dfs|dijkstra> [--start A] --target G [--fast]");
    eprintln!("  sonaviz find <linear|binary> --target N [--size N] [--seed N]");
}

// --- Argument helpers ---

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn numeric_flag<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    flag_value(args, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn default_seed(args: &[String]) -> u64 {
    flag_value(args, "--seed")
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        })
}

/// Start the audio thread unless muted; fall back to silence when the
/// device is unavailable.
fn audio_handle(args: &[String]) -> Option<AudioHandle> {
    if has_flag(args, "--mute") || has_flag(args, "--fast") {
        return None;
    }
    match AudioHandle::start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Audio disabled: {}", err);
            None
        }
    }
}

fn tone_sink(audio: &Option<AudioHandle>) -> Box<dyn ToneSink + Send> {
    match audio {
        Some(handle) => Box::new(handle.sink()),
        None => Box::new(NullToneSink),
    }
}

// --- Checkpoint rendering ---

/// Prints each checkpoint as a single status line.
struct TextSink {
    label: &'static str,
}

impl TextSink {
    fn new(label: &'static str) -> Self {
        Self { label }
    }
}

fn describe(checkpoint: &Checkpoint) -> String {
    match &checkpoint.kind {
        CheckpointKind::Compare { a, b, .. } => format!("compare {} ~ {}", a, b),
        CheckpointKind::Swap { a, b } => format!("swap    {} x {}", a, b),
        CheckpointKind::Assign { index, value } => format!("write   {} = {}", index, value),
        CheckpointKind::MarkSorted { index } => format!("sorted  {}", index),
        CheckpointKind::PivotSelect { index } => format!("pivot   {}", index),
        CheckpointKind::Probe { index } => format!("probe   {}", index),
        CheckpointKind::Bisect { low, high, mid } => {
            format!("bisect  {}..{} mid {}", low, high, mid)
        }
        CheckpointKind::Highlight { index } => format!("note    {}", index),
        CheckpointKind::Visit { node, .. } => format!("visit   node {}", node),
        CheckpointKind::EdgeRelax { from, to, distance } => {
            format!("relax   {} -> {} = {}", from, to, distance)
        }
        CheckpointKind::PathTrace { from, to } => format!("path    {} -> {}", from, to),
    }
}

impl CheckpointSink for TextSink {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) {
        print!("\r{}{}          ", self.label, describe(checkpoint));
        let _ = std::io::stdout().flush();
    }
}

// --- Commands ---

fn cmd_sort(args: &[String]) -> Result<(), SessionError> {
    let name = args.get(2).cloned().unwrap_or_default();
    let algorithm =
        SortAlgorithm::parse(&name).ok_or(SessionError::UnknownAlgorithm(name))?;

    let mut config = SortConfig::new(algorithm, numeric_flag(args, "--size", 50));
    config.seed = default_seed(args);
    config.musical_finale = !has_flag(args, "--no-finale");
    if has_flag(args, "--fast") {
        config.pacing = Pacing::zero();
    }

    let mut session = SortSession::new(config)?;
    println!("Algorithm: {}", algorithm.label());
    println!("Size:      {}", session.dataset().len());
    println!();

    let audio = audio_handle(args);
    let emitter = AudioEmitter::new(tone_sink(&audio));
    emitter
        .controls()
        .set_volume(numeric_flag(args, "--volume", 0.1f32));

    session.start(TextSink::new(""), emitter);
    let outcome = session.wait();

    println!();
    match outcome {
        Some(Outcome::Completed) => println!("Sorting Complete!"),
        _ => println!("Stopped by user."),
    }
    Ok(())
}

fn cmd_compare(args: &[String]) -> Result<(), SessionError> {
    let first_name = args.get(2).cloned().unwrap_or_default();
    let second_name = args.get(3).cloned().unwrap_or_default();
    let first =
        SortAlgorithm::parse(&first_name).ok_or(SessionError::UnknownAlgorithm(first_name))?;
    let second =
        SortAlgorithm::parse(&second_name).ok_or(SessionError::UnknownAlgorithm(second_name))?;

    let mut session = ComparisonSession::new(first, second, numeric_flag(args, "--size", 50))?;
    if has_flag(args, "--fast") {
        session.set_pacing(Pacing::zero(), Pacing::zero());
    }
    session.generate(default_seed(args));

    println!("Comparing: {} vs {}", first.label(), second.label());
    println!();

    // Comparison mode suppresses audio anyway; don't spin up a device.
    session.start(
        TextSink::new("[1] "),
        TextSink::new("[2] "),
        NullToneSink,
        NullToneSink,
    );
    let outcomes = session.wait();

    println!();
    match outcomes {
        Some((Outcome::Completed, Outcome::Completed)) => println!("Comparison complete!"),
        _ => println!("Comparison stopped."),
    }
    Ok(())
}

fn cmd_search(args: &[String]) -> Result<(), SessionError> {
    let name = args.get(2).cloned().unwrap_or_default();
    let algorithm =
        SearchAlgorithm::parse(&name).ok_or(SessionError::UnknownAlgorithm(name))?;

    let graph = match algorithm {
        SearchAlgorithm::Dijkstra => Graph::sample_weighted(),
        _ => Graph::sample_tree(),
    };
    let start = flag_value(args, "--start")
        .unwrap_or_else(|| String::from("A"))
        .to_uppercase();
    let target = flag_value(args, "--target")
        .ok_or(SessionError::MissingTarget)?
        .to_uppercase();

    let mut session = SearchSession::new(graph, algorithm);
    if has_flag(args, "--fast") {
        session.set_pacing(Pacing::zero());
    }

    println!("Algorithm: {}", algorithm.label());
    println!("Start:     {}", start);
    println!("Target:    {}", target);
    println!();

    session.start(&start, &target, TextSink::new(""))?;
    if let Some(report) = session.wait() {
        println!();
        println!("Visited:   {}", report.visited.join(", "));
        println!("{}", report.message);
    }
    Ok(())
}

fn cmd_find(args: &[String]) -> Result<(), SessionError> {
    let name = args.get(2).cloned().unwrap_or_default();
    let algorithm =
        ArraySearchAlgorithm::parse(&name).ok_or(SessionError::UnknownAlgorithm(name))?;
    let target: u32 = flag_value(args, "--target")
        .and_then(|v| v.parse().ok())
        .ok_or(SessionError::MissingTarget)?;

    let size = numeric_flag(args, "--size", 50);
    let mut values = DatasetGenerator::new(default_seed(args))
        .generate(size)
        .into_values();
    // Binary search needs sorted input.
    if algorithm == ArraySearchAlgorithm::Binary {
        values.sort_unstable();
    }
    let data = Dataset::from_values(values);

    let mut search = ArraySearch::new(algorithm, data, target);
    let mut sink = TextSink::new("");
    let mut emitter = AudioEmitter::new(NullToneSink);
    let token = CancellationToken::new();
    let pacing = if has_flag(args, "--fast") {
        Pacing::zero()
    } else {
        let mut pacing = Pacing::zero();
        pacing.probe_ms = 150;
        pacing
    };

    let outcome = run_to_completion(&mut search, &mut sink, &mut emitter, &token, &pacing, 0);
    println!();
    match (outcome, search.found_index()) {
        (Outcome::Found, Some(index)) => println!("Found {} at index {}!", target, index),
        _ => println!("Target not found."),
    }
    Ok(())
}
