//! Core data model for the sonaviz algorithm visualizer.
//!
//! This crate defines the types shared across the whole system: the
//! dataset being sorted, the checkpoints the runners emit, the graph
//! used by the traversal algorithms, and the cooperative cancellation
//! token. The engine produces these types, the sessions and front ends
//! consume them.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod cancel;
mod checkpoint;
mod dataset;
mod graph;
mod outcome;
mod sink;

pub use cancel::CancellationToken;
pub use checkpoint::{Checkpoint, CheckpointKind};
pub use dataset::{Dataset, DatasetGenerator, VALUE_FLOOR, VALUE_SPAN};
pub use graph::{Edge, Graph, Node, NodeId};
pub use outcome::Outcome;
pub use sink::{CheckpointSink, CollectSink, NullSink};
