mod node;

// Modules
pub mod config;
pub mod criterion;
pub mod data;
pub mod errors;
pub mod observer;
pub mod splitter;
pub mod tree;

// Individual classes, and functions
pub use config::{TreeConfig, TreeIO};
pub use criterion::{entropy, information_gain};
pub use data::{record, Dataset, Record, Value};
pub use errors::Id3Error;
pub use node::{Branch, DecisionNode, LeafNode, Node};
pub use observer::{BuildEvent, EventRecorder, LeafReason, LogObserver, NoopObserver, TreeObserver};
pub use splitter::best_attribute;
pub use tree::predict::{PathStep, Prediction};
pub use tree::tree::{DecisionTree, TreeBuilder};
