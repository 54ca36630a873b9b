//! Observer
//!
//! Build-time events emitted by the split evaluator and the tree builder,
//! and the hook that receives them.
use crate::data::Value;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Why a leaf was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafReason {
    /// Every record shares one label.
    Pure,
    /// No attributes were left; the most frequent label was used.
    Majority,
}

/// Something that happened while growing a tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BuildEvent {
    /// Information gain of one candidate attribute.
    GainEvaluated {
        attribute: String,
        rows: usize,
        baseline: f64,
        weighted: f64,
        gain: f64,
    },
    /// The attribute selector settled on a split.
    AttributeSelected { attribute: String, gain: f64, depth: usize },
    /// A leaf node was created.
    LeafCreated {
        label: Value,
        rows: usize,
        depth: usize,
        reason: LeafReason,
    },
    /// A decision node was created.
    DecisionNodeCreated {
        attribute: String,
        branches: usize,
        rows: usize,
        depth: usize,
    },
    /// A branch value matched no records.
    EmptySubset { attribute: String, value: Value, depth: usize },
}

/// Receives [`BuildEvent`]s.
///
/// Sibling subtrees may be grown on several threads, so observers must be `Sync`.
pub trait TreeObserver: Send + Sync {
    /// Called once per event.
    fn on_event(&self, event: &BuildEvent);
}

/// Forwards events to the `log` facade. Used by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl TreeObserver for LogObserver {
    fn on_event(&self, event: &BuildEvent) {
        match event {
            BuildEvent::GainEvaluated {
                attribute,
                rows,
                baseline,
                weighted,
                gain,
            } => trace!(
                "Gain for {} over {} rows: entropy={}, weighted={}, gain={}",
                attribute,
                rows,
                baseline,
                weighted,
                gain
            ),
            BuildEvent::AttributeSelected { attribute, gain, depth } => {
                debug!("Best attribute at depth {}: {} with gain {}", depth, attribute, gain)
            }
            BuildEvent::LeafCreated {
                label,
                rows,
                depth,
                reason,
            } => debug!("{:?} leaf at depth {} with label {} ({} rows)", reason, depth, label, rows),
            BuildEvent::DecisionNodeCreated {
                attribute,
                branches,
                rows,
                depth,
            } => debug!(
                "Decision node on {} at depth {}: {} branches, {} rows",
                attribute, depth, branches, rows
            ),
            BuildEvent::EmptySubset { attribute, value, depth } => {
                warn!("No records left for {} = {} at depth {}.", attribute, value, depth)
            }
        }
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TreeObserver for NoopObserver {
    fn on_event(&self, _event: &BuildEvent) {}
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<BuildEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far.
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl TreeObserver for EventRecorder {
    fn on_event(&self, event: &BuildEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}
