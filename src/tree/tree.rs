use crate::config::{TreeConfig, TreeIO};
use crate::data::{Dataset, Value};
use crate::errors::Id3Error;
use crate::node::{Branch, DecisionNode, Node};
use crate::observer::{BuildEvent, LeafReason, LogObserver, TreeObserver};
use crate::splitter::best_attribute_rows;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Instant;

/// A fitted ID3 decision tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: Node,
    /// Name of the class label attribute.
    pub target: String,
    /// Non-target attributes available during training.
    pub attributes: Vec<String>,
}

impl DecisionTree {
    /// Fit a tree with the default [`TreeBuilder`].
    ///
    /// Returns `Ok(None)` for a dataset without records.
    pub fn fit(dataset: &Dataset) -> Result<Option<Self>, Id3Error> {
        TreeBuilder::default().build(dataset)
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}

impl TreeIO for DecisionTree {}

/// Grows [`DecisionTree`]s with the ID3 algorithm.
#[derive(Clone)]
pub struct TreeBuilder {
    pub cfg: TreeConfig,
    pub(crate) observer: Arc<dyn TreeObserver>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        TreeBuilder {
            cfg: TreeConfig::default(),
            observer: Arc::new(LogObserver),
        }
    }
}

impl TreeBuilder {
    /// Create a builder from a configuration.
    ///
    /// * `cfg` - See [`TreeConfig`].
    pub fn new(cfg: TreeConfig) -> Result<Self, Id3Error> {
        let builder = TreeBuilder {
            cfg,
            observer: Arc::new(LogObserver),
        };
        builder.validate_parameters()?;
        Ok(builder)
    }

    pub fn validate_parameters(&self) -> Result<(), Id3Error> {
        if self.cfg.num_threads == Some(0) {
            return Err(Id3Error::InvalidParameter(
                "num_threads".to_string(),
                "a positive number".to_string(),
                "0".to_string(),
            ));
        }
        Ok(())
    }

    /// Grow a tree on `dataset`.
    ///
    /// Returns `Ok(None)` when the dataset has no records.
    pub fn build(&self, dataset: &Dataset) -> Result<Option<DecisionTree>, Id3Error> {
        self.validate_parameters()?;
        let start = Instant::now();

        let grower = Grower {
            dataset,
            observer: self.observer.as_ref(),
            parallel: self.cfg.parallel,
        };
        let attributes: Vec<&str> = dataset.attributes().iter().map(|a| a.as_str()).collect();

        let root = if self.cfg.parallel {
            let mut pool_builder = rayon::ThreadPoolBuilder::new();
            if let Some(n) = self.cfg.num_threads {
                pool_builder = pool_builder.num_threads(n);
            }
            let pool = pool_builder.build().map_err(|e| {
                Id3Error::InvalidParameter("num_threads".to_string(), "a usable thread count".to_string(), e.to_string())
            })?;
            pool.install(|| grower.grow(dataset.index(), attributes, 0))?
        } else {
            grower.grow(dataset.index(), attributes, 0)?
        };

        match root {
            None => {
                warn!("No records to grow a tree from.");
                Ok(None)
            }
            Some(root) => {
                let tree = DecisionTree {
                    root,
                    target: dataset.target().to_string(),
                    attributes: dataset.attributes().to_vec(),
                };
                info!(
                    "Grew tree for {} on {} records: depth {}, {} leaves, {} secs.",
                    tree.target,
                    dataset.len(),
                    tree.depth(),
                    tree.n_leaves(),
                    start.elapsed().as_secs_f32()
                );
                Ok(Some(tree))
            }
        }
    }
}

struct Grower<'a> {
    dataset: &'a Dataset,
    observer: &'a dyn TreeObserver,
    parallel: bool,
}

impl<'a> Grower<'a> {
    /// Grow the subtree over the records in `index`, splitting only on `attributes`.
    fn grow(&self, index: Vec<usize>, attributes: Vec<&'a str>, depth: usize) -> Result<Option<Node>, Id3Error> {
        if index.is_empty() {
            return Ok(None);
        }

        let counts = self.dataset.label_counts(&index);
        if counts.len() == 1 {
            return Ok(Some(self.leaf(counts[0].0.clone(), index.len(), depth, LeafReason::Pure)));
        }
        if attributes.is_empty() {
            let label = majority_label(&counts).clone();
            return Ok(Some(self.leaf(label, index.len(), depth, LeafReason::Majority)));
        }

        let (attribute, gain) = best_attribute_rows(self.dataset, &index, &attributes, self.observer)?;
        self.observer.on_event(&BuildEvent::AttributeSelected {
            attribute: attribute.to_string(),
            gain,
            depth,
        });

        let remaining: Vec<&'a str> = attributes.iter().copied().filter(|a| *a != attribute).collect();
        let partitions = self.dataset.partition(&index, attribute);

        // Children are collected in partition order either way.
        let children: Vec<(&Value, Option<Node>)> = if self.parallel {
            partitions
                .into_par_iter()
                .map(|(value, rows)| self.grow(rows, remaining.clone(), depth + 1).map(|c| (value, c)))
                .collect::<Result<Vec<_>, Id3Error>>()?
        } else {
            partitions
                .into_iter()
                .map(|(value, rows)| self.grow(rows, remaining.clone(), depth + 1).map(|c| (value, c)))
                .collect::<Result<Vec<_>, Id3Error>>()?
        };

        let branches: Vec<Branch> = children
            .into_iter()
            .map(|(value, child)| {
                if child.is_none() {
                    self.observer.on_event(&BuildEvent::EmptySubset {
                        attribute: attribute.to_string(),
                        value: value.clone(),
                        depth: depth + 1,
                    });
                }
                Branch {
                    value: value.clone(),
                    child,
                }
            })
            .collect();

        self.observer.on_event(&BuildEvent::DecisionNodeCreated {
            attribute: attribute.to_string(),
            branches: branches.len(),
            rows: index.len(),
            depth,
        });
        Ok(Some(Node::Decision(DecisionNode {
            attribute: attribute.to_string(),
            branches,
            n_records: index.len(),
        })))
    }

    fn leaf(&self, label: Value, rows: usize, depth: usize, reason: LeafReason) -> Node {
        self.observer.on_event(&BuildEvent::LeafCreated {
            label: label.clone(),
            rows,
            depth,
            reason,
        });
        Node::leaf(label, rows)
    }
}

/// Most frequent label; on a tie the label seen first wins.
fn majority_label<'v>(counts: &[(&'v Value, usize)]) -> &'v Value {
    let mut best = counts[0];
    for &(label, count) in &counts[1..] {
        if count > best.1 {
            best = (label, count);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_label_tie_keeps_first() {
        let (a, b, c) = (Value::from("a"), Value::from("b"), Value::from("c"));
        assert_eq!(majority_label(&[(&a, 2), (&b, 3), (&c, 3)]), &b);
        assert_eq!(majority_label(&[(&c, 1), (&a, 1)]), &c);
        assert_eq!(majority_label(&[(&a, 1)]), &a);
    }

    #[test]
    fn test_validate_parameters() {
        let cfg = TreeConfig {
            parallel: true,
            num_threads: Some(0),
        };
        assert!(matches!(TreeBuilder::new(cfg), Err(Id3Error::InvalidParameter(..))));
        assert!(TreeBuilder::new(TreeConfig::default()).is_ok());
    }
}
