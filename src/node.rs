use crate::data::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a decision tree: either a leaf or a decision on one attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Terminal node carrying a class label.
    Leaf(LeafNode),
    /// Internal node testing one attribute.
    Decision(DecisionNode),
}

/// Terminal node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Predicted class label.
    pub label: Value,
    /// Number of training records that reached this leaf.
    pub n_records: usize,
}

/// Internal node with one branch per observed value of `attribute`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    /// Attribute tested by this node.
    pub attribute: String,
    /// Branches in the order their values were first observed.
    pub branches: Vec<Branch>,
    /// Number of training records that reached this node.
    pub n_records: usize,
}

/// One outgoing edge of a [`DecisionNode`].
///
/// `child` is `None` when no training record was left for `value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub value: Value,
    pub child: Option<Node>,
}

impl DecisionNode {
    /// Get the branch for a value, if it was observed in training.
    pub fn branch(&self, value: &Value) -> Option<&Branch> {
        self.branches.iter().find(|b| &b.value == value)
    }
}

impl Node {
    pub fn leaf(label: Value, n_records: usize) -> Self {
        Node::Leaf(LeafNode { label, n_records })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of training records that reached this node.
    pub fn n_records(&self) -> usize {
        match self {
            Node::Leaf(l) => l.n_records,
            Node::Decision(d) => d.n_records,
        }
    }

    /// Number of decision levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Decision(d) => {
                1 + d
                    .branches
                    .iter()
                    .filter_map(|b| b.child.as_ref())
                    .map(|c| c.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Decision(d) => d.branches.iter().filter_map(|b| b.child.as_ref()).map(|c| c.n_leaves()).sum(),
        }
    }

    pub fn n_nodes(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Decision(d) => {
                1 + d
                    .branches
                    .iter()
                    .filter_map(|b| b.child.as_ref())
                    .map(|c| c.n_nodes())
                    .sum::<usize>()
            }
        }
    }

    /// Write this subtree, indented four spaces per level.
    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter, level: usize) -> fmt::Result {
        let pad = "    ".repeat(level);
        match self {
            Node::Leaf(l) => writeln!(f, "{}Leaf: {}", pad, l.label),
            Node::Decision(d) => {
                writeln!(f, "{}Attribute: {}", pad, d.attribute)?;
                for b in d.branches.iter() {
                    writeln!(f, "{}    Value: {}", pad, b.value)?;
                    match &b.child {
                        Some(child) => child.write_indented(f, level + 2)?,
                        None => writeln!(f, "{}        (no data)", pad)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
