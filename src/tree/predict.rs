use super::tree::DecisionTree;
use crate::data::{Record, Value};
use crate::errors::Id3Error;
use crate::node::Node;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of classifying one record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Prediction {
    /// The record reached a leaf.
    Label(Value),
    /// The record carries a value with no branch in the tree.
    /// `value` is `None` when the record lacks the attribute altogether.
    Unknown { attribute: String, value: Option<Value> },
}

impl Prediction {
    /// Predicted label, if any.
    pub fn label(&self) -> Option<&Value> {
        match self {
            Prediction::Label(l) => Some(l),
            Prediction::Unknown { .. } => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Prediction::Unknown { .. })
    }

    /// Turn an unknown prediction into [`Id3Error::UnknownCategoryValue`].
    pub fn into_result(self) -> Result<Value, Id3Error> {
        match self {
            Prediction::Label(l) => Ok(l),
            Prediction::Unknown { attribute, value } => Err(Id3Error::UnknownCategoryValue {
                attribute,
                value: value.map(|v| v.to_string()),
            }),
        }
    }
}

/// One decision taken while traversing the tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    /// Attribute tested.
    pub attribute: String,
    /// Value found in the record.
    pub value: Option<Value>,
    /// Whether the tree had a subtree for that value.
    pub matched: bool,
}

impl DecisionTree {
    /// Classify one record.
    ///
    /// Values never seen in training for the branch being tested give
    /// [`Prediction::Unknown`] rather than an error.
    pub fn predict(&self, record: &Record) -> Prediction {
        self.traverse(record, |_| {})
    }

    /// Classify one record, reporting unseen values as [`Id3Error::UnknownCategoryValue`].
    pub fn predict_label(&self, record: &Record) -> Result<Value, Id3Error> {
        self.predict(record).into_result()
    }

    /// Classify one record and return the decisions taken on the way.
    pub fn predict_path(&self, record: &Record) -> (Vec<PathStep>, Prediction) {
        let mut path = Vec::new();
        let prediction = self.traverse(record, |step| path.push(step));
        (path, prediction)
    }

    fn predict_single_threaded(&self, records: &[Record]) -> Vec<Prediction> {
        records.iter().map(|r| self.predict(r)).collect()
    }

    fn predict_parallel(&self, records: &[Record]) -> Vec<Prediction> {
        records.par_iter().map(|r| self.predict(r)).collect()
    }

    /// Classify many records, in input order.
    pub fn predict_batch(&self, records: &[Record], parallel: bool) -> Vec<Prediction> {
        if parallel {
            self.predict_parallel(records)
        } else {
            self.predict_single_threaded(records)
        }
    }

    fn traverse<F: FnMut(PathStep)>(&self, record: &Record, mut visit: F) -> Prediction {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(leaf) => return Prediction::Label(leaf.label.clone()),
                Node::Decision(decision) => {
                    let value = record.get(&decision.attribute);
                    let child = value
                        .and_then(|v| decision.branch(v))
                        .and_then(|b| b.child.as_ref());
                    visit(PathStep {
                        attribute: decision.attribute.clone(),
                        value: value.cloned(),
                        matched: child.is_some(),
                    });
                    match child {
                        Some(c) => node = c,
                        None => {
                            return Prediction::Unknown {
                                attribute: decision.attribute.clone(),
                                value: value.cloned(),
                            }
                        }
                    }
                }
            }
        }
    }
}
