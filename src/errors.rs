//! Errors
//!
//! Custom error types used throughout the `id3tree` crate.
use thiserror::Error;

/// Errors that can occur while building or using a decision tree.
#[derive(Debug, Error, PartialEq)]
pub enum Id3Error {
    /// An evaluator was called with input that breaks its contract,
    /// e.g. an empty dataset or an attribute the dataset does not hold.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The attribute selector was called without candidate attributes.
    #[error("No attributes are available to split on.")]
    NoAttributesAvailable,
    /// A record carries a value that was never observed in training for this branch.
    #[error("Value {value:?} of attribute {attribute} was not observed during training.")]
    UnknownCategoryValue {
        /// Attribute tested by the decision node.
        attribute: String,
        /// Value found in the record, `None` when the record lacks the attribute.
        value: Option<String>,
    },
    /// A record handed to a dataset does not hold one of its attributes.
    #[error("Record {row} has no value for attribute {attribute}.")]
    MissingAttribute {
        /// Name of the absent attribute.
        attribute: String,
        /// Position of the record in the dataset.
        row: usize,
    },
    /// Unable to write a tree or configuration.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read a tree, configuration or table.
    #[error("Unable to read from a file {0}")]
    UnableToRead(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}
