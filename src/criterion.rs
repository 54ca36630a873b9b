//! Criterion
//!
//! Entropy of the label distribution and the information gain of
//! partitioning by one attribute.
use crate::data::Dataset;
use crate::errors::Id3Error;
use crate::observer::{BuildEvent, NoopObserver, TreeObserver};

/// Entropy, in bits, of the target label distribution of `dataset`.
///
/// Fails with [`Id3Error::InvalidInput`] on an empty dataset.
pub fn entropy(dataset: &Dataset) -> Result<f64, Id3Error> {
    entropy_rows(dataset, &dataset.index())
}

/// Information gain, in bits, of partitioning `dataset` by `attribute`.
///
/// * `dataset` - Non-empty labeled dataset.
/// * `attribute` - One of the dataset's non-target attributes.
pub fn information_gain(dataset: &Dataset, attribute: &str) -> Result<f64, Id3Error> {
    information_gain_rows(dataset, &dataset.index(), attribute, &NoopObserver)
}

pub(crate) fn entropy_rows(dataset: &Dataset, index: &[usize]) -> Result<f64, Id3Error> {
    if index.is_empty() {
        return Err(Id3Error::InvalidInput(
            "entropy is undefined for an empty dataset".to_string(),
        ));
    }
    let total = index.len() as f64;
    let mut entropy_value = 0.0;
    for (_, count) in dataset.label_counts(index) {
        let p = count as f64 / total;
        entropy_value -= p * p.log2();
    }
    Ok(entropy_value)
}

pub(crate) fn information_gain_rows(
    dataset: &Dataset,
    index: &[usize],
    attribute: &str,
    observer: &dyn TreeObserver,
) -> Result<f64, Id3Error> {
    if !dataset.has_attribute(attribute) {
        return Err(Id3Error::InvalidInput(format!(
            "{} is not an attribute of the dataset",
            attribute
        )));
    }
    let baseline = entropy_rows(dataset, index)?;
    let total = index.len() as f64;

    let mut weighted = 0.0;
    for (_, subset) in dataset.partition(index, attribute) {
        weighted += (subset.len() as f64 / total) * entropy_rows(dataset, &subset)?;
    }

    let gain = baseline - weighted;
    observer.on_event(&BuildEvent::GainEvaluated {
        attribute: attribute.to_string(),
        rows: index.len(),
        baseline,
        weighted,
        gain,
    });
    Ok(gain)
}
