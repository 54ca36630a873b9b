//! Splitter
//!
//! Picks the attribute of maximal information gain.
use crate::criterion::information_gain_rows;
use crate::data::Dataset;
use crate::errors::Id3Error;
use crate::observer::{NoopObserver, TreeObserver};

/// Return the candidate attribute with the greatest information gain, and that gain.
///
/// Candidates are scanned in the order given; an attribute replaces the
/// current best only on a strictly greater gain, so the first one to reach
/// the maximum wins.
///
/// * `dataset` - Non-empty labeled dataset.
/// * `candidates` - Attribute names to consider, target excluded.
pub fn best_attribute<S: AsRef<str>>(dataset: &Dataset, candidates: &[S]) -> Result<(String, f64), Id3Error> {
    let candidates: Vec<&str> = candidates.iter().map(|c| c.as_ref()).collect();
    let (attribute, gain) = best_attribute_rows(dataset, &dataset.index(), &candidates, &NoopObserver)?;
    Ok((attribute.to_string(), gain))
}

pub(crate) fn best_attribute_rows<'a>(
    dataset: &Dataset,
    index: &[usize],
    candidates: &[&'a str],
    observer: &dyn TreeObserver,
) -> Result<(&'a str, f64), Id3Error> {
    let mut best: Option<(&'a str, f64)> = None;
    for &attribute in candidates {
        let gain = information_gain_rows(dataset, index, attribute, observer)?;
        match best {
            Some((_, best_gain)) if gain <= best_gain => {}
            _ => best = Some((attribute, gain)),
        }
    }
    best.ok_or(Id3Error::NoAttributesAvailable)
}
