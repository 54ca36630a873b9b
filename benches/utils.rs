#![allow(dead_code)]
use id3tree::{Dataset, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random categorical dataset where the label depends on the first two attributes,
/// with some label noise.
pub(crate) fn create_data(n_samples: usize, n_features: usize, n_categories: i64) -> Dataset {
    // reproducible seed
    let mut rng = StdRng::seed_from_u64(1903);

    let mut columns: Vec<(String, Vec<Value>)> = (0..n_features)
        .map(|j| (format!("f{}", j), Vec::with_capacity(n_samples)))
        .collect();
    let mut labels = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let x: Vec<i64> = (0..n_features).map(|_| rng.gen_range(0..n_categories)).collect();
        for (column, v) in columns.iter_mut().zip(x.iter()) {
            column.1.push(Value::Integer(*v));
        }
        let signal = (x[0] + x.get(1).copied().unwrap_or(0)) % 2 == 0;
        let flip = rng.gen_bool(0.1);
        labels.push(Value::Boolean(signal ^ flip));
    }
    columns.push(("label".to_string(), labels));

    Dataset::from_columns(columns, "label").unwrap()
}
