use serde::Serialize;
use std::collections::BTreeMap;

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Frequency of each question count, ordered by count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    bins: BTreeMap<usize, usize>,
}

impl Histogram {
    pub fn from_values<I: IntoIterator<Item = usize>>(values: I) -> Self {
        let mut bins = BTreeMap::new();
        for v in values {
            *bins.entry(v).or_insert(0) += 1;
        }
        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bins.iter().map(|(&v, &n)| (v, n))
    }

    /// Most frequent value, the smallest one on ties
    pub fn mode(&self) -> Option<usize> {
        self.bins
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&v, _)| v)
    }
}
