//! Distribution of solution counts across dates.

use crate::persistence::DateSolutions;

/// Summary statistics over per-date solution counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub dates: usize,
    pub max: usize,
    pub min: usize,
    pub mean: f64,
    /// Middle value of the sorted counts; mean of the two middle values for
    /// an even number of dates.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// Summarizes a list of counts. Returns `None` for an empty list.
    pub fn from_counts(counts: &[usize]) -> Option<Self> {
        let max = *counts.iter().max()?;
        let min = *counts.iter().min()?;
        let n = counts.len() as f64;
        let mean = counts.iter().sum::<usize>() as f64 / n;

        let mut sorted = counts.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };

        let variance = counts
            .iter()
            .map(|&count| (count as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            dates: counts.len(),
            max,
            min,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Summarizes the solution counts of archived records.
    pub fn from_records(records: &[DateSolutions]) -> Option<Self> {
        let counts: Vec<usize> = records.iter().map(|r| r.solutions.len()).collect();
        Self::from_counts(&counts)
    }
}
