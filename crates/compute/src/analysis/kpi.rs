use formats::Dataset;
use serde::Serialize;

use crate::labels::spaced_label;

/// The three headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total_count: usize,
    pub top_instrument_label: String,
    pub distinct_province_count: usize,
}

pub fn project_kpis(dataset: &Dataset) -> Kpis {
    Kpis {
        total_count: dataset.policies.len(),
        top_instrument_label: dataset
            .summary
            .top_instrument
            .as_deref()
            .map(spaced_label)
            .unwrap_or_default(),
        distinct_province_count: dataset.provinces.len(),
    }
}
