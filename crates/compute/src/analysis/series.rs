use formats::Dataset;
use serde::Serialize;

use super::statistics::Statistics;

/// One choropleth entry. Provinces without data never get an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub name: String,
    pub value: u64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapSeries {
    pub entries: Vec<MapEntry>,
    /// `(min, max)` of `value`, for the renderer's color scale.
    pub value_range: Option<(f64, f64)>,
    pub intensity_range: Option<(f64, f64)>,
}

impl MapSeries {
    pub fn get(&self, name: &str) -> Option<&MapEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub count: u64,
}

pub fn map_series(dataset: &Dataset) -> MapSeries {
    let entries: Vec<MapEntry> = dataset
        .provinces
        .iter()
        .map(|(name, stat)| MapEntry {
            name: name.to_string(),
            value: stat.count,
            intensity: stat.subsidy_intensity,
        })
        .collect();

    let values: Vec<f64> = entries.iter().map(|e| e.value as f64).collect();
    let intensities: Vec<f64> = entries.iter().map(|e| e.intensity).collect();

    MapSeries {
        value_range: Statistics::min_max(&values),
        intensity_range: Statistics::min_max(&intensities),
        entries,
    }
}

/// Buckets in document order; no sorting or gap filling.
pub fn timeline_series(dataset: &Dataset) -> Vec<TimelinePoint> {
    dataset
        .timeline
        .iter()
        .map(|b| TimelinePoint {
            year: b.year,
            count: b.count,
        })
        .collect()
}
