use formats::OrderedMap;
use serde::Serialize;

use crate::labels::instrument_label;

/// How many bars the instrument chart shows.
pub const TOP_INSTRUMENTS: usize = 8;

/// A chart bar. `label` is for display only; clicks resolve through `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentBar {
    pub label: String,
    pub code: String,
    pub count: u64,
}

/// Sorts by count descending, keeping tally order between equal counts, and
/// keeps the first `limit` bars.
pub fn rank_instruments(tally: &OrderedMap<u64>, limit: usize) -> Vec<InstrumentBar> {
    let mut ranked: Vec<(&str, u64)> = tally.iter().map(|(code, n)| (code, *n)).collect();
    // `sort_by` is stable, so ties keep tally order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(code, count)| InstrumentBar {
            label: instrument_label(code),
            code: code.to_string(),
            count,
        })
        .collect()
}
