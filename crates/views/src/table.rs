use compute::instrument_tag;
use formats::PolicyRecord;
use serde::Serialize;

use crate::text::truncate_title;

pub const YEAR_PLACEHOLDER: &str = "-";
pub const MAX_ROW_TAGS: usize = 2;
pub const NO_RESULTS_MESSAGE: &str = "No policies found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Record id, routed back on row click.
    pub id: String,
    pub title: String,
    /// Untruncated title for the hover tooltip.
    pub full_title: String,
    pub province: String,
    pub year: String,
    pub tags: Vec<String>,
}

/// Table body: either rows, or the single placeholder row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableBody {
    Rows { rows: Vec<TableRow> },
    Empty { message: &'static str },
}

impl TableBody {
    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableBody::Rows { rows } => rows,
            TableBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableBody::Empty { .. })
    }
}

pub fn render_row(record: &PolicyRecord) -> TableRow {
    TableRow {
        id: record.id.clone(),
        title: truncate_title(&record.title).into_owned(),
        full_title: record.title.clone(),
        province: record.province.clone(),
        year: record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| YEAR_PLACEHOLDER.to_string()),
        tags: record
            .instruments
            .iter()
            .take(MAX_ROW_TAGS)
            .map(|code| instrument_tag(code).to_string())
            .collect(),
    }
}

pub fn render_table(records: &[&PolicyRecord]) -> TableBody {
    if records.is_empty() {
        return TableBody::Empty {
            message: NO_RESULTS_MESSAGE,
        };
    }
    TableBody::Rows {
        rows: records.iter().map(|r| render_row(r)).collect(),
    }
}
