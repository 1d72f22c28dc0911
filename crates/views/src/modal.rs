use compute::{instrument_label, spaced_label};
use formats::{Evidence, PolicyRecord};
use serde::Serialize;

use crate::table::YEAR_PLACEHOLDER;

pub const NO_TARGETS_MESSAGE: &str = "No quantitative targets recorded";
pub const NO_INSTRUMENTS_MESSAGE: &str = "No financial instruments recorded";
pub const NO_OTHER_MESSAGE: &str = "No other measures recorded";
pub const VEHICLES_UNIT: &str = "Vehicles";
/// Shown for an instrument that has supporting evidence but no value.
pub const EVIDENCE_ONLY_VALUE: &str = "Yes";

/// One block of the detail modal, with its own empty state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailBlock<T> {
    Entries { entries: Vec<T> },
    Empty { message: &'static str },
}

impl<T> DetailBlock<T> {
    fn from_entries(entries: Vec<T>, empty: &'static str) -> Self {
        if entries.is_empty() {
            DetailBlock::Empty { message: empty }
        } else {
            DetailBlock::Entries { entries }
        }
    }

    pub fn entries(&self) -> &[T] {
        match self {
            DetailBlock::Entries { entries } => entries,
            DetailBlock::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, DetailBlock::Empty { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
    pub key: String,
    pub label: String,
    pub value: String,
    /// `Some("Vehicles")` for targets counted in vehicles.
    pub unit: Option<&'static str>,
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentRow {
    pub code: String,
    pub label: String,
    pub value: String,
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalView {
    pub id: String,
    pub title: String,
    pub province: String,
    pub year: String,
    pub targets: DetailBlock<TargetRow>,
    pub instruments: DetailBlock<InstrumentRow>,
    pub other: DetailBlock<String>,
}

pub fn render_modal(record: &PolicyRecord) -> ModalView {
    ModalView {
        id: record.id.clone(),
        title: record.title.clone(),
        province: record.province.clone(),
        year: record
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| YEAR_PLACEHOLDER.to_string()),
        targets: DetailBlock::from_entries(target_rows(record), NO_TARGETS_MESSAGE),
        instruments: DetailBlock::from_entries(instrument_rows(record), NO_INSTRUMENTS_MESSAGE),
        other: DetailBlock::from_entries(other_tags(record), NO_OTHER_MESSAGE),
    }
}

fn target_rows(record: &PolicyRecord) -> Vec<TargetRow> {
    record
        .targets
        .iter()
        .filter_map(|(key, ev)| {
            let value = ev.value_text()?;
            Some(TargetRow {
                key: key.to_string(),
                label: spaced_label(key),
                value,
                unit: key.contains("vehicle").then_some(VEHICLES_UNIT),
                evidence: ev.evidence_text().map(str::to_string),
            })
        })
        .collect()
}

fn instrument_rows(record: &PolicyRecord) -> Vec<InstrumentRow> {
    record
        .merged_instruments()
        .iter()
        .filter_map(|(code, ev)| instrument_row(code, ev))
        .collect()
}

fn instrument_row(code: &str, ev: &Evidence) -> Option<InstrumentRow> {
    let evidence = ev.evidence_text().map(str::to_string);
    let value = match (ev.value_text(), &evidence) {
        (Some(v), _) => v,
        (None, Some(_)) => EVIDENCE_ONLY_VALUE.to_string(),
        (None, None) => return None,
    };
    Some(InstrumentRow {
        code: code.to_string(),
        label: instrument_label(code),
        value,
        evidence,
    })
}

fn other_tags(record: &PolicyRecord) -> Vec<String> {
    record
        .other
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where a click on the open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    CloseButton,
    /// The dimmed overlay outside the modal body.
    Background,
    Body,
}

/// Open/closed state of the detail overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalOverlay {
    content: Option<ModalView>,
}

impl ModalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&ModalView> {
        self.content.as_ref()
    }

    /// Shows the modal for `record`. A `None` record leaves the overlay as it
    /// was and returns `false`.
    pub fn open(&mut self, record: Option<&PolicyRecord>) -> bool {
        let Some(record) = record else {
            return false;
        };
        self.content = Some(render_modal(record));
        true
    }

    /// Returns `true` if the click closed the overlay.
    pub fn handle_click(&mut self, target: ClickTarget) -> bool {
        if self.content.is_none() {
            return false;
        }
        match target {
            ClickTarget::CloseButton | ClickTarget::Background => {
                self.content = None;
                true
            }
            ClickTarget::Body => false,
        }
    }
}
