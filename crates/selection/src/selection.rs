use formats::PolicyRecord;
use serde::Serialize;

/// The single active table filter.
///
/// A new selection replaces the previous one; selections never compose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unfiltered,
    Province(String),
    Instrument(String),
}

impl Selection {
    /// Whether `record` belongs to this selection, ignoring the unfiltered
    /// display cap.
    ///
    /// Province matching is exact string equality; instrument matching is
    /// membership of the code in `instruments`.
    pub fn matches(&self, record: &PolicyRecord) -> bool {
        match self {
            Selection::Unfiltered => true,
            Selection::Province(name) => record.province == *name,
            Selection::Instrument(code) => record.has_instrument(code),
        }
    }

    pub fn is_filtered(&self) -> bool {
        !matches!(self, Selection::Unfiltered)
    }
}
