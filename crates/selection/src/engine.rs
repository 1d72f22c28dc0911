use std::collections::BTreeMap;

use formats::PolicyRecord;
use tracing::{debug, warn};

use crate::selection::Selection;

/// How many records the table shows when nothing is selected.
pub const UNFILTERED_LIMIT: usize = 50;

/// Owns the canonical policy collection and the active [`Selection`].
///
/// Every transition recomputes the visible set from the full collection; no
/// filtered copy is ever stored. Views borrow records from here and own none.
#[derive(Debug, Default)]
pub struct FilterEngine {
    records: Vec<PolicyRecord>,
    by_id: BTreeMap<String, usize>,
    selection: Selection,
}

impl FilterEngine {
    pub fn new(records: Vec<PolicyRecord>) -> Self {
        let mut by_id = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            if by_id.contains_key(&record.id) {
                warn!(id = %record.id, index, "duplicate policy id; keeping the first record");
                continue;
            }
            by_id.insert(record.id.clone(), index);
        }
        Self {
            records,
            by_id,
            selection: Selection::Unfiltered,
        }
    }

    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Looks a record up by id. A miss is not an error.
    pub fn record(&self, id: &str) -> Option<&PolicyRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn select_province(&mut self, name: &str) -> Vec<&PolicyRecord> {
        self.apply(Selection::Province(name.to_string()))
    }

    pub fn select_instrument(&mut self, code: &str) -> Vec<&PolicyRecord> {
        self.apply(Selection::Instrument(code.to_string()))
    }

    pub fn clear(&mut self) -> Vec<&PolicyRecord> {
        self.apply(Selection::Unfiltered)
    }

    /// Replaces the active selection and returns the new visible set.
    pub fn apply(&mut self, selection: Selection) -> Vec<&PolicyRecord> {
        self.selection = selection;
        let visible = self.visible();
        debug!(
            selection = ?self.selection,
            visible = visible.len(),
            "selection applied"
        );
        visible
    }

    /// Records matching the active selection, in collection order.
    ///
    /// The unfiltered view is capped at [`UNFILTERED_LIMIT`]; filtered views
    /// are not.
    pub fn visible(&self) -> Vec<&PolicyRecord> {
        match &self.selection {
            Selection::Unfiltered => self.records.iter().take(UNFILTERED_LIMIT).collect(),
            selection => self
                .records
                .iter()
                .filter(|r| selection.matches(r))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterEngine, UNFILTERED_LIMIT};
    use crate::selection::Selection;
    use formats::PolicyRecord;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(id: &str, province: &str, instruments: &[&str]) -> PolicyRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "province": province,
            "instruments": instruments,
        }))
        .unwrap()
    }

    fn ids(records: &[&PolicyRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    fn sample() -> FilterEngine {
        FilterEngine::new(vec![
            record("a", "四川省", &["fiscal_purchase_subsidy"]),
            record("b", "上海市", &["tax_exemption", "fiscal_purchase_subsidy"]),
            record("c", "四川省", &[]),
        ])
    }

    #[test]
    fn starts_unfiltered() {
        let engine = sample();
        assert_eq!(engine.selection(), &Selection::Unfiltered);
        assert_eq!(ids(&engine.visible()), vec!["a", "b", "c"]);
    }

    #[test]
    fn province_then_instrument_replaces() {
        let mut engine = sample();
        assert_eq!(ids(&engine.select_province("四川省")), vec!["a", "c"]);
        assert_eq!(
            ids(&engine.select_instrument("fiscal_purchase_subsidy")),
            vec!["a", "b"]
        );
        assert_eq!(
            engine.selection(),
            &Selection::Instrument("fiscal_purchase_subsidy".to_string())
        );
    }

    #[test]
    fn shanghai_record_drills_by_instrument() {
        let mut engine = FilterEngine::new(vec![record(
            "x1",
            "上海市",
            &["fiscal_purchase_subsidy"],
        )]);
        assert_eq!(
            ids(&engine.select_instrument("fiscal_purchase_subsidy")),
            vec!["x1"]
        );
        assert!(engine.select_instrument("tax_exemption").is_empty());
    }

    #[test]
    fn unknown_province_is_empty_not_error() {
        let mut engine = sample();
        assert!(engine.select_province("四川").is_empty());
    }

    #[test]
    fn unfiltered_view_is_capped() {
        let records: Vec<PolicyRecord> = (0..120)
            .map(|i| record(&format!("p{i}"), "x", &[]))
            .collect();
        let mut engine = FilterEngine::new(records);
        assert_eq!(engine.visible().len(), UNFILTERED_LIMIT);
        assert_eq!(engine.select_province("x").len(), 120);
        let cleared = engine.clear();
        assert_eq!(cleared.len(), UNFILTERED_LIMIT);
        assert_eq!(cleared[0].id, "p0");
        assert_eq!(cleared[49].id, "p49");
        assert_eq!(engine.len(), 120);
    }

    #[test]
    fn lookup_by_id_keeps_first_duplicate() {
        let engine = FilterEngine::new(vec![
            record("dup", "first", &[]),
            record("dup", "second", &[]),
        ]);
        assert_eq!(engine.record("dup").unwrap().province, "first");
        assert!(engine.record("missing").is_none());
    }

    fn arb_records() -> impl Strategy<Value = Vec<PolicyRecord>> {
        let province = prop_oneof![Just("四川省"), Just("上海市"), Just("北京市")];
        let code = prop_oneof![
            Just("fiscal_purchase_subsidy"),
            Just("tax_exemption"),
            Just("rd_grant")
        ];
        proptest::collection::vec(
            (province, proptest::collection::vec(code, 0..3)),
            0..80,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (p, codes))| record(&format!("r{i}"), p, &codes))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_province_selection_is_exact_and_idempotent(
            records in arb_records(),
            province in prop_oneof![Just("四川省"), Just("上海市"), Just("广东省")]
        ) {
            let expected: Vec<String> = records
                .iter()
                .filter(|r| r.province == province)
                .map(|r| r.id.clone())
                .collect();
            let default_view: Vec<String> = records
                .iter()
                .take(UNFILTERED_LIMIT)
                .map(|r| r.id.clone())
                .collect();

            let mut engine = FilterEngine::new(records);
            let first = ids(&engine.select_province(province));
            let second = ids(&engine.select_province(province));
            prop_assert_eq!(&first, &expected);
            prop_assert_eq!(&second, &expected);
            prop_assert_eq!(ids(&engine.clear()), default_view);
        }

        #[test]
        fn prop_instrument_selection_is_membership(
            records in arb_records(),
            code in prop_oneof![Just("fiscal_purchase_subsidy"), Just("tax_exemption"), Just("unknown_code")]
        ) {
            let expected: Vec<String> = records
                .iter()
                .filter(|r| r.instruments.iter().any(|c| c == code))
                .map(|r| r.id.clone())
                .collect();
            let mut engine = FilterEngine::new(records);
            let got = ids(&engine.select_instrument(code));
            if code == "unknown_code" {
                prop_assert!(got.is_empty());
            }
            prop_assert_eq!(got, expected);
        }
    }
}
