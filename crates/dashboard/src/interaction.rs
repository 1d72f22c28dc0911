use selection::Selection;
use serde::Serialize;
use tracing::debug;
use views::{ClickTarget, ModalView};

use crate::context::{DashboardContext, TableView};

/// A user action routed into the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    MapRegionClicked(String),
    /// Index into [`DashboardContext::instrument_bars`].
    InstrumentBarClicked(usize),
    ResetFilters,
    RowClicked(String),
    ModalClicked(ClickTarget),
}

/// What the page has to redraw after an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "view", rename_all = "snake_case")]
pub enum DashboardUpdate {
    Table(TableView),
    Modal(ModalView),
    ModalClosed,
    Unchanged,
}

impl DashboardContext {
    /// Applies one interaction synchronously and reports what changed.
    pub fn handle(&mut self, interaction: Interaction) -> DashboardUpdate {
        debug!(?interaction, "dashboard interaction");
        match interaction {
            Interaction::MapRegionClicked(name) => self.select(Selection::Province(name)),
            Interaction::InstrumentBarClicked(index) => {
                // Bars carry the raw code; the display label never reaches the filter.
                let Some(code) = self.instrument_bars().get(index).map(|b| b.code.clone()) else {
                    return DashboardUpdate::Unchanged;
                };
                self.select(Selection::Instrument(code))
            }
            Interaction::ResetFilters => self.select(Selection::Unfiltered),
            Interaction::RowClicked(id) => {
                if !self.modal.open(self.engine.record(&id)) {
                    return DashboardUpdate::Unchanged;
                }
                match self.modal.content() {
                    Some(view) => DashboardUpdate::Modal(view.clone()),
                    None => DashboardUpdate::Unchanged,
                }
            }
            Interaction::ModalClicked(target) => {
                if self.modal.handle_click(target) {
                    DashboardUpdate::ModalClosed
                } else {
                    DashboardUpdate::Unchanged
                }
            }
        }
    }

    pub fn select_province(&mut self, name: &str) -> TableView {
        self.set_selection(Selection::Province(name.to_string()))
    }

    pub fn select_instrument(&mut self, code: &str) -> TableView {
        self.set_selection(Selection::Instrument(code.to_string()))
    }

    pub fn clear_selection(&mut self) -> TableView {
        self.set_selection(Selection::Unfiltered)
    }

    fn select(&mut self, selection: Selection) -> DashboardUpdate {
        DashboardUpdate::Table(self.set_selection(selection))
    }

    fn set_selection(&mut self, selection: Selection) -> TableView {
        self.engine.apply(selection);
        self.table()
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardUpdate, Interaction};
    use crate::context::DashboardContext;
    use formats::{Boundary, Dataset, SanitizeRules};
    use pretty_assertions::assert_eq;
    use selection::Selection;
    use serde_json::json;
    use views::{ClickTarget, NO_RESULTS_MESSAGE, TableBody};

    fn context() -> DashboardContext {
        let dataset = Dataset::from_json_value(json!({
            "global_instruments": {"tax_exemption": 1, "fiscal_purchase_subsidy": 5},
            "policies": [
                {"id": "x1", "title": "Shanghai NEV plan", "province": "上海市",
                 "instruments": ["fiscal_purchase_subsidy"]},
                {"id": "x2", "province": "四川省", "instruments": []}
            ]
        }))
        .unwrap();
        DashboardContext::new(dataset, &Boundary::default(), &SanitizeRules::default())
    }

    fn table(update: DashboardUpdate) -> super::TableView {
        match update {
            DashboardUpdate::Table(t) => t,
            other => panic!("expected table update, got {other:?}"),
        }
    }

    #[test]
    fn bar_click_filters_by_raw_code() {
        let mut ctx = context();
        assert_eq!(ctx.instrument_bars()[0].label, "purchase subsidy");
        let t = table(ctx.handle(Interaction::InstrumentBarClicked(0)));
        assert_eq!(
            t.selection,
            Selection::Instrument("fiscal_purchase_subsidy".to_string())
        );
        assert_eq!(t.caption, "Instrument: purchase subsidy");
        let ids: Vec<&str> = t.body.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["x1"]);
    }

    #[test]
    fn out_of_range_bar_is_ignored() {
        let mut ctx = context();
        assert_eq!(
            ctx.handle(Interaction::InstrumentBarClicked(8)),
            DashboardUpdate::Unchanged
        );
        assert_eq!(ctx.engine().selection(), &Selection::Unfiltered);
    }

    #[test]
    fn unmatched_instrument_renders_placeholder() {
        let mut ctx = context();
        let t = ctx.select_instrument("tax_exemption");
        assert_eq!(
            t.body,
            TableBody::Empty {
                message: NO_RESULTS_MESSAGE
            }
        );
    }

    #[test]
    fn map_click_then_reset() {
        let mut ctx = context();
        let t = table(ctx.handle(Interaction::MapRegionClicked("四川省".to_string())));
        assert_eq!(t.body.rows().len(), 1);
        let t = table(ctx.handle(Interaction::ResetFilters));
        assert_eq!(t.selection, Selection::Unfiltered);
        assert_eq!(t.body.rows().len(), 2);
    }

    #[test]
    fn unknown_row_leaves_modal_hidden() {
        let mut ctx = context();
        assert_eq!(
            ctx.handle(Interaction::RowClicked("nope".to_string())),
            DashboardUpdate::Unchanged
        );
        assert!(!ctx.modal().is_visible());
    }

    #[test]
    fn row_click_opens_and_background_closes() {
        let mut ctx = context();
        match ctx.handle(Interaction::RowClicked("x1".to_string())) {
            DashboardUpdate::Modal(view) => assert_eq!(view.title, "Shanghai NEV plan"),
            other => panic!("expected modal, got {other:?}"),
        }
        assert_eq!(
            ctx.handle(Interaction::ModalClicked(ClickTarget::Body)),
            DashboardUpdate::Unchanged
        );
        assert_eq!(
            ctx.handle(Interaction::ModalClicked(ClickTarget::Background)),
            DashboardUpdate::ModalClosed
        );
        assert!(!ctx.modal().is_visible());
    }
}
