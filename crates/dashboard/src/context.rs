use compute::{
    InstrumentBar, Kpis, MapSeries, TOP_INSTRUMENTS, TimelinePoint, map_series, project_kpis,
    rank_instruments, timeline_series,
};
use formats::{Boundary, Dataset, SanitizeReport, SanitizeRules, sanitize_boundary};
use selection::{FilterEngine, Selection};
use serde::Serialize;
use tracing::warn;
use views::{KpiSlot, ModalOverlay, TableBody, render_kpis, render_table, selection_caption};

/// What the table shows: a caption for the active selection plus the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub caption: String,
    pub selection: Selection,
    pub body: TableBody,
}

/// Everything the page needs after a successful load.
///
/// Built once; the projections never change afterwards. The only mutable
/// parts are the engine's selection and the modal overlay.
#[derive(Debug)]
pub struct DashboardContext {
    pub(crate) engine: FilterEngine,
    pub(crate) modal: ModalOverlay,
    kpis: Kpis,
    map: MapSeries,
    timeline: Vec<TimelinePoint>,
    instruments: Vec<InstrumentBar>,
    boundary: Boundary,
    sanitize_report: SanitizeReport,
    unmatched_provinces: Vec<String>,
}

impl DashboardContext {
    pub fn new(dataset: Dataset, boundary: &Boundary, rules: &SanitizeRules) -> Self {
        let (boundary, sanitize_report) = sanitize_boundary(boundary, rules);

        let kpis = project_kpis(&dataset);
        let map = map_series(&dataset);
        let timeline = timeline_series(&dataset);
        let instruments = rank_instruments(&dataset.global_instruments, TOP_INSTRUMENTS);

        // Province names join the two documents by exact equality; report the
        // ones the map cannot show.
        let unmatched_provinces: Vec<String> = map
            .entries
            .iter()
            .filter(|e| !boundary.region_names().any(|n| n == e.name))
            .map(|e| e.name.clone())
            .collect();
        if !unmatched_provinces.is_empty() {
            warn!(
                provinces = ?unmatched_provinces,
                "dataset provinces without a matching boundary region"
            );
        }

        Self {
            engine: FilterEngine::new(dataset.policies),
            modal: ModalOverlay::new(),
            kpis,
            map,
            timeline,
            instruments,
            boundary,
            sanitize_report,
            unmatched_provinces,
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn modal(&self) -> &ModalOverlay {
        &self.modal
    }

    pub fn kpis(&self) -> &Kpis {
        &self.kpis
    }

    pub fn kpi_slots(&self) -> [KpiSlot; 3] {
        render_kpis(&self.kpis)
    }

    pub fn map_series(&self) -> &MapSeries {
        &self.map
    }

    pub fn timeline(&self) -> &[TimelinePoint] {
        &self.timeline
    }

    pub fn instrument_bars(&self) -> &[InstrumentBar] {
        &self.instruments
    }

    /// The sanitized boundary handed to the map renderer.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn sanitize_report(&self) -> SanitizeReport {
        self.sanitize_report
    }

    pub fn unmatched_provinces(&self) -> &[String] {
        &self.unmatched_provinces
    }

    /// The table for the current selection.
    pub fn table(&self) -> TableView {
        TableView {
            caption: selection_caption(self.engine.selection()),
            selection: self.engine.selection().clone(),
            body: render_table(&self.engine.visible()),
        }
    }
}
