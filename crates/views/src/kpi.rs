use compute::Kpis;
use serde::Serialize;

pub const KPI_TOTAL_SLOT: &str = "kpi-total";
pub const KPI_TOP_INSTRUMENT_SLOT: &str = "kpi-top-instrument";
pub const KPI_PROVINCES_SLOT: &str = "kpi-provinces";

/// Text for one fixed KPI slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiSlot {
    pub slot: &'static str,
    pub text: String,
}

pub fn render_kpis(kpis: &Kpis) -> [KpiSlot; 3] {
    [
        KpiSlot {
            slot: KPI_TOTAL_SLOT,
            text: kpis.total_count.to_string(),
        },
        KpiSlot {
            slot: KPI_TOP_INSTRUMENT_SLOT,
            text: kpis.top_instrument_label.clone(),
        },
        KpiSlot {
            slot: KPI_PROVINCES_SLOT,
            text: kpis.distinct_province_count.to_string(),
        },
    ]
}
