use std::cell::RefCell;

use compute::{InstrumentBar, Kpis, MapSeries, TimelinePoint};
use console_error_panic_hook::set_once;
use dashboard::{DashboardConfig, DashboardContext, Interaction, TableView, load_dashboard};
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_wasm::{WASMLayer, WASMLayerConfigBuilder};
use views::ClickTarget;
use wasm_bindgen::prelude::*;

mod dom;
mod fetch;

pub use fetch::GlooFetcher;

thread_local! {
    static DASHBOARD: RefCell<Option<DashboardContext>> = const { RefCell::new(None) };
}

/// Everything the page draws right after loading.
#[derive(Serialize)]
struct InitialView<'a> {
    kpis: &'a Kpis,
    map: &'a MapSeries,
    boundary: serde_json::Value,
    timeline: &'a [TimelinePoint],
    instruments: &'a [InstrumentBar],
    table: TableView,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

fn with_dashboard<R>(f: impl FnOnce(&mut DashboardContext) -> R) -> Result<R, JsValue> {
    DASHBOARD.with(|cell| {
        let mut slot = cell.borrow_mut();
        let ctx = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("dashboard not loaded"))?;
        Ok(f(ctx))
    })
}

fn dispatch(interaction: Interaction) -> Result<JsValue, JsValue> {
    let update = with_dashboard(|ctx| ctx.handle(interaction))?;
    to_js(&update)
}

fn parse_click_target(raw: &str) -> Option<ClickTarget> {
    match raw {
        "close" => Some(ClickTarget::CloseButton),
        "background" => Some(ClickTarget::Background),
        "body" => Some(ClickTarget::Body),
        _ => None,
    }
}

/// Routes `tracing` events from every crate to the browser console, so load
/// diagnostics such as unmatched provinces and duplicate ids are visible.
fn init_logging() -> Result<(), JsValue> {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(Level::DEBUG)
        .set_report_logs_in_timings(false)
        .build();
    tracing_subscriber::registry()
        .with(WASMLayer::new(config))
        .try_init()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    init_logging()?;
    Ok(())
}

/// Loads the dataset and the boundary, then fills the KPI slots and returns
/// the map, chart and table data. On failure the element `body_id` shows the
/// error instead and nothing else is rendered.
#[wasm_bindgen]
pub async fn init_dashboard(config_json: String, body_id: String) -> Result<JsValue, JsValue> {
    let config = match DashboardConfig::from_json_str(&config_json) {
        Ok(c) => c,
        Err(err) => {
            let message = err.to_string();
            dom::show_load_error(&body_id, &message);
            return Err(JsValue::from_str(&message));
        }
    };

    let ctx = match load_dashboard(&GlooFetcher, &config).await {
        Ok(ctx) => ctx,
        Err(err) => {
            let message = err.to_string();
            dom::show_load_error(&body_id, &message);
            return Err(JsValue::from_str(&message));
        }
    };

    dom::fill_kpi_slots(&ctx.kpi_slots());
    let view = to_js(&InitialView {
        kpis: ctx.kpis(),
        map: ctx.map_series(),
        boundary: ctx.boundary().to_geojson_value(),
        timeline: ctx.timeline(),
        instruments: ctx.instrument_bars(),
        table: ctx.table(),
    })?;

    DASHBOARD.with(|cell| *cell.borrow_mut() = Some(ctx));
    Ok(view)
}

/// Map region click.
#[wasm_bindgen]
pub fn select_province(name: String) -> Result<JsValue, JsValue> {
    dispatch(Interaction::MapRegionClicked(name))
}

/// Instrument chart bar click, by bar index.
#[wasm_bindgen]
pub fn select_instrument_bar(index: usize) -> Result<JsValue, JsValue> {
    dispatch(Interaction::InstrumentBarClicked(index))
}

#[wasm_bindgen]
pub fn reset_filters() -> Result<JsValue, JsValue> {
    dispatch(Interaction::ResetFilters)
}

/// Table row click. An unknown id yields an `unchanged` update.
#[wasm_bindgen]
pub fn open_policy(id: String) -> Result<JsValue, JsValue> {
    dispatch(Interaction::RowClicked(id))
}

/// Click on the open modal: `"close"`, `"background"` or `"body"`.
#[wasm_bindgen]
pub fn modal_click(target: String) -> Result<JsValue, JsValue> {
    let target = parse_click_target(&target)
        .ok_or_else(|| JsValue::from_str(&format!("unknown modal click target: {target}")))?;
    dispatch(Interaction::ModalClicked(target))
}
