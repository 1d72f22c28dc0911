use views::KpiSlot;
use wasm_bindgen::JsValue;

const LOAD_ERROR_CLASS: &str = "dashboard-error";

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// Replaces the dashboard body with the load error message.
pub fn show_load_error(body_id: &str, message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
    let Some(el) = document().and_then(|d| d.get_element_by_id(body_id)) else {
        return;
    };
    el.set_class_name(LOAD_ERROR_CLASS);
    el.set_text_content(Some(message));
}

/// Writes each KPI into the element whose id is its slot. Missing slots are skipped.
pub fn fill_kpi_slots(slots: &[KpiSlot]) {
    let Some(doc) = document() else {
        return;
    };
    for slot in slots {
        if let Some(el) = doc.get_element_by_id(slot.slot) {
            el.set_text_content(Some(&slot.text));
        }
    }
}
